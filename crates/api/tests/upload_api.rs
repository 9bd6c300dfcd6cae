//! Integration tests for the media upload pipeline: validation order, size
//! ceilings, pointer patching, and deletion.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, upload_file};
use sqlx::PgPool;
use uuid::Uuid;

async fn get_project(
    pool: &PgPool,
    user: &common::TestUser,
    id: Uuid,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/projects/{id}"), &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn logo_upload_stores_object_and_patches_pointer(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, storage) = common::build_test_app_with_storage(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "logo",
        "logo.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "logo");
    assert_eq!(json["data"]["mimeType"], "image/png");
    assert_eq!(json["data"]["width"], 1);
    assert_eq!(json["data"]["height"], 1);
    assert!(json["data"]["signedUrl"]
        .as_str()
        .unwrap()
        .starts_with("memory://"));
    assert!(json["data"]["publicUrl"].is_string());

    // The bytes landed in storage under the returned key.
    let file_key = json["data"]["fileKey"].as_str().unwrap();
    assert!(file_key.starts_with(&format!("projects/{id}/logo/")));
    assert!(file_key.ends_with(".png"));
    let stored = storage.get(file_key).await.expect("object should exist");
    assert_eq!(stored.bytes, common::TINY_PNG);

    // The project's logo pointer was patched.
    let project = get_project(&pool, &user, id).await;
    assert_eq!(project["data"]["gameLogoKey"], file_key);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn screenshots_accumulate_without_touching_primary_pointers(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, _) = common::build_test_app_with_storage(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "logo",
        "logo.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;
    let logo_key = body_json(response).await["data"]["fileKey"]
        .as_str()
        .unwrap()
        .to_string();

    for name in ["a.png", "b.png"] {
        let app = common::build_test_app(pool.clone());
        let response = upload_file(
            app,
            &format!("/api/v1/projects/{id}/assets"),
            &user.token,
            "screenshot",
            name,
            "image/png",
            common::TINY_PNG,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let project = get_project(&pool, &user, id).await;
    assert_eq!(project["data"]["gameLogoKey"], logo_key.as_str());
    let screenshots = project["data"]["screenshotsKeys"].as_array().unwrap();
    assert_eq!(screenshots.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_kind_tag_is_stored_as_screenshot(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let app = common::build_test_app(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "banner",
        "banner.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "screenshot");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn kind_aliases_map_to_canonical_kinds(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    for (tag, expected) in [("app_icon", "logo"), ("hero_image", "cover_art")] {
        let app = common::build_test_app(pool.clone());
        let response = upload_file(
            app,
            &format!("/api/v1/projects/{id}/assets"),
            &user.token,
            tag,
            "art.png",
            "image/png",
            common::TINY_PNG,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["kind"], expected, "tag {tag}");
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_file_is_rejected_before_storage(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, storage) = common::build_test_app_with_storage(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "logo",
        "logo.png",
        "image/png",
        b"",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("No file provided"));
    assert!(storage.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn disallowed_mime_type_is_rejected(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, storage) = common::build_test_app_with_storage(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "screenshot",
        "readme.pdf",
        "application/pdf",
        b"%PDF-1.4",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    // Nothing was written to storage.
    assert!(storage.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_image_is_rejected(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let app = common::build_test_app(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "screenshot",
        "huge.png",
        "image/png",
        &vec![0u8; 11 * 1024 * 1024],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("10 MB"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mp4_trailer_has_a_tighter_ceiling_than_other_video(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    // 6 MB mp4 trailer: over the 5 MB trailer ceiling, under the general
    // 100 MB video ceiling.
    let app = common::build_test_app(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "trailer",
        "trailer.mp4",
        "video/mp4",
        &vec![0u8; 6 * 1024 * 1024],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("5 MB"));

    // 4 MB mp4 trailer: accepted.
    let app = common::build_test_app(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "trailer",
        "trailer.mp4",
        "video/mp4",
        &vec![0u8; 4 * 1024 * 1024],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The same 6 MB as webm is not an mp4 trailer; the general ceiling
    // applies and it goes through.
    let app = common::build_test_app(pool);
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "trailer",
        "trailer.webm",
        "video/webm",
        &vec![0u8; 6 * 1024 * 1024],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparsable_image_still_uploads_without_dimensions(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let app = common::build_test_app(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "screenshot",
        "corrupt.png",
        "image/png",
        b"not actually a png",
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["width"].is_null());
    assert!(json["data"]["height"].is_null());
}

// ---------------------------------------------------------------------------
// Declared metadata
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn trailer_upload_records_declared_duration(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let app = common::build_test_app(pool.clone());
    let response = common::upload_file_with_meta(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "trailer",
        &[("width", "1920"), ("height", "1080"), ("duration", "95")],
        "trailer.mp4",
        "video/mp4",
        &vec![0u8; 1024],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["width"], 1920);
    assert_eq!(json["data"]["height"], 1080);
    assert_eq!(json["data"]["durationSeconds"], 95);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn declared_dimensions_win_over_the_image_header(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    // The file is a 1x1 PNG, but the client declares the display size.
    let app = common::build_test_app(pool.clone());
    let response = common::upload_file_with_meta(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "screenshot",
        &[("width", "640"), ("height", "480")],
        "shot.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["width"], 640);
    assert_eq!(json["data"]["height"], 480);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_declared_metadata_is_rejected(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, storage) = common::build_test_app_with_storage(pool.clone());
    let response = common::upload_file_with_meta(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "trailer",
        &[("duration", "ninety")],
        "trailer.mp4",
        "video/mp4",
        &vec![0u8; 1024],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("non-negative integer"));
    assert!(storage.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_to_foreign_project_is_not_found(pool: PgPool) {
    let alice = common::sign_in(&pool, "alice@example.com").await;
    let bob = common::sign_in(&pool, "bob@example.com").await;
    let id = common::create_project(&pool, &alice, "Private").await;

    let app = common::build_test_app(pool);
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &bob.token,
        "logo",
        "logo.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_listing_attaches_urls_per_asset(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, storage) = common::build_test_app_with_storage(pool.clone());
    upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "logo",
        "logo.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;

    // With presigning broken, the listing still succeeds; the URL is null.
    storage.fail_presigning(true);
    let state_app = {
        // Reuse the same storage double so the uploaded object is visible.
        let config = common::test_config();
        let state = showroom_api::state::AppState {
            pool: pool.clone(),
            config: std::sync::Arc::new(config.clone()),
            storage: storage.clone(),
        };
        showroom_api::router::build_app_router(state, &config)
    };
    let response = get_auth(
        state_app,
        &format!("/api/v1/projects/{id}/assets/signed"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let list = json["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert!(list[0]["signedUrl"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_an_asset_removes_object_and_clears_pointer(pool: PgPool) {
    let user = common::sign_in(&pool, "dev@example.com").await;
    let id = common::create_project(&pool, &user, "Neon Drift").await;

    let (app, storage) = common::build_test_app_with_storage(pool.clone());
    let response = upload_file(
        app,
        &format!("/api/v1/projects/{id}/assets"),
        &user.token,
        "logo",
        "logo.png",
        "image/png",
        common::TINY_PNG,
    )
    .await;
    let json = body_json(response).await;
    let asset_id = json["data"]["id"].as_str().unwrap().to_string();

    let config = common::test_config();
    let state = showroom_api::state::AppState {
        pool: pool.clone(),
        config: std::sync::Arc::new(config.clone()),
        storage: storage.clone(),
    };
    let app = showroom_api::router::build_app_router(state, &config);
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{id}/assets/{asset_id}"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(storage.is_empty().await, "storage object must be gone");

    let project = get_project(&pool, &user, id).await;
    assert!(project["data"]["gameLogoKey"].is_null());

    // The record is gone too.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/projects/{id}/assets"), &user.token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
