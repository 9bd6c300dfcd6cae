//! Repository for the `organizations` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::organization::{Organization, UpsertOrganization};

const ORGANIZATION_COLUMNS: &str = "\
    id, owner_id, name, website, primary_contact_name, primary_contact_email, \
    primary_contact_phone, description, industry, company_size, country, \
    is_verified, created_at, updated_at";

/// Provides operations for the one-organization-per-account model.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// The caller's organization, if they have registered one.
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_id: Uuid,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE owner_id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the caller's organization profile. An account holds
    /// at most one organization, enforced by the unique owner constraint.
    pub async fn upsert(
        pool: &PgPool,
        owner_id: Uuid,
        input: &UpsertOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations \
                (owner_id, name, website, primary_contact_name, primary_contact_email, \
                 primary_contact_phone, description, industry, company_size, country) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (owner_id) DO UPDATE SET \
                name = EXCLUDED.name, \
                website = EXCLUDED.website, \
                primary_contact_name = EXCLUDED.primary_contact_name, \
                primary_contact_email = EXCLUDED.primary_contact_email, \
                primary_contact_phone = EXCLUDED.primary_contact_phone, \
                description = EXCLUDED.description, \
                industry = EXCLUDED.industry, \
                company_size = EXCLUDED.company_size, \
                country = EXCLUDED.country, \
                updated_at = now() \
             RETURNING {ORGANIZATION_COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.website.as_deref())
            .bind(input.primary_contact_name.as_deref())
            .bind(input.primary_contact_email.as_deref())
            .bind(input.primary_contact_phone.as_deref())
            .bind(input.description.as_deref())
            .bind(input.industry.as_deref())
            .bind(input.company_size.as_deref())
            .bind(input.country.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Update an organization by id, owner-checked in the WHERE clause so a
    /// caller can only touch their own record.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        input: &UpsertOrganization,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET \
                name = $3, \
                website = $4, \
                primary_contact_name = $5, \
                primary_contact_email = $6, \
                primary_contact_phone = $7, \
                description = $8, \
                industry = $9, \
                company_size = $10, \
                country = $11, \
                updated_at = now() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {ORGANIZATION_COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.website.as_deref())
            .bind(input.primary_contact_name.as_deref())
            .bind(input.primary_contact_email.as_deref())
            .bind(input.primary_contact_phone.as_deref())
            .bind(input.description.as_deref())
            .bind(input.industry.as_deref())
            .bind(input.company_size.as_deref())
            .bind(input.country.as_deref())
            .fetch_optional(pool)
            .await
    }
}
