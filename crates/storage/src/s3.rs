//! S3-compatible object store.
//!
//! Works against AWS S3 proper and S3-compatible services (MinIO, R2) via
//! the optional endpoint override with path-style addressing.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use crate::{ObjectStorage, StorageError};

/// Connection settings for the S3 backend.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services. `None` means AWS.
    pub endpoint: Option<String>,
    /// Base URL prepended to keys for stable public links, when the bucket
    /// (or a CDN in front of it) serves objects publicly.
    pub public_base_url: Option<String>,
}

/// [`ObjectStorage`] backed by an S3 bucket.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: Option<String>,
}

impl S3ObjectStore {
    /// Build a client from the ambient AWS credential chain plus the given
    /// bucket settings.
    pub async fn new(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        let mut s3_builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if config.endpoint.is_some() {
            // MinIO and friends route by path, not virtual host.
            s3_builder = s3_builder.force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_builder.build()),
            bucket: config.bucket,
            public_base_url: config.public_base_url,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;
        tracing::debug!(%key, bucket = %self.bucket, "Stored object");
        Ok(())
    }

    async fn presigned_url(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }

    fn public_url(&self, key: &str) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;
        tracing::debug!(%key, bucket = %self.bucket, "Deleted object");
        Ok(())
    }
}
