use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};
use utils::path::object_path_for;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is not configured")]
    NotConfigured,
    #[error("storage backend returned {0}")]
    Upstream(reqwest::StatusCode),
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage REST root, e.g. `https://xyz.supabase.co/storage/v1`.
    pub base_url: String,
    pub service_key: String,
}

/// Client for a Supabase-compatible object store. Unconfigured deployments get
/// a disabled client whose operations fail with `NotConfigured`.
#[derive(Clone)]
pub struct StorageService {
    config: Option<StorageConfig>,
    client: Client,
}

pub struct UploadedObject {
    pub path: String,
    pub public_url: String,
}

impl StorageService {
    pub fn new(config: Option<StorageConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Public download URL for an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String, StorageError> {
        let config = self.config.as_ref().ok_or(StorageError::NotConfigured)?;
        Ok(format!(
            "{}/object/public/{}/{}",
            config.base_url.trim_end_matches('/'),
            bucket,
            path
        ))
    }

    /// Upload `bytes` under `{entity_id}/{timestamp}_{file_name}` and return
    /// the object path plus its public URL.
    pub async fn upload(
        &self,
        bucket: &str,
        entity_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedObject, StorageError> {
        let config = self.config.as_ref().ok_or(StorageError::NotConfigured)?;
        let path = object_path_for(entity_id, file_name);
        let content_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();

        debug!(bucket, %path, size = bytes.len(), "uploading object");
        let response = self
            .client
            .post(format!(
                "{}/object/{}/{}",
                config.base_url.trim_end_matches('/'),
                bucket,
                path
            ))
            .bearer_auth(&config.service_key)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Upstream(response.status()));
        }

        let public_url = self.public_url(bucket, &path)?;
        info!(bucket, %path, "object uploaded");
        Ok(UploadedObject { path, public_url })
    }

    pub async fn delete(&self, bucket: &str, path: &str) -> Result<(), StorageError> {
        let config = self.config.as_ref().ok_or(StorageError::NotConfigured)?;

        let response = self
            .client
            .delete(format!(
                "{}/object/{}/{}",
                config.base_url.trim_end_matches('/'),
                bucket,
                path
            ))
            .bearer_auth(&config.service_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Upstream(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> StorageService {
        StorageService::new(Some(StorageConfig {
            base_url: "https://store.example.com/storage/v1/".to_string(),
            service_key: "key".to_string(),
        }))
    }

    #[test]
    fn public_url_points_at_the_public_object_route() {
        let url = configured().public_url("invoices", "abc/123_qr.png").unwrap();
        assert_eq!(
            url,
            "https://store.example.com/storage/v1/object/public/invoices/abc/123_qr.png"
        );
    }

    #[tokio::test]
    async fn disabled_storage_refuses_uploads() {
        let storage = StorageService::disabled();
        let result = storage.upload("invoices", "abc", "qr.png", vec![1, 2, 3]).await;
        assert!(matches!(result, Err(StorageError::NotConfigured)));
    }
}
