use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub const RECEIPTS_BUCKET: &str = "receipts";
pub const CLIENT_DOCUMENTS_BUCKET: &str = "client-documents";
pub const VIRTUAL_TOURS_BUCKET: &str = "virtual-tours";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Storage rejected upload of {key}: HTTP {status}")]
    Rejected { key: String, status: u16 },
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub public_url: String,
}

/// Blob store seam. The production implementation talks to Supabase Storage;
/// tests swap in an in-memory fake.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;
}

#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseStorage {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, bucket, key)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let url = format!("{}/object/{}/{}", self.endpoint, bucket, key);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(StoredObject {
            key: key.to_string(),
            public_url: self.public_url(bucket, key),
        })
    }
}

/// Object key for an upload owned by `owner_id` (a client or property id).
/// A fresh UUID per upload keeps keys from clobbering each other even when
/// two files share a name.
pub fn object_key(owner_id: Uuid, file_name: &str) -> String {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    format!("{}/{}.{}", owner_id, Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_keeps_extension() {
        let owner = Uuid::new_v4();
        let key = object_key(owner, "receipt-AB12CD34.pdf");
        assert!(key.starts_with(&format!("{}/", owner)));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn test_object_key_defaults_extension() {
        let key = object_key(Uuid::new_v4(), "README");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn test_object_keys_never_collide_on_same_name() {
        let owner = Uuid::new_v4();
        assert_ne!(object_key(owner, "deed.pdf"), object_key(owner, "deed.pdf"));
    }

    #[test]
    fn test_public_url_shape() {
        let storage = SupabaseStorage::new("http://localhost:54321/storage/v1/", "key");
        assert_eq!(
            storage.public_url("receipts", "abc/def.pdf"),
            "http://localhost:54321/storage/v1/object/public/receipts/abc/def.pdf"
        );
    }
}
