use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Text blobs kept next to plan rows. A container maps to a bucket and a key
/// to an object name.
#[automock]
#[async_trait]
pub trait BlobStorage {
    async fn upload(
        &self,
        container: String,
        text: String,
        content_type: String,
        key: String,
    ) -> Result<()>;

    /// A missing blob reads as an empty string.
    async fn fetch(&self, container: String, key: String) -> Result<String>;

    /// Copies the blob to its new key and removes the old one. Returns `false`
    /// when there was nothing to rename.
    async fn rename(&self, container: String, old_key: String, new_key: String) -> Result<bool>;

    async fn delete(&self, container: String, key: String) -> Result<bool>;
}
