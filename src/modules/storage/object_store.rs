use async_trait::async_trait;

use crate::core::error::Result;

/// Blob storage addressed by path
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` at `path`, replacing anything already there
    async fn upload(&self, path: &str, data: &[u8], content_type: &str) -> Result<()>;

    async fn delete(&self, path: &str) -> Result<()>;
}
