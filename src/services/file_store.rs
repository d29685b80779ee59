use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::error::{Error, Result};

/// Route under which stored files are served; locators are `{UPLOADS_ROUTE}/{key}`.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Persists uploaded bytes under a key and hands back a locator for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, key: &str, data: Bytes) -> Result<String>;
}

/// Builds the `{user_id}_{filename}` key, keeping only the last path segment
/// of the client-supplied name.
pub fn storage_key(user_id: i64, original_filename: &str) -> Option<String> {
    let name = original_filename.rsplit(['/', '\\']).next()?.trim();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(format!("{}_{}", user_id, name))
}

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, key: &str, data: Bytes) -> Result<String> {
        fs::create_dir_all(&self.root).await?;

        let path = self.root.join(key);
        fs::write(&path, &data).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "failed to write upload");
            Error::Io(e)
        })?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "stored upload");
        Ok(format!("{}/{}", UPLOADS_ROUTE, key))
    }
}
