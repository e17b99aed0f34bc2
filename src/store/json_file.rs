use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::error::StorageFailure;
use crate::list::ShoppingListItem;

/// Shopping list stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// A missing file is an empty list; anything unreadable is an error.
    #[instrument(level = "trace", skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<ShoppingListItem>, StorageFailure> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No stored list yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let items: Vec<ShoppingListItem> = serde_json::from_slice(&raw)?;
        trace!(count = items.len(), "Read stored list");
        Ok(items)
    }

    /// Write the whole list to a sibling temp file, then rename it over the
    /// target so the file is never left half written.
    #[instrument(level = "trace", skip(self, items), fields(path = %self.path.display()))]
    pub async fn save(&self, items: &[ShoppingListItem]) -> Result<(), StorageFailure> {
        let body = serde_json::to_vec_pretty(items)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &body).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        trace!(count = items.len(), bytes = body.len(), "Saved list");
        Ok(())
    }
}
