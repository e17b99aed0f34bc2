//! Error kinds surfaced by the command pipeline and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Static configuration (catalog or language data) could not be loaded.
/// Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {what} from {}: {source}", path.display())]
    Read {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what} in {}: {source}", path.display())]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Low-level failure of the durable list representation.
#[derive(Debug, Error)]
pub enum StorageFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Stored list missing or corrupt. Recovered by starting empty.
    #[error("could not read the stored shopping list")]
    Read(#[source] StorageFailure),
    /// The mutation could not be made durable.
    #[error("could not save the shopping list")]
    Write(#[source] StorageFailure),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("shopping list change was not saved")]
    Persistence(#[from] StoreError),
}
