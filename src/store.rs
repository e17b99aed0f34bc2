// Durable representation of the shopping list

use anyhow::Result;

use crate::db::{open_database, Database};
use crate::error::StoreError;
use crate::list::ShoppingListItem;

pub mod json_file;

pub use json_file::JsonFileStore;

/// Where the shopping list is persisted. Every save writes the whole list.
#[derive(Debug, Clone)]
pub enum ListStore {
    JsonFile(JsonFileStore),
    Sqlite(Database),
}

impl ListStore {
    /// Open a store from a location string: a `sqlite:` URL selects the
    /// SQLite store, anything else is a JSON file path.
    pub async fn open(location: &str) -> Result<Self> {
        if location.starts_with("sqlite:") {
            return Ok(Self::Sqlite(open_database(location).await?));
        }
        let store = JsonFileStore::new(location);
        if let Some(parent) = store.path().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tracing::info!(path = %store.path().display(), "Using JSON list store");
        Ok(Self::JsonFile(store))
    }

    pub async fn load(&self) -> Result<Vec<ShoppingListItem>, StoreError> {
        match self {
            Self::JsonFile(store) => store.load().await.map_err(StoreError::Read),
            Self::Sqlite(db) => db
                .load_list()
                .await
                .map_err(|e| StoreError::Read(e.into())),
        }
    }

    pub async fn save(&self, items: &[ShoppingListItem]) -> Result<(), StoreError> {
        match self {
            Self::JsonFile(store) => store.save(items).await.map_err(StoreError::Write),
            Self::Sqlite(db) => db
                .replace_list(items)
                .await
                .map_err(|e| StoreError::Write(e.into())),
        }
    }
}
