use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::list::{Added, Removed, ShoppingList, ShoppingListItem};
use crate::store::ListStore;

/// Owner of the shared shopping list.
///
/// All mutations run under one lock and write the full list through to the
/// store before they become visible. A failed save leaves the in-memory list
/// as it was.
#[derive(Debug)]
pub struct ListManager {
    list: Mutex<ShoppingList>,
    store: ListStore,
}

impl ListManager {
    /// Load the stored list. Unreadable storage starts an empty list.
    pub async fn load(store: ListStore) -> Self {
        let list = match store.load().await {
            Ok(items) => ShoppingList::from_items(items),
            Err(err) => {
                warn!(error = %err, details = ?err, "Stored list unreadable; starting empty");
                ShoppingList::new()
            }
        };
        info!(items = list.len(), "Shopping list loaded");
        Self {
            list: Mutex::new(list),
            store,
        }
    }

    pub async fn snapshot(&self) -> Vec<ShoppingListItem> {
        self.list.lock().await.items().to_vec()
    }

    pub async fn add(
        &self,
        name: &str,
        quantity: i64,
        category: &str,
        price: f64,
    ) -> Result<(Added, Vec<ShoppingListItem>), StoreError> {
        self.mutate(|list| list.add(name, quantity, category, price))
            .await
    }

    pub async fn remove(
        &self,
        name: &str,
        quantity: i64,
    ) -> Result<(Removed, Vec<ShoppingListItem>), StoreError> {
        self.mutate(|list| list.remove(name, quantity)).await
    }

    pub async fn set_quantity(
        &self,
        name: &str,
        quantity: i64,
    ) -> Result<(bool, Vec<ShoppingListItem>), StoreError> {
        self.mutate(|list| list.set_quantity(name, quantity)).await
    }

    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut ShoppingList) -> T,
    ) -> Result<(T, Vec<ShoppingListItem>), StoreError> {
        let mut guard = self.list.lock().await;
        let mut draft = guard.clone();
        let value = change(&mut draft);
        if draft != *guard {
            self.store.save(draft.items()).await?;
            *guard = draft;
            tracing::debug!(items = guard.len(), "Shopping list saved");
        }
        Ok((value, guard.items().to_vec()))
    }
}
