use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::DEFAULT_CATEGORY;
use crate::text_utils::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub price: f64,
}

fn default_quantity() -> i64 {
    1
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Result of adding to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Added {
    /// Quantity before the add, if the item was already listed.
    pub previous: Option<i64>,
    /// Quantity after the add.
    pub total: i64,
}

/// Result of removing from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    NotFound,
    /// The entry is still listed with the remaining quantity.
    Decreased { remaining: i64 },
    /// The entry was deleted.
    Deleted,
}

/// Ordered shopping list keyed by normalized item name.
///
/// Invariants: at most one entry per normalized name and every entry has a
/// positive quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from stored entries, dropping duplicates (first wins) and
    /// entries without a positive quantity.
    pub fn from_items(items: Vec<ShoppingListItem>) -> Self {
        let total = items.len();
        let mut list = Self::new();
        for item in items {
            if item.quantity <= 0 || list.position(&item.name).is_some() {
                continue;
            }
            list.items.push(item);
        }
        if list.items.len() != total {
            debug!(
                dropped = total - list.items.len(),
                "Dropped invalid stored list entries"
            );
        }
        list
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        self.items.iter().position(|i| normalize(&i.name) == key)
    }

    pub fn get(&self, name: &str) -> Option<&ShoppingListItem> {
        self.position(name).map(|i| &self.items[i])
    }

    /// Add `quantity` of an item. Quantities accumulate on an existing entry
    /// whose category and price are refreshed.
    pub fn add(&mut self, name: &str, quantity: i64, category: &str, price: f64) -> Added {
        match self.position(name) {
            Some(pos) => {
                let item = &mut self.items[pos];
                let previous = item.quantity;
                item.quantity = previous.saturating_add(quantity);
                item.category = category.to_string();
                item.price = price;
                let total = item.quantity;
                if total <= 0 {
                    self.items.remove(pos);
                }
                Added {
                    previous: Some(previous),
                    total,
                }
            }
            None => {
                if quantity > 0 {
                    self.items.push(ShoppingListItem {
                        name: name.to_string(),
                        quantity,
                        category: category.to_string(),
                        price,
                    });
                }
                Added {
                    previous: None,
                    total: quantity,
                }
            }
        }
    }

    /// Take `quantity` of an item off the list, deleting the entry once
    /// nothing is left.
    pub fn remove(&mut self, name: &str, quantity: i64) -> Removed {
        let Some(pos) = self.position(name) else {
            return Removed::NotFound;
        };
        let item = &mut self.items[pos];
        item.quantity = item.quantity.saturating_sub(quantity);
        if item.quantity <= 0 {
            self.items.remove(pos);
            Removed::Deleted
        } else {
            Removed::Decreased {
                remaining: item.quantity,
            }
        }
    }

    /// Overwrite an entry's quantity; zero or less deletes it. Returns false
    /// when the item is not listed.
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> bool {
        let Some(pos) = self.position(name) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = quantity;
        }
        true
    }
}
