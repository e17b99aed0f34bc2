use std::sync::Arc;

use crate::catalog::{CatalogIndex, Product};
use crate::db::{open_database, Database};
use crate::language::Languages;
use crate::list_manager::ListManager;
use crate::service::{CommandOptions, CommandService};
use crate::store::ListStore;

/// Fresh in-memory database with migrations applied.
pub async fn init_test_db() -> Database {
    open_database("sqlite::memory:")
        .await
        .expect("failed to create in-memory database")
}

pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product::new(["milk", "dairy milk"], "Dairy", 2.5),
        Product::new(["bread", "baguette", "pain", "pan"], "Bakery", 1.8),
        Product::new(["eggs", "egg", "huevos"], "Dairy", 3.0),
        Product::new(["cheese", "fromage", "queso"], "Dairy", 6.0),
        Product::new(["apples", "apple", "pommes"], "Produce", 4.2),
        Product::new(["banana", "bananas"], "Produce", 0.5),
        Product::new(["chicken breast", "chicken"], "Meat", 8.9),
        Product::new(["olive oil"], "Pantry", 12.0),
    ]
}

/// Service over the given catalog with built-in languages and an in-memory
/// SQLite list store.
pub async fn service_with(products: Vec<Product>, options: CommandOptions) -> CommandService {
    let lists = ListManager::load(ListStore::Sqlite(init_test_db().await)).await;
    CommandService::new(
        Arc::new(CatalogIndex::build(products)),
        Arc::new(Languages::builtin()),
        lists,
        options,
    )
}
