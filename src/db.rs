// Database related types and functions

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

pub mod list_items;

/// SQLite pool holding the `shopping_list` table. Queries live in the
/// submodules as further `impl Database` blocks.
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

pub fn prepare_sqlite_url(url: &str) -> String {
    if url.starts_with("sqlite:") && !url.contains("mode=") && !url.contains(":memory:") {
        if url.contains('?') {
            format!("{url}&mode=rwc")
        } else {
            format!("{url}?mode=rwc")
        }
    } else {
        url.to_string()
    }
}

pub async fn connect_db(db_url: &str, max_connections: u32) -> Result<Pool<Sqlite>> {
    tracing::debug!(db_url = %db_url, max_connections, "Connecting to database");
    Ok(SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?)
}

/// Connect and bring the schema up to date with the embedded migrations.
pub async fn open_database(db_url: &str) -> Result<Database> {
    let db_url = prepare_sqlite_url(db_url);
    // An in-memory database only lives as long as its single connection.
    let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };
    let pool = connect_db(&db_url, max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(db_url = %db_url, "Database ready");
    Ok(Database::new(pool))
}
