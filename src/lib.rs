use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

pub mod ai;
pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod intent;
pub mod language;
pub mod list;
pub mod list_manager;
pub mod service;
pub mod store;
pub mod text_utils;


pub use catalog::{CatalogIndex, Product};
pub use config::Config;
pub use error::{CommandError, ConfigError, StoreError};
pub use intent::{Extraction, Intent};
pub use language::{LanguageProfile, Languages};
pub use list::ShoppingListItem;
pub use list_manager::ListManager;
pub use service::{CommandOptions, CommandResult, CommandService, Outcome};
pub use store::ListStore;
pub use text_utils::normalize;

// ──────────────────────────────────────────────────────────────
// Application setup
// ──────────────────────────────────────────────────────────────

/// Build the command service and its collaborators from `config`.
pub async fn build_state(config: &Config) -> Result<api::AppState> {
    let products = catalog::load_products(&config.catalog_path)?;
    let catalog = Arc::new(CatalogIndex::build(products));

    let languages = match &config.languages_path {
        Some(path) => Languages::from_json_file(path)?,
        None => Languages::builtin(),
    };

    let store = ListStore::open(&config.list_store)
        .await
        .with_context(|| format!("opening list store {}", config.list_store))?;
    let lists = ListManager::load(store).await;

    let service = CommandService::new(
        Arc::clone(&catalog),
        Arc::new(languages),
        lists,
        config.command,
    );
    let suggester = ai::Suggester::new(catalog, config.suggest.clone());
    tracing::info!(
        remote_suggestions = suggester.uses_model(),
        message_style = ?config.command.message_style,
        unknown_intent = ?config.command.unknown_intent,
        "Command service ready"
    );
    Ok(api::AppState::new(Arc::new(service), suggester))
}

pub async fn run() -> Result<()> {
    // Load .env first so RUST_LOG from it applies
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_current_env();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting shopping list backend...");

    let state = build_state(&config).await?;
    let app = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
