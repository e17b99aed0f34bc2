use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::ai::config::SuggestConfig;
use crate::service::{CommandOptions, MessageStyle, UnknownIntentPolicy};

pub const DEFAULT_CATALOG_PATH: &str = "data/products.json";
pub const DEFAULT_LIST_STORE: &str = "data/shoppinglist.json";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub languages_path: Option<PathBuf>,
    /// JSON file path or `sqlite:` URL.
    pub list_store: String,
    pub port: u16,
    pub command: CommandOptions,
    pub suggest: Option<SuggestConfig>,
}

impl Config {
    /// Read settings from the environment, after loading `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_current_env()
    }

    /// Like [`Config::from_env`] but without touching `.env`.
    pub fn from_current_env() -> Self {
        let catalog_path = env::var("CATALOG_PATH")
            .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
            .into();
        let languages_path = env::var("LANGUAGES_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let list_store = env::var("LIST_STORE").unwrap_or_else(|_| DEFAULT_LIST_STORE.to_string());
        let port = parse_setting("PORT", DEFAULT_PORT, |v| v.trim().parse().ok());
        let command = CommandOptions {
            message_style: parse_setting("MESSAGE_STYLE", MessageStyle::default(), MessageStyle::parse),
            unknown_intent: parse_setting(
                "UNKNOWN_INTENT",
                UnknownIntentPolicy::default(),
                UnknownIntentPolicy::parse,
            ),
        };

        Self {
            catalog_path,
            languages_path,
            list_store,
            port,
            command,
            suggest: SuggestConfig::from_env(),
        }
    }
}

/// Parse an optional variable, keeping `default` when it is unset or invalid.
fn parse_setting<T: Copy + std::fmt::Debug>(
    name: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match parse(&raw) {
        Some(value) => value,
        None => {
            warn!(variable = name, value = %raw, ?default, "Invalid setting; using default");
            default
        }
    }
}
