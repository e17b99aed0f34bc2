//! Per-language keyword sets and message templates.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::intent::Intent;
use crate::text_utils::normalize;

mod builtin;

/// Profile used whenever the requested language is unknown.
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    pub add: Vec<String>,
    pub remove: Vec<String>,
    pub search: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    pub added: String,
    pub removed: String,
    pub increased: String,
    pub decreased: String,
    pub not_found: String,
    pub found: String,
    pub help: String,
    pub substitute_for: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    pub keywords: Keywords,
    /// Phrases such as "to my list" dropped from the item phrase.
    #[serde(default)]
    pub fillers: Vec<String>,
    /// Markers introducing a price ceiling ("under", "below").
    #[serde(default)]
    pub price_below: Vec<String>,
    pub messages: Messages,
}

impl LanguageProfile {
    pub fn keywords_for(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::Add => &self.keywords.add,
            Intent::Remove => &self.keywords.remove,
            Intent::Search => &self.keywords.search,
            Intent::Unknown => &[],
        }
    }

    /// Normalize every phrase so matching can work on normalized text. Phrases
    /// that normalize to nothing would match any input and are dropped.
    fn normalized(mut self) -> Self {
        for set in [
            &mut self.keywords.add,
            &mut self.keywords.remove,
            &mut self.keywords.search,
            &mut self.fillers,
            &mut self.price_below,
        ] {
            *set = set
                .iter()
                .map(|p| normalize(p))
                .filter(|p| !p.is_empty())
                .collect();
        }
        self
    }
}

/// Registry of language profiles keyed by language code.
#[derive(Debug, Clone)]
pub struct Languages {
    profiles: HashMap<String, LanguageProfile>,
    fallback: LanguageProfile,
}

impl Languages {
    /// The profiles shipped with the crate: en, es, fr and hi.
    pub fn builtin() -> Self {
        let english = builtin::english().normalized();
        let mut profiles = HashMap::new();
        profiles.insert("en".to_string(), english.clone());
        profiles.insert("es".to_string(), builtin::spanish().normalized());
        profiles.insert("fr".to_string(), builtin::french().normalized());
        profiles.insert("hi".to_string(), builtin::hindi().normalized());
        Self {
            profiles,
            fallback: english,
        }
    }

    /// Add or replace profiles. Replacing "en" also replaces the fallback.
    pub fn with_overrides(mut self, overrides: HashMap<String, LanguageProfile>) -> Self {
        for (code, profile) in overrides {
            let code = normalize(&code);
            let profile = profile.normalized();
            debug!(code = %code, "Registering language profile");
            if code == DEFAULT_LANGUAGE {
                self.fallback = profile.clone();
            }
            self.profiles.insert(code, profile);
        }
        self
    }

    /// Built-in profiles extended by a JSON object of `{code: profile}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            what: "language profiles",
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: HashMap<String, LanguageProfile> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                what: "language profiles",
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), count = overrides.len(), "Loaded language profiles");
        Ok(Self::builtin().with_overrides(overrides))
    }

    /// Profile for `code`. Region subtags are ignored ("fr-CA" uses "fr") and
    /// unknown codes get the default profile.
    pub fn get(&self, code: &str) -> &LanguageProfile {
        let code = normalize(code);
        if let Some(profile) = self.profiles.get(&code) {
            return profile;
        }
        code.split(['-', '_'])
            .next()
            .and_then(|primary| self.profiles.get(primary))
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.profiles.contains_key(&normalize(code))
    }
}

impl Default for Languages {
    fn default() -> Self {
        Self::builtin()
    }
}
