use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Other";

/// A catalog entry. The first alias is the product's canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub names: Vec<String>,
    /// Single-name form accepted for older catalog files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub price: f64,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Product {
    pub fn new<I, S>(names: I, category: &str, price: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            name: None,
            category: category.to_string(),
            price,
        }
    }

    /// All configured aliases, canonical first.
    pub fn aliases(&self) -> Vec<&str> {
        if self.names.is_empty() {
            self.name.as_deref().into_iter().collect()
        } else {
            self.names.iter().map(String::as_str).collect()
        }
    }

    pub fn category_or_default(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }
}
