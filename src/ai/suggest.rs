use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::ai::config::SuggestConfig;
use crate::ai::gemini::GeminiClient;
use crate::catalog::{CatalogIndex, Product};
use crate::list::ShoppingListItem;
use crate::text_utils::normalize;

pub const SUGGESTION_LIMIT: usize = 6;

/// Canonical catalog names not yet on the list, in catalog order.
pub fn local_suggestions(
    catalog: &CatalogIndex,
    list: &[ShoppingListItem],
    limit: usize,
) -> Vec<String> {
    let listed: HashSet<String> = list.iter().map(|item| normalize(&item.name)).collect();
    catalog
        .canonical_names()
        .filter(|name| !listed.contains(*name))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Produces suggestions, preferring the model when one is configured.
#[derive(Clone, Debug)]
pub struct Suggester {
    catalog: Arc<CatalogIndex>,
    gemini: Option<GeminiClient>,
}

impl Suggester {
    pub fn new(catalog: Arc<CatalogIndex>, config: Option<SuggestConfig>) -> Self {
        Self {
            catalog,
            gemini: config.map(GeminiClient::new),
        }
    }

    /// Only ever uses the local picker.
    pub fn local(catalog: Arc<CatalogIndex>) -> Self {
        Self::new(catalog, None)
    }

    pub fn uses_model(&self) -> bool {
        self.gemini.is_some()
    }

    /// Never fails: any model error falls back to the local picker.
    pub async fn suggest(
        &self,
        list: &[ShoppingListItem],
        search_results: &[Product],
    ) -> Vec<String> {
        if let Some(gemini) = &self.gemini {
            match gemini.suggest(list, search_results).await {
                Ok(names) => return names,
                Err(err) => {
                    let reason: String = err.to_string().chars().take(200).collect();
                    warn!(model = gemini.model(), error = %reason, "Model suggestions failed; using local picks");
                }
            }
        }
        let picks = local_suggestions(&self.catalog, list, SUGGESTION_LIMIT);
        debug!(count = picks.len(), "Local suggestions");
        picks
    }
}
