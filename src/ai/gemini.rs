use anyhow::{anyhow, Result};
use tracing::{debug, instrument};

use crate::ai::common::{build_content_request, candidate_text, parse_json_lenient, request_text, suggestion_names};
use crate::ai::config::SuggestConfig;
use crate::ai::prompts::suggestion_prompt;
use crate::catalog::Product;
use crate::list::ShoppingListItem;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Search results beyond this many are left out of the prompt.
const PROMPT_RESULTS: usize = 6;

/// Client for the Gemini generateContent API.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: SuggestConfig,
}

impl GeminiClient {
    pub fn new(config: SuggestConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_BASE_URL)
            .trim_end_matches('/');
        format!("{base}/v1beta/models/{}:generateContent", self.config.model)
    }

    /// Ask the model for items to add next.
    #[instrument(level = "trace", skip(self, list, search_results), fields(model = %self.config.model))]
    pub async fn suggest(
        &self,
        list: &[ShoppingListItem],
        search_results: &[Product],
    ) -> Result<Vec<String>> {
        let list_json = serde_json::to_string(list)?;
        let results_json = if search_results.is_empty() {
            None
        } else {
            let shown = &search_results[..search_results.len().min(PROMPT_RESULTS)];
            Some(serde_json::to_string(shown)?)
        };
        let prompt = suggestion_prompt(&list_json, results_json.as_deref());
        let body = build_content_request(&prompt);

        let raw = request_text(&self.http, &self.endpoint(), &self.config.api_key, &body).await?;
        let value = parse_json_lenient(&candidate_text(&raw))?;
        let names = suggestion_names(&value)
            .ok_or_else(|| anyhow!("model reply has no suggestions array"))?;
        debug!(count = names.len(), "Received model suggestions");
        Ok(names)
    }
}
