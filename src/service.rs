use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::catalog::{CatalogIndex, Product};
use crate::error::CommandError;
use crate::intent::{extract_as, extract_with_profile, Intent};
use crate::language::{LanguageProfile, Languages};
use crate::list::{Removed, ShoppingListItem};
use crate::list_manager::ListManager;
use crate::text_utils::{fill_template, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    NotFound,
    NoItemSpecified,
    SearchResults,
    /// No intent was recognised and the caller chose not to guess one.
    Unrecognized,
}

/// Which templates describe a change to an entry that was already listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageStyle {
    /// `added` and `removed` for every change.
    #[default]
    Simple,
    /// `increased` and `decreased` when the entry existed before and after.
    Detailed,
}

impl MessageStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "simple" => Some(Self::Simple),
            "detailed" => Some(Self::Detailed),
            _ => None,
        }
    }
}

/// What to do with commands that match no intent keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownIntentPolicy {
    /// Leave the list alone and answer with the help text.
    #[default]
    Help,
    Search,
    Add,
}

impl UnknownIntentPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize(value).as_str() {
            "help" | "none" => Some(Self::Help),
            "search" => Some(Self::Search),
            "add" => Some(Self::Add),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub message_style: MessageStyle,
    pub unknown_intent: UnknownIntentPolicy,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub message: String,
    pub outcome: Outcome,
    pub intent: Intent,
    pub shopping_list: Vec<ShoppingListItem>,
    pub search_results: Vec<Product>,
    /// Left empty here; filled by the suggestion collaborator.
    pub suggestions: Vec<String>,
}

/// Turns free-form commands into shopping list changes.
pub struct CommandService {
    catalog: Arc<CatalogIndex>,
    languages: Arc<Languages>,
    lists: ListManager,
    options: CommandOptions,
}

impl CommandService {
    pub fn new(
        catalog: Arc<CatalogIndex>,
        languages: Arc<Languages>,
        lists: ListManager,
        options: CommandOptions,
    ) -> Self {
        Self {
            catalog,
            languages,
            lists,
            options,
        }
    }

    pub fn catalog(&self) -> &Arc<CatalogIndex> {
        &self.catalog
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    pub fn lists(&self) -> &ListManager {
        &self.lists
    }

    /// Classify, resolve and apply one command.
    #[instrument(level = "debug", skip(self))]
    pub async fn resolve_command(
        &self,
        raw: &str,
        language_code: &str,
    ) -> Result<CommandResult, CommandError> {
        let profile = self.languages.get(language_code);
        if normalize(raw).is_empty() {
            return Ok(self.unrecognized(profile).await);
        }

        let mut extraction = extract_with_profile(profile, raw);
        if extraction.intent == Intent::Unknown {
            debug!(policy = ?self.options.unknown_intent, "No intent keyword found");
            extraction = match self.options.unknown_intent {
                UnknownIntentPolicy::Help => return Ok(self.unrecognized(profile).await),
                UnknownIntentPolicy::Search => extract_as(profile, raw, Intent::Search),
                UnknownIntentPolicy::Add => extract_as(profile, raw, Intent::Add),
            };
        }

        match extraction.intent {
            Intent::Add => {
                self.add(profile, &extraction.item_phrase, extraction.quantity)
                    .await
            }
            Intent::Remove => {
                self.remove(profile, &extraction.item_phrase, extraction.quantity)
                    .await
            }
            Intent::Search => Ok(self
                .search(profile, &extraction.item_phrase, extraction.max_price)
                .await),
            Intent::Unknown => Ok(self.unrecognized(profile).await),
        }
    }

    pub async fn add(
        &self,
        profile: &LanguageProfile,
        phrase: &str,
        quantity: i64,
    ) -> Result<CommandResult, CommandError> {
        let resolution = self.catalog.resolve(phrase);
        if resolution.is_empty() {
            return Ok(self.no_item(profile, Intent::Add, phrase).await);
        }
        let canonical = resolution.canonical;
        let (category, price) = self.catalog.category_and_price(&canonical);
        let (added, items) = self
            .lists
            .add(&canonical, quantity, &category, price)
            .await?;
        info!(
            item = %canonical,
            quantity,
            total = added.total,
            matched = ?resolution.kind,
            "Added item"
        );

        let messages = &profile.messages;
        let message = match (self.options.message_style, added.previous) {
            (MessageStyle::Detailed, Some(_)) => fill_template(
                &messages.increased,
                &[
                    ("item", canonical.clone()),
                    ("quantity", quantity.to_string()),
                    ("total", added.total.to_string()),
                ],
            ),
            _ => fill_template(
                &messages.added,
                &[
                    ("item", canonical.clone()),
                    ("quantity", added.total.to_string()),
                ],
            ),
        };
        Ok(result(message, Outcome::Applied, Intent::Add, items))
    }

    pub async fn remove(
        &self,
        profile: &LanguageProfile,
        phrase: &str,
        quantity: i64,
    ) -> Result<CommandResult, CommandError> {
        let resolution = self.catalog.resolve(phrase);
        if resolution.is_empty() {
            return Ok(self.no_item(profile, Intent::Remove, phrase).await);
        }
        let canonical = resolution.canonical;
        let (removed, items) = self.lists.remove(&canonical, quantity).await?;

        let messages = &profile.messages;
        let item = ("item", canonical.clone());
        let (message, outcome) = match removed {
            Removed::NotFound => {
                debug!(item = %canonical, "Item to remove is not listed");
                (
                    fill_template(&messages.not_found, &[item]),
                    Outcome::NotFound,
                )
            }
            Removed::Decreased { remaining }
                if self.options.message_style == MessageStyle::Detailed =>
            {
                info!(item = %canonical, quantity, remaining, "Decreased item");
                (
                    fill_template(
                        &messages.decreased,
                        &[
                            item,
                            ("quantity", quantity.to_string()),
                            ("total", remaining.to_string()),
                        ],
                    ),
                    Outcome::Applied,
                )
            }
            Removed::Decreased { .. } | Removed::Deleted => {
                info!(item = %canonical, quantity, outcome = ?removed, "Removed item");
                (fill_template(&messages.removed, &[item]), Outcome::Applied)
            }
        };
        Ok(result(message, outcome, Intent::Remove, items))
    }

    /// Read-only catalog search; the shopping list is returned untouched.
    pub async fn search(
        &self,
        profile: &LanguageProfile,
        query: &str,
        max_price: Option<f64>,
    ) -> CommandResult {
        let results = self.catalog.search(query, max_price);
        debug!(query, ?max_price, count = results.len(), "Catalog search");
        let message = fill_template(
            &profile.messages.found,
            &[("count", results.len().to_string())],
        );
        let mut out = result(
            message,
            Outcome::SearchResults,
            Intent::Search,
            self.lists.snapshot().await,
        );
        out.search_results = results;
        out
    }

    /// Overwrite the quantity of a listed item; zero or less deletes it.
    pub async fn set_quantity(
        &self,
        name: &str,
        quantity: i64,
    ) -> Result<(bool, Vec<ShoppingListItem>), CommandError> {
        let (found, items) = self.lists.set_quantity(name, quantity).await?;
        info!(item = %name, quantity, found, "Set item quantity");
        Ok((found, items))
    }

    async fn no_item(
        &self,
        profile: &LanguageProfile,
        intent: Intent,
        phrase: &str,
    ) -> CommandResult {
        debug!(?intent, "Command names no item");
        let message = fill_template(
            &profile.messages.not_found,
            &[("item", phrase.to_string())],
        );
        result(
            message,
            Outcome::NoItemSpecified,
            intent,
            self.lists.snapshot().await,
        )
    }

    async fn unrecognized(&self, profile: &LanguageProfile) -> CommandResult {
        result(
            profile.messages.help.clone(),
            Outcome::Unrecognized,
            Intent::Unknown,
            self.lists.snapshot().await,
        )
    }
}

fn result(
    message: String,
    outcome: Outcome,
    intent: Intent,
    shopping_list: Vec<ShoppingListItem>,
) -> CommandResult {
    CommandResult {
        message,
        outcome,
        intent,
        shopping_list,
        search_results: Vec::new(),
        suggestions: Vec::new(),
    }
}
