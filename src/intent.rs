use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::language::{LanguageProfile, Languages};
use crate::text_utils::{normalize, remove_phrases};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").expect("valid digit pattern"));

const NUMBER: &str = r"([0-9]+(?:[.,][0-9]+)?)";
const CURRENCY: &str = r"[$€£₹]?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Add,
    Remove,
    Search,
    Unknown,
}

impl Intent {
    /// Keyword sets are checked in this order; the first set with a keyword
    /// contained in the command wins.
    pub const PRECEDENCE: [Intent; 3] = [Intent::Add, Intent::Remove, Intent::Search];
}

/// What a command asks for, before any catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub intent: Intent,
    pub quantity: i64,
    /// Residual text naming the item (or the search query).
    pub item_phrase: String,
    /// Price ceiling parsed from an "under 5" style clause. Search only.
    pub max_price: Option<f64>,
}

/// Classify a raw command using the profile for `language_code`. Unknown
/// codes use the default profile.
pub fn extract(languages: &Languages, raw: &str, language_code: &str) -> Extraction {
    extract_with_profile(languages.get(language_code), raw)
}

pub fn extract_with_profile(profile: &LanguageProfile, raw: &str) -> Extraction {
    let text = normalize(raw);
    let intent = classify(profile, &text);
    trace!(?intent, text = %text, "Classified command");
    extract_as(profile, raw, intent)
}

/// Detect the intent of normalized text by keyword containment.
pub fn classify(profile: &LanguageProfile, text: &str) -> Intent {
    Intent::PRECEDENCE
        .into_iter()
        .find(|&intent| {
            profile
                .keywords_for(intent)
                .iter()
                .any(|keyword| text.contains(keyword.as_str()))
        })
        .unwrap_or(Intent::Unknown)
}

/// Build the extraction for a command as if it had the given intent. Callers
/// that pick a fallback for [`Intent::Unknown`] use this to reinterpret text.
pub fn extract_as(profile: &LanguageProfile, raw: &str, intent: Intent) -> Extraction {
    let text = normalize(raw);
    let quantity = parse_quantity(&text);

    let mut working = text.clone();
    let mut max_price = None;
    if intent == Intent::Search {
        if let Some((price, stripped)) = take_price_ceiling(profile, &working) {
            max_price = Some(price);
            working = stripped;
        }
    }

    if intent != Intent::Unknown {
        let phrases: Vec<String> = profile
            .keywords_for(intent)
            .iter()
            .chain(profile.fillers.iter())
            .cloned()
            .collect();
        working = remove_phrases(&working, &phrases);
    }

    let item_phrase = normalize(&DIGITS.replace_all(&working, " "));
    Extraction {
        intent,
        quantity,
        item_phrase,
        max_price,
    }
}

/// First digit run in the text, or 1. Runs too long for an `i64` saturate.
pub fn parse_quantity(text: &str) -> i64 {
    match DIGITS.find(text) {
        Some(m) => m.as_str().parse().unwrap_or(i64::MAX),
        None => 1,
    }
}

/// Find a price ceiling such as "under 5", "below $2.50" or "100 से कम".
/// Returns the price and the text with the whole clause removed.
fn take_price_ceiling(profile: &LanguageProfile, text: &str) -> Option<(f64, String)> {
    if profile.price_below.is_empty() {
        return None;
    }
    let mut markers: Vec<&String> = profile.price_below.iter().collect();
    markers.sort_by_key(|m| std::cmp::Reverse(m.chars().count()));
    let markers = markers
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");

    let after = format!(r"\b(?:{markers})\s*{CURRENCY}\s*{NUMBER}");
    let before = format!(r"{CURRENCY}{NUMBER}\s*{CURRENCY}\s*(?:{markers})\b");

    for pattern in [after, before] {
        let re = Regex::new(&pattern).ok()?;
        if let Some(caps) = re.captures(text) {
            let whole = caps.get(0)?;
            let price: f64 = caps[1].replace(',', ".").parse().ok()?;
            let mut stripped = text.to_string();
            stripped.replace_range(whole.range(), " ");
            trace!(price, clause = whole.as_str(), "Parsed price ceiling");
            return Some((price, normalize(&stripped)));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn en() -> Languages {
        Languages::builtin()
    }

    #[test]
    fn add_with_quantity_and_filler() {
        let e = extract(&en(), "Add 3 Dairy Milk to my list", "en");
        assert_eq!(e.intent, Intent::Add);
        assert_eq!(e.quantity, 3);
        assert_eq!(e.item_phrase, "dairy milk");
    }

    #[test]
    fn first_digit_run_only() {
        let e = extract(&en(), "add 2 bottles of milk size 500", "en");
        assert_eq!(e.quantity, 2);
        assert_eq!(e.item_phrase, "bottles of milk size");
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(extract(&en(), "remove bread", "en").quantity, 1);
    }

    #[test]
    fn oversized_quantity_saturates() {
        assert_eq!(parse_quantity("add 99999999999999999999 eggs"), i64::MAX);
    }

    #[test]
    fn add_wins_over_remove() {
        let e = extract(&en(), "remove and add milk", "en");
        assert_eq!(e.intent, Intent::Add);
        assert_eq!(e.item_phrase, "remove and milk");
    }

    #[test]
    fn remove_wins_over_search() {
        let e = extract(&en(), "find and delete eggs", "en");
        assert_eq!(e.intent, Intent::Remove);
    }

    #[test]
    fn unknown_keeps_phrase() {
        let e = extract(&en(), "2 Bananas please", "en");
        assert_eq!(e.intent, Intent::Unknown);
        assert_eq!(e.item_phrase, "bananas please");
        assert_eq!(e.quantity, 2);
    }

    #[test]
    fn search_parses_price_ceiling() {
        let e = extract(&en(), "look for milk under $2.50", "en");
        assert_eq!(e.intent, Intent::Search);
        assert_eq!(e.item_phrase, "milk");
        assert_eq!(e.max_price, Some(2.5));
    }

    #[test]
    fn search_parses_price_before_marker() {
        let e = extract(&en(), "खोजें दूध 100 से कम", "hi");
        assert_eq!(e.intent, Intent::Search);
        assert_eq!(e.max_price, Some(100.0));
        assert_eq!(e.item_phrase, "दूध");
    }

    #[test]
    fn search_accepts_decimal_comma() {
        let e = extract(&en(), "chercher fromage moins de 4,5", "fr");
        assert_eq!(e.max_price, Some(4.5));
        assert_eq!(e.item_phrase, "fromage");
    }

    #[test]
    fn add_ignores_price_clause() {
        let e = extract(&en(), "add milk under 5", "en");
        assert_eq!(e.max_price, None);
        assert_eq!(e.item_phrase, "milk under");
    }

    #[test]
    fn french_remove() {
        let e = extract(&en(), "Supprimer 2 pain de ma liste", "fr");
        assert_eq!(e.intent, Intent::Remove);
        assert_eq!(e.quantity, 2);
        assert_eq!(e.item_phrase, "pain");
    }

    #[test]
    fn extract_as_reinterprets_unknown() {
        let languages = en();
        let profile = languages.get("en");
        let e = extract_as(profile, "bread below 3", Intent::Search);
        assert_eq!(e.item_phrase, "bread");
        assert_eq!(e.max_price, Some(3.0));
    }

    proptest! {
        #[test]
        fn prop_unknown_language_matches_default(s in "[a-zA-Z0-9 ]{0,40}") {
            let languages = en();
            prop_assert_eq!(extract(&languages, &s, "zz"), extract(&languages, &s, "en"));
        }

        #[test]
        fn prop_phrase_has_no_digits(s in "(add|remove|find)? ?[a-z0-9 ]{0,30}") {
            let e = extract(&en(), &s, "en");
            prop_assert!(!e.item_phrase.chars().any(|c| c.is_ascii_digit()));
            prop_assert!(e.quantity >= 0);
        }
    }
}
