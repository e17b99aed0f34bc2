use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_]+)\}").expect("valid placeholder pattern"));

/// Zero-width space, non-joiner, joiner and the byte-order mark.
const INVISIBLE: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Canonical cleanup applied to every piece of user text and catalog data.
///
/// Lowercases, drops invisible characters, collapses whitespace runs to a
/// single space and trims both ends. Total and idempotent: an empty or blank
/// input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !INVISIBLE.contains(c))
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every occurrence of the given phrases from `text`, matching whole
/// tokens only so that a phrase never eats part of a longer word.
///
/// Both `text` and `phrases` are expected to be normalized. Longer phrases are
/// tried first at each position.
pub fn remove_phrases(text: &str, phrases: &[String]) -> String {
    let mut candidates: Vec<Vec<&str>> = phrases
        .iter()
        .map(|p| p.split(' ').filter(|t| !t.is_empty()).collect::<Vec<_>>())
        .filter(|p| !p.is_empty())
        .collect();
    candidates.sort_by_key(|p| std::cmp::Reverse(p.len()));

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    'outer: while i < tokens.len() {
        for phrase in &candidates {
            if tokens[i..].starts_with(phrase) {
                trace!(phrase = %phrase.join(" "), "Removing phrase");
                i += phrase.len();
                continue 'outer;
            }
        }
        kept.push(tokens[i]);
        i += 1;
    }
    kept.join(" ")
}

/// Substitute `{name}` placeholders in a message template in a single pass.
///
/// Placeholders without a value are left in place.
pub fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
