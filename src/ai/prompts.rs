//! Prompts sent to the suggestion model.

/// Opening instructions for list based suggestions.
pub const SUGGESTION_PROMPT: &str = "You are a helpful shopping assistant.";

/// How the model must shape its reply.
pub const SUGGESTION_FORMAT: &str = "Suggest up to 6 items the user is likely to need next. Return only valid JSON in the form: { \"suggestions\": [\"item1\",\"item2\",\"item3\", ...] }. Avoid items already in the list.";

/// Build the suggestion prompt from the serialized list and, when present,
/// recent search results.
pub fn suggestion_prompt(list_json: &str, results_json: Option<&str>) -> String {
    let context = match results_json {
        Some(results) => format!(" Search results: {results}"),
        None => String::new(),
    };
    format!("{SUGGESTION_PROMPT}\nGiven this shopping list: {list_json}.{context}\n{SUGGESTION_FORMAT}")
}
