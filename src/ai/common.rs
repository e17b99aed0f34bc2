use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

static JSON_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Build a generateContent request body with a single text part.
pub fn build_content_request(prompt: &str) -> Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

/// POST `body` and return the raw response text. Non-2xx replies are errors.
#[instrument(level = "trace", skip(client, body, api_key))]
pub async fn request_text(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    body: &Value,
) -> Result<String> {
    debug!(url, "sending generateContent request");

    let resp = client
        .post(url)
        .query(&[("key", api_key)])
        .json(body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let err_text = resp.text().await.unwrap_or_default();
        warn!(%status, "Gemini API error");
        return Err(anyhow!("Gemini API error {status}: {err_text}"));
    }

    let raw = resp.text().await?;
    trace!(raw = %raw, "generateContent response");
    Ok(raw)
}

/// Text of the first candidate. Replies in an unexpected shape are returned
/// whole so the lenient parser can still look for JSON in them.
pub fn candidate_text(raw: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return raw.to_string();
    };
    ["/candidates/0/content/parts/0/text", "/candidates/0/content/0/text"]
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}

/// Parse `text` as JSON, or failing that the outermost `{...}` block in it.
/// Models like to wrap JSON in prose or code fences.
pub fn parse_json_lenient(text: &str) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Err(anyhow!("empty model reply"));
    }
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    let block = JSON_BLOCK
        .find(text)
        .ok_or_else(|| anyhow!("no JSON block in model reply"))?;
    Ok(serde_json::from_str(block.as_str())?)
}

/// Names from a `{"suggestions": [...]}` object. Entries may be plain
/// strings or objects with a `name`; blanks are dropped.
pub fn suggestion_names(value: &Value) -> Option<Vec<String>> {
    let entries = value.get("suggestions")?.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj.get("name").and_then(Value::as_str),
                _ => None,
            })
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
