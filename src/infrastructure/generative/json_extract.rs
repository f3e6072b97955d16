//! JSON recovery from free-form model output
//!
//! Model responses may wrap the payload in markdown fences or surrounding
//! narrative text. Extraction tries, in order: the whole trimmed text, a
//! ```json fenced block, any fenced block, and finally the first valid JSON
//! value found anywhere in the text. Whatever shape comes out must still pass
//! the caller's schema validation.

use serde::de::DeserializeOwned;

use crate::domain::design::GenerativeError;

/// Parse a typed value out of free-form model text.
pub fn parse_model_json<T: DeserializeOwned>(content: &str) -> Result<T, GenerativeError> {
    let trimmed = content.trim();

    if let Ok(parsed) = serde_json::from_str::<T>(trimmed) {
        return Ok(parsed);
    }

    for candidate in [
        fenced_block(trimmed, Some("json")),
        fenced_block(trimmed, None),
        first_json_value(trimmed),
    ]
    .into_iter()
    .flatten()
    {
        if let Ok(parsed) = serde_json::from_str::<T>(&candidate) {
            return Ok(parsed);
        }
    }

    Err(GenerativeError::ContractViolation(
        "no valid JSON payload in model response".to_string(),
    ))
}

/// Extract the body of a fenced code block, optionally requiring a language tag.
fn fenced_block(content: &str, language: Option<&str>) -> Option<String> {
    const FENCE: &str = "```";
    let mut search = content;

    loop {
        let start = search.find(FENCE)?;
        let after = &search[start + FENCE.len()..];
        let newline = after.find('\n')?;
        let tag = after[..newline].trim();
        let body = &after[newline + 1..];

        if let Some(expected) = language {
            if !tag.eq_ignore_ascii_case(expected) {
                search = after;
                continue;
            }
        }

        let end = body.find(FENCE)?;
        return Some(body[..end].trim().to_string());
    }
}

/// Find the first substring that parses as a complete JSON object or array.
fn first_json_value(content: &str) -> Option<String> {
    for (idx, ch) in content.char_indices() {
        if ch == '{' || ch == '[' {
            let candidate = &content[idx..];
            let mut stream =
                serde_json::Deserializer::from_str(candidate).into_iter::<serde_json::Value>();
            if let Some(Ok(_)) = stream.next() {
                let end = stream.byte_offset();
                if end > 0 && end <= candidate.len() {
                    return Some(candidate[..end].to_string());
                }
            }
        }
    }
    None
}
