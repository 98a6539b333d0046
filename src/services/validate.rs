use crate::error::ExtractError;
use crate::services::schema::SchemaStore;
use serde_json::Value;

const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";
const SNIPPET_CHARS: usize = 300;

/// Strip Markdown code fences and a leading `json` tag from model output.
///
/// The strict stage and the repair pass both go through this function so
/// they always see the same text.
pub fn normalize_model_text(raw: &str) -> &str {
    let mut text = raw.trim();
    if text.starts_with(FENCE) {
        text = text.trim_matches('`').trim();
    }
    if let Some(rest) = text.strip_prefix(LANGUAGE_TAG) {
        text = rest.trim_start();
    }
    text
}

pub fn parse_model_json(raw: &str) -> Result<Value, ExtractError> {
    let text = normalize_model_text(raw);
    serde_json::from_str(text).map_err(|source| ExtractError::Parse {
        snippet: text.chars().take(SNIPPET_CHARS).collect(),
        source,
    })
}

/// Strict stage: normalized text must parse and satisfy the schema as-is.
pub fn parse_and_validate(raw: &str, schema: &SchemaStore) -> Result<Value, ExtractError> {
    let data = parse_model_json(raw)?;
    schema.validate(&data)?;
    Ok(data)
}
