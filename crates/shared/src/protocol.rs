use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::SearchResult, error::SearchError};

/// Query string sent to both search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Accepted response bodies. The wrapper form is chosen whenever a
/// non-null `results` field is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Wrapped { results: Vec<SearchResult> },
    Bare(Vec<SearchResult>),
}

impl SearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Self::Wrapped { results } | Self::Bare(results) => results,
        }
    }
}

/// Decodes a search response body into its records.
///
/// Accepts `[...]` and `{"results": [...]}`; any other shape, or records
/// that do not match [`SearchResult`], is a [`SearchError::Decode`].
pub fn decode_search_response(body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    decode_search_value(value)
}

pub fn decode_search_value(value: Value) -> Result<Vec<SearchResult>, SearchError> {
    match &value {
        Value::Object(map) if map.get("results").map_or(true, Value::is_null) => {
            return Err(SearchError::Decode(
                "expected an array or an object with a `results` array".to_string(),
            ));
        }
        Value::Object(_) | Value::Array(_) => {}
        other => {
            return Err(SearchError::Decode(format!(
                "expected an array or an object with a `results` array, got {}",
                json_kind(other)
            )));
        }
    }

    serde_json::from_value::<SearchResponse>(value)
        .map(SearchResponse::into_results)
        .map_err(|e| SearchError::Decode(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
