//! Shareable address of a results page: the query text and the search mode.
//!
//! Selected tags are deliberately absent; they never travel in an address.

use serde::{Deserialize, Serialize};
use shared::domain::SearchMode;
use url::{form_urlencoded, Url};

pub const RESULTS_PATH: &str = "/results";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAddress {
    pub query: String,
    #[serde(default)]
    pub llm_enhanced: bool,
}

impl SearchAddress {
    pub fn new(query: impl Into<String>, llm_enhanced: bool) -> Self {
        Self {
            query: query.into(),
            llm_enhanced,
        }
    }

    pub fn mode(&self) -> SearchMode {
        SearchMode::from_llm_flag(self.llm_enhanced)
    }

    /// `query=<text>` plus `&llm=1` when enhanced mode is on.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("query", &self.query);
        if self.llm_enhanced {
            serializer.append_pair("llm", "1");
        }
        serializer.finish()
    }

    pub fn results_path(&self) -> String {
        format!("{RESULTS_PATH}?{}", self.to_query_string())
    }

    /// Reads an address from a query string (with or without a leading `?`),
    /// a `/results?...` path, or an absolute URL.
    ///
    /// A missing `query` reads as empty; `llm` only counts when it is `"1"`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(url) = Url::parse(input) {
            return Self::from_url(&url);
        }

        // A `?` after the first `=` belongs to a value, not to a path.
        let query_part = match (input.find('?'), input.find('=')) {
            (Some(mark), eq) if eq.map_or(true, |eq| mark < eq) => &input[mark + 1..],
            (_, Some(_)) => input,
            _ => "",
        };
        let query_part = query_part.split('#').next().unwrap_or_default();
        Self::from_pairs(form_urlencoded::parse(query_part.as_bytes()))
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Self {
        let mut query = None;
        let mut llm_enhanced = false;
        for (key, value) in pairs {
            match key.as_ref() {
                "query" if query.is_none() => query = Some(value.into_owned()),
                "llm" => llm_enhanced = value == "1",
                _ => {}
            }
        }
        Self {
            query: query.unwrap_or_default(),
            llm_enhanced,
        }
    }
}

#[cfg(test)]
#[path = "tests/address_tests.rs"]
mod tests;
