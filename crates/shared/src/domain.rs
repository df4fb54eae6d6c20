use serde::{Deserialize, Serialize};

/// One record as returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SearchResult {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: None,
            score: None,
            plot: None,
            tags: None,
            source: None,
        }
    }

    /// Tags of this record; a missing `tags` field reads as no tags.
    pub fn tag_slice(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_slice().iter().any(|t| t == tag)
    }
}

/// Records sharing a title, at most one per distinct `(plot, source)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub title: String,
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Plain,
    LlmEnhanced,
}

impl SearchMode {
    pub fn from_llm_flag(llm_enhanced: bool) -> Self {
        if llm_enhanced {
            Self::LlmEnhanced
        } else {
            Self::Plain
        }
    }

    pub fn is_llm_enhanced(self) -> bool {
        self == Self::LlmEnhanced
    }

    /// Path of the endpoint serving this mode, relative to the API base URL.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Self::Plain => "search",
            Self::LlmEnhanced => "llm/enhanced-search",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::LlmEnhanced => "llm-enhanced",
        }
    }
}
