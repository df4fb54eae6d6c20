//! UI/backend events and error modeling for the search GUI.

use shared::{
    domain::SearchResult,
    error::{ErrorCode, SearchError},
};

pub enum UiEvent {
    SearchCompleted {
        generation: u64,
        outcome: Result<Vec<SearchResult>, SearchError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Status,
    Decode,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Search,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_search_error(context: UiErrorContext, err: &SearchError) -> Self {
        let category = match err.code() {
            ErrorCode::Transport => UiErrorCategory::Transport,
            ErrorCode::HttpStatus => UiErrorCategory::Status,
            ErrorCode::Decode => UiErrorCategory::Decode,
            ErrorCode::Config => UiErrorCategory::Configuration,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Backend worker failed to come up; searching is impossible until restart.
    pub fn startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Configuration,
            context: UiErrorContext::BackendStartup,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Status => "Server",
        UiErrorCategory::Decode => "Response",
        UiErrorCategory::Configuration => "Configuration",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_map_to_categories_by_code() {
        let status = UiError::from_search_error(
            UiErrorContext::Search,
            &SearchError::HttpStatus { status: 502 },
        );
        assert_eq!(status.category(), UiErrorCategory::Status);
        assert_eq!(status.message(), "Failed to fetch results (HTTP 502)");

        let decode = UiError::from_search_error(
            UiErrorContext::Search,
            &SearchError::Decode("expected an array".to_string()),
        );
        assert_eq!(decode.category(), UiErrorCategory::Decode);
        assert!(!decode.is_fatal());
    }

    #[test]
    fn startup_failures_are_fatal_configuration_errors() {
        let err = UiError::startup("backend worker startup failure: failed to build runtime");
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        assert!(err.is_fatal());
        assert_eq!(err_label(err.category()), "Configuration");
    }
}
