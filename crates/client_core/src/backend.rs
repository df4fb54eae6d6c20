use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{SearchMode, SearchResult},
    error::SearchError,
    protocol::{decode_search_response, SearchQuery},
};
use tracing::{debug, warn};
use url::Url;

use crate::config::Settings;

/// Source of search records for one query in one mode.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, mode: SearchMode)
        -> Result<Vec<SearchResult>, SearchError>;
}

pub fn build_http_client(settings: &Settings) -> Result<Client, SearchError> {
    Client::builder()
        .timeout(settings.request_timeout())
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Talks to the `/search` and `/llm/enhanced-search` endpoints.
pub struct HttpSearchBackend {
    http: Client,
    base_url: Url,
}

impl HttpSearchBackend {
    pub fn new(settings: &Settings) -> Result<Self, SearchError> {
        let http = build_http_client(settings)?;
        Self::with_client(http, &settings.api_base_url)
    }

    pub fn with_client(http: Client, api_base_url: &str) -> Result<Self, SearchError> {
        // A trailing slash keeps any path prefix of the base when joining.
        let base = format!("{}/", api_base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base)
            .map_err(|e| SearchError::InvalidEndpoint(format!("{api_base_url}: {e}")))?;
        Ok(Self { http, base_url })
    }

    pub fn endpoint(&self, mode: SearchMode) -> Result<Url, SearchError> {
        self.base_url
            .join(mode.endpoint_path())
            .map_err(|e| SearchError::InvalidEndpoint(e.to_string()))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let endpoint = self.endpoint(mode)?;
        debug!(%endpoint, mode = mode.label(), query, "search request");

        let response = self
            .http
            .get(endpoint)
            .query(&SearchQuery {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), mode = mode.label(), "search endpoint rejected request");
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        decode_search_response(&body)
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
