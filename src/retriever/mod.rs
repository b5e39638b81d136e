//! News search transport used by the outlet searchers

mod newsapi;

use async_trait::async_trait;

use crate::model::Article;

pub use newsapi::NewsApiClient;

/// Language filter applied to every search
pub const SEARCH_LANGUAGE: &str = "en";

/// Result ordering requested from the search API
pub const SEARCH_SORT_BY: &str = "relevancy";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Search API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// One search call against the news index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Comma-separated domain restriction, if any
    pub domains: Option<String>,
    pub language: &'static str,
    pub sort_by: &'static str,
    pub page_size: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, domains: Option<String>, page_size: u32) -> Self {
        Self {
            query: query.into(),
            domains,
            language: SEARCH_LANGUAGE,
            sort_by: SEARCH_SORT_BY,
            page_size,
        }
    }
}

/// Trait for news search backends
#[async_trait]
pub trait NewsSearchClient: Send + Sync {
    /// Run a single search. An empty list is a successful "nothing found".
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Article>, SearchError>;
}
