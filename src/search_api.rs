//! Client for the remote search API ("fast search").
//!
//! Later revisions of the archive moved post search behind a dedicated HTTP
//! service that returns paginated JSON. This module is the consuming side
//! only; the service itself is an external collaborator. When no API URL is
//! configured the web layer searches the local database instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Submission;

#[derive(Debug, Error)]
pub enum SearchApiError {
    #[error("search API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search API returned status {status}")]
    Status { status: u16 },
    #[error("failed to decode search API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parameters for a post search request.
#[derive(Debug, Clone, Serialize)]
pub struct PostSearchRequest<'a> {
    pub query: &'a str,
    pub sort: &'a str,
    pub search_type: &'a str,
    pub page: u32,
    pub limit: u32,
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<&'a str>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<&'a str>,
}

/// One page of search results from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub results: Vec<Submission>,
    pub total: i64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// HTTP client for the search API.
#[derive(Debug, Clone)]
pub struct SearchApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchApiClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SearchApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search posts, returning one JSON page.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable response body.
    pub async fn search_posts(
        &self,
        request: &PostSearchRequest<'_>,
    ) -> Result<SearchPage, SearchApiError> {
        let url = format!("{}/api/search/posts", self.base_url);
        let response = self.http.get(&url).query(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
