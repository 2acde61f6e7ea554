use crate::config::SearchConfig;
use crate::domain::model::SearchResult;
use crate::domain::ports::SearchClient;
use crate::utils::domain::domain_from_url;
use crate::utils::error::{CheckError, Result};
use crate::utils::text::{shorten_query, truncate_chars};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const MAX_TITLE_CHARS: usize = 220;
const MAX_SNIPPET_CHARS: usize = 700;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_answer: bool,
    include_images: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Tavily 搜尋 API 客戶端
pub struct TavilySearchClient {
    config: SearchConfig,
    client: Client,
}

impl TavilySearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CheckError::ConfigValidationError {
                field: "search".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { config, client })
    }

    fn to_results(hits: Vec<SearchHit>) -> Vec<SearchResult> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for hit in hits {
            let url = hit.url.unwrap_or_default().trim().to_string();
            if url.is_empty() || !seen.insert(url.clone()) {
                continue;
            }
            results.push(SearchResult {
                title: truncate_chars(hit.title.as_deref().unwrap_or(""), MAX_TITLE_CHARS),
                snippet: truncate_chars(hit.content.as_deref().unwrap_or(""), MAX_SNIPPET_CHARS),
                source_domain: domain_from_url(&url),
                url,
            });
        }

        results
    }
}

#[async_trait]
impl SearchClient for TavilySearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let api_key = self.config.api_key();
        if api_key.trim().is_empty() {
            return Err(CheckError::search_unavailable("search API key is not configured"));
        }

        let query = shorten_query(query, self.config.max_query_words());
        if query.is_empty() {
            return Err(CheckError::search_unavailable(
                "query is empty after removing control characters",
            ));
        }
        let payload = SearchRequest {
            api_key,
            query: &query,
            max_results: self.config.max_results(),
            search_depth: self.config.search_depth(),
            include_answer: false,
            include_images: false,
            include_raw_content: false,
        };

        tracing::debug!("Making search request to: {} (query: {})", self.config.endpoint(), query);
        let response = self
            .client
            .post(self.config.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| CheckError::search_unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Search response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckError::search_unavailable(format!(
                "HTTP {}: {}",
                status,
                truncate_chars(&body, 300)
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CheckError::search_unavailable(format!("malformed response: {}", e)))?;

        let raw_count = body.results.len();
        let results = Self::to_results(body.results);
        if results.len() < raw_count {
            tracing::debug!(
                "Dropped {} results without URL or with duplicate URL",
                raw_count - results.len()
            );
        }
        Ok(results)
    }
}
