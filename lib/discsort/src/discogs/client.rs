use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::release::SearchPage;
use std::{future::Future, time::Duration};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use super::models::SearchResponse;
use crate::{error::CatalogError, CatalogClient};

const DEFAULT_BASE_URL: &str = "https://api.discogs.com";

/// Timeout for individual Discogs requests (15 seconds)
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Maximum attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds)
const BASE_DELAY_MS: u64 = 500;

/// Maximum backoff delay cap (milliseconds)
const MAX_BACKOFF_MS: u64 = 5000;

/// Discogs caps `per_page` at 100.
const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(std::cmp::min(
        BASE_DELAY_MS * 2u64.pow(attempt),
        MAX_BACKOFF_MS,
    ))
}

/// Retries an async operation with exponential backoff and a per-attempt timeout.
/// Only transient errors (network issues, timeouts, 429 and 5xx responses) are retried.
async fn with_retry<T, F, Fut>(operation_name: &str, mut operation: F) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut last_error = CatalogError::Timeout(REQUEST_TIMEOUT_SECS);

    for attempt in 0..MAX_RETRIES {
        let result =
            tokio::time::timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS), operation()).await;

        let error = match result {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) if !e.is_retryable() => {
                warn!("{} failed with non-retryable error: {}", operation_name, e);
                return Err(e);
            }
            Ok(Err(e)) => e,
            Err(_elapsed) => CatalogError::Timeout(REQUEST_TIMEOUT_SECS),
        };

        if attempt < MAX_RETRIES - 1 {
            let delay = backoff_delay(attempt);
            warn!(
                "{} failed (attempt {}/{}), retrying in {}ms: {}",
                operation_name,
                attempt + 1,
                MAX_RETRIES,
                delay.as_millis(),
                error
            );
            sleep(delay).await;
        }
        last_error = error;
    }

    warn!(
        "{} failed after {} attempts: {}",
        operation_name, MAX_RETRIES, last_error
    );
    Err(last_error)
}

#[derive(Debug, Clone)]
pub struct DiscogsClient {
    base_url: Url,
    token: String,
    user_agent: String,
    page_size: u32,
    client: Client,
}

#[derive(Default)]
pub struct DiscogsClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    page_size: Option<u32>,
}

impl DiscogsClientBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn build(self) -> Result<DiscogsClient, CatalogError> {
        let token = self.token.ok_or(CatalogError::NotConfigured("token"))?;
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        // Trailing slash so `join` appends instead of replacing the last segment.
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;

        let version = env!("CARGO_PKG_VERSION");
        Ok(DiscogsClient {
            base_url,
            token,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("discsort/{version}")),
            page_size: self
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            client: Client::new(),
        })
    }
}

impl DiscogsClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = self.base_url.join(endpoint)?;
        debug!("Request: GET {}", url);

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("token", self.token.as_str())])
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Err(CatalogError::RateLimit)
        } else if status == StatusCode::UNAUTHORIZED {
            Err(CatalogError::InvalidToken)
        } else if status == StatusCode::NOT_FOUND {
            Err(CatalogError::NotFound)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Searches releases matching a free-text query.
    pub async fn search_releases(&self, query: &str) -> Result<SearchPage, CatalogError> {
        let per_page = self.page_size.to_string();
        info!("Searching Discogs for: '{}'", query);

        let params = [("q", query), ("type", "release"), ("per_page", per_page.as_str())];
        let params = &params;

        let response: SearchResponse =
            with_retry("Discogs release search", move || self.get("database/search", params))
                .await?;

        let page = SearchPage::from(response);
        info!(
            "Discogs returned {} result(s) ({} on this page)",
            page.count,
            page.results.len()
        );
        Ok(page)
    }

    pub async fn check_connection(&self) -> bool {
        self.get::<serde_json::Value>("oauth/identity", &[])
            .await
            .is_ok()
    }
}

#[async_trait]
impl CatalogClient for DiscogsClient {
    fn id(&self) -> &'static str {
        "discogs"
    }

    fn name(&self) -> &'static str {
        "Discogs"
    }

    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError> {
        self.search_releases(query).await
    }

    async fn health_check(&self) -> bool {
        self.check_connection().await
    }
}
