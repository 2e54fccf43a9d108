//! Highspot search API client

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde_json::Value;

use super::{Credentials, SearchConfig};
use crate::error::{Result, ServerError};

/// Build the `Authorization` header value for HTTP Basic auth
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Highspot API client
pub struct HighspotClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl HighspotClient {
    /// Create a new client; fails only if the HTTP client cannot be built
    pub fn new(config: SearchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Full request URL for a query
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let params = [
            ("query-string", query.to_string()),
            ("start", self.config.start.to_string()),
            ("limit", self.config.limit.to_string()),
            ("sortby", self.config.sort_by.clone()),
        ];

        Url::parse_with_params(&self.config.base_url, &params).map_err(|e| {
            ServerError::Configuration(format!(
                "Invalid Highspot base URL '{}': {}",
                self.config.base_url, e
            ))
        })
    }

    /// Search Highspot items, returning the response body as-is
    pub async fn search(&self, query: &str, credentials: &Credentials) -> Result<Value> {
        let url = self.search_url(query)?;
        tracing::debug!(query, "Searching Highspot");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Highspot search failed");
            return Err(ServerError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
