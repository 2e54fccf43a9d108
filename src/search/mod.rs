//! Highspot knowledge-base search
//!
//! A single authenticated GET against the Highspot items search endpoint.
//! Paging and ordering are fixed; the JSON body is passed through untouched.

mod client;
mod credentials;

pub use client::{basic_auth_header, HighspotClient};
pub use credentials::{
    CredentialSource, Credentials, EnvCredentials, StaticCredentials, PASSWORD_ENV, USERNAME_ENV,
};

use std::time::Duration;

/// Default Highspot items search endpoint
pub const DEFAULT_BASE_URL: &str = "https://api-su2.highspot.com/v1.0/search/items";

/// Search request configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Endpoint the query parameters are appended to
    pub base_url: String,
    pub start: u32,
    pub limit: u32,
    pub sort_by: String,
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            start: 0,
            limit: 10,
            sort_by: "relevancy".to_string(),
            timeout: None,
        }
    }
}

impl SearchConfig {
    /// Config pointing at a different endpoint, keeping fixed paging
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
