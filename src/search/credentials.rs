//! Highspot credential resolution
//!
//! Credentials are resolved per call and never cached, so a missing
//! variable is reported at invocation time rather than at startup.

use std::fmt;

use crate::error::{Result, ServerError};

pub const USERNAME_ENV: &str = "HIGHSPOT_USERNAME";
pub const PASSWORD_ENV: &str = "HIGHSPOT_PASSWORD";

/// Basic auth credentials for the Highspot API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build credentials from optional parts, treating empty values as absent
    fn from_parts(username: Option<String>, password: Option<String>) -> Result<Self> {
        let username = username.filter(|v| !v.is_empty());
        let password = password.filter(|v| !v.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            (username, password) => {
                let mut missing = Vec::new();
                if username.is_none() {
                    missing.push(USERNAME_ENV);
                }
                if password.is_none() {
                    missing.push(PASSWORD_ENV);
                }
                Err(ServerError::Configuration(format!(
                    "Highspot credentials are not configured (missing {})",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Source of credentials, consulted on every search
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// Reads credentials from the process environment at call time
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    username_var: String,
    password_var: String,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self {
            username_var: USERNAME_ENV.to_string(),
            password_var: PASSWORD_ENV.to_string(),
        }
    }

    /// Read from custom variable names
    pub fn with_vars(username_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username_var: username_var.into(),
            password_var: password_var.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(
            std::env::var(&self.username_var).ok(),
            std::env::var(&self.password_var).ok(),
        )
    }
}

/// Fixed credentials, mainly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    pub fn partial(username: Option<&str>, password: Option<&str>) -> Self {
        Self {
            username: username.map(String::from),
            password: password.map(String::from),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(self.username.clone(), self.password.clone())
    }
}
