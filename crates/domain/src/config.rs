//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    default_base_url, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_EXPIRATION_BUFFER_SECS,
};
use crate::errors::{NordigenError, Result};

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct NordigenConfig {
    /// Client identifier (UUID text)
    pub secret_id: String,
    /// Secret key as hex text
    #[serde(skip_serializing)]
    pub secret_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seconds added to every server-declared expiry; must be zero or negative.
    #[serde(default = "default_token_expiration_buffer_secs")]
    pub token_expiration_buffer_secs: i64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl NordigenConfig {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_expiration_buffer_secs: DEFAULT_TOKEN_EXPIRATION_BUFFER_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the numeric settings. Credentials are checked when parsed.
    pub fn validate(&self) -> Result<()> {
        if self.token_expiration_buffer_secs > 0 {
            return Err(NordigenError::Config(format!(
                "token expiration buffer must be zero or negative, got {}s",
                self.token_expiration_buffer_secs
            )));
        }
        if self.page_size == 0 {
            return Err(NordigenError::Config("page size must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(NordigenError::Config("timeout must be at least 1 second".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(NordigenError::Config("base URL must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for NordigenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NordigenConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("token_expiration_buffer_secs", &self.token_expiration_buffer_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_expiration_buffer_secs() -> i64 {
    DEFAULT_TOKEN_EXPIRATION_BUFFER_SECS
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
