//! Token service client settings
//!
//! Loaded once at process start and handed to [`TokenResolver`] by value;
//! never mutated afterwards.
//!
//! [`TokenResolver`]: crate::resolver::TokenResolver

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default location of the token service inside the cluster.
pub const DEFAULT_BASE_URL: &str = "http://oauth-api:8090";
/// Default upper bound on a single token lookup, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 200;

/// Token service client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthSettings {
    /// Base URL of the token service, without a trailing path.
    pub base_url: String,
    /// Request timeout in milliseconds. Bounds how long a protected
    /// request may block on the identity lookup.
    pub timeout_ms: u64,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl OAuthSettings {
    /// Load settings from environment variables, falling back to the
    /// cluster defaults.
    ///
    /// Reads `OAUTH_API_BASE_URL` and `OAUTH_API_TIMEOUT_MS`. A `.env`
    /// file is honored in debug builds.
    pub fn from_env() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Self {
            base_url: env::var("OAUTH_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_ms: env::var("OAUTH_API_TIMEOUT_MS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
                .parse()
                .context("Invalid OAUTH_API_TIMEOUT_MS")?,
        })
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
