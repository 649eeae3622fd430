//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "GNEWS_API_KEY";

/// The upstream API credential.
///
/// Resolved from the environment at startup, never compiled into the binary
/// and never logged. `Debug` and `Display` redact the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap an already-resolved key value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Resolve the key from the environment, failing if absent or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value)),
            _ => Err(AppError::config(format!(
                "{API_KEY_ENV} is not set. The upstream API key must be provided via the environment."
            ))),
        }
    }

    /// The raw key value, for embedding in the outbound request URL.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API endpoint settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Build configuration from environment variables, falling back to
    /// defaults. Used in the Lambda environment where no config file exists.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("NEWSFEED_BASE_URL") {
            config.upstream.base_url = base_url;
        }
        if let Ok(lang) = std::env::var("NEWSFEED_LANG") {
            config.upstream.lang = lang;
        }
        if let Ok(country) = std::env::var("NEWSFEED_COUNTRY") {
            config.upstream.country = country;
        }
        config
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.upstream.base_url.trim().is_empty() {
            return Err(AppError::validation("upstream.base_url is empty"));
        }
        if url::Url::parse(&self.upstream.base_url).is_err() {
            return Err(AppError::validation(format!(
                "upstream.base_url is not a valid URL: {}",
                self.upstream.base_url
            )));
        }
        if self.upstream.lang.trim().is_empty() {
            return Err(AppError::validation("upstream.lang is empty"));
        }
        if self.upstream.country.trim().is_empty() {
            return Err(AppError::validation("upstream.country is empty"));
        }
        if self.upstream.max_results == 0 {
            return Err(AppError::validation("upstream.max_results must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        Ok(())
    }
}

/// Upstream headlines API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the top-headlines endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Language code sent with every request
    #[serde(default = "defaults::lang")]
    pub lang: String,

    /// Default country code when the caller does not pass one
    #[serde(default = "defaults::country")]
    pub country: String,

    /// Default result limit when the caller does not pass one
    #[serde(default = "defaults::max_results")]
    pub max_results: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            lang: defaults::lang(),
            country: defaults::country(),
            max_results: defaults::max_results(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for outbound requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
        }
    }
}

mod defaults {
    // Upstream defaults
    pub fn base_url() -> String {
        "https://gnews.io/api/v4/top-headlines".into()
    }
    pub fn lang() -> String {
        "en".into()
    }
    pub fn country() -> String {
        "us".into()
    }
    pub fn max_results() -> u32 {
        10
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; newsfeed/1.0)".into()
    }
}
