// src/error.rs

//! Unified error handling for the newsfeed application.

use std::fmt;

use thiserror::Error;

/// Result type alias for newsfeed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Upstream answered with an HTML document instead of JSON
    #[error(
        "Received HTML response instead of JSON. The API might be down or the endpoint has changed."
    )]
    HtmlUpstream,

    /// Upstream body could not be parsed as JSON
    #[error("Invalid JSON response from the server")]
    InvalidJson,

    /// Upstream answered with a non-success HTTP status
    #[error("API request failed with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Client-side fetch failed
    #[error("{0}")]
    Fetch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a client fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Create an upstream status error with the parsed error body.
    pub fn upstream_status(status: u16, body: impl fmt::Display) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message() {
        let err = AppError::upstream_status(404, r#"{"message":"not found"}"#);
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains(r#"{"message":"not found"}"#));
    }

    #[test]
    fn test_html_upstream_message() {
        let msg = AppError::HtmlUpstream.to_string();
        assert!(msg.contains("HTML response"));
    }

    #[test]
    fn test_invalid_json_message() {
        let msg = AppError::InvalidJson.to_string();
        assert!(msg.contains("Invalid JSON"));
    }
}
