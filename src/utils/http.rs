// src/utils/http.rs

//! HTTP client utilities.

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};

use crate::error::Result;
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
///
/// Every outbound request carries cache-disabling headers so that neither
/// the upstream nor any intermediary serves a stale payload.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(no_cache_headers())
        .build()?;
    Ok(client)
}

/// Cache-disabling request headers.
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}
