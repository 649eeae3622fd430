// src/services/proxy.rs

//! Headline fetch proxy service.
//!
//! Forwards a headlines query to the upstream API and returns either the
//! upstream JSON verbatim or a normalized `{"error": message}` envelope.
//! The upstream sometimes answers with an HTML error page, so the body is
//! read as text and inspected before any JSON parsing is attempted.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{ApiKey, Config, QueryParams};
use crate::utils::http;

/// Normalized proxy response, ready to be mapped onto an HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    /// HTTP status code: 200 on success, 500 on any failure
    pub status: u16,

    /// Raw upstream JSON on success, `{"error": message}` on failure
    pub body: String,
}

impl ProxyResponse {
    /// Successful pass-through of the upstream body.
    pub(crate) fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    /// Uniform error envelope. No failure propagates in any other shape.
    pub(crate) fn error(err: &AppError) -> Self {
        Self {
            status: 500,
            body: serde_json::json!({ "error": err.to_string() }).to_string(),
        }
    }
}

/// Stateless pass-through handler for headline requests.
///
/// Each invocation is independent; concurrent invocations share no mutable
/// state.
pub struct ProxyService {
    config: Config,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl ProxyService {
    /// Create a new proxy service with the given configuration and key.
    pub fn new(config: Config, api_key: ApiKey) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Handle a single proxied request.
    ///
    /// Never fails: every error is converted into a 500 envelope.
    pub async fn handle(&self, params: &QueryParams) -> ProxyResponse {
        log::info!(
            "Proxying headlines request: category={}, country={}, max={}",
            params.category,
            params.country,
            params.max_results
        );

        match self.forward(params).await {
            Ok(body) => {
                log::info!("Upstream request succeeded ({} bytes)", body.len());
                ProxyResponse::ok(body)
            }
            Err(err) => {
                log::error!("Headlines proxy failed: {err}");
                ProxyResponse::error(&err)
            }
        }
    }

    /// Forward the request upstream and validate the response.
    ///
    /// Returns the raw upstream body so the success path stays byte-for-byte
    /// identical to what the upstream sent.
    async fn forward(&self, params: &QueryParams) -> Result<String> {
        let url = params.upstream_url(
            &self.config.upstream.base_url,
            &self.config.upstream.lang,
            &self.api_key,
        )?;

        // The URL embeds the API key, so it is never logged.
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        log::debug!("Upstream status: {status}");

        let body = response.text().await?;
        interpret_response(status, &body)?;
        Ok(body)
    }
}

/// Decide whether an upstream response is usable.
///
/// The body must be read in full before interpretation: an HTML error page
/// is only distinguishable from JSON by looking at the raw content.
fn interpret_response(status: u16, body: &str) -> Result<Value> {
    if is_html_document(body) {
        return Err(AppError::HtmlUpstream);
    }

    let parsed: Value = serde_json::from_str(body).map_err(|_| {
        // Raw body goes to the logs, not to the client.
        log::error!("Failed to parse upstream response as JSON: {body}");
        AppError::InvalidJson
    })?;

    if !(200..300).contains(&status) {
        log::error!("Upstream error response: {parsed}");
        return Err(AppError::upstream_status(status, &parsed));
    }

    Ok(parsed)
}

/// Check whether a body starts with an HTML document marker.
fn is_html_document(body: &str) -> bool {
    let head = body.trim_start().to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}
