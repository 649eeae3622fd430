// src/services/headlines.rs

//! Direct headline fetching for the client pipeline.

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{ApiKey, Article, Config, HeadlinesPayload, QueryParams};
use crate::utils::http;

/// A source of headline articles.
///
/// The feed pipeline only depends on this seam, so headlines can come from
/// the upstream API directly or from the proxy without the pipeline caring.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetch the current top headlines for the given parameters.
    async fn top_headlines(&self, params: &QueryParams) -> Result<Vec<Article>>;
}

/// Fetches headlines straight from the upstream API.
pub struct HeadlineFetcher {
    config: Config,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl HeadlineFetcher {
    /// Create a new fetcher with the given configuration and key.
    pub fn new(config: Config, api_key: ApiKey) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl HeadlineSource for HeadlineFetcher {
    async fn top_headlines(&self, params: &QueryParams) -> Result<Vec<Article>> {
        let url = params.upstream_url(
            &self.config.upstream.base_url,
            &self.config.upstream.lang,
            &self.api_key,
        )?;

        log::debug!(
            "Fetching headlines: category={}, country={}, max={}",
            params.category,
            params.country,
            params.max_results
        );

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::fetch(
                "Failed to fetch news. Please check your API key.",
            ));
        }

        // A payload without an articles field is an empty result, not an error.
        let body = response.text().await?;
        let payload: HeadlinesPayload = serde_json::from_str(&body)?;
        Ok(payload.articles)
    }
}
