//! Query parameters for a headlines request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiKey;

/// The fixed set of headline topics offered by the upstream API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
}

impl Category {
    /// All selectable categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::World,
        Category::Nation,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
    ];

    /// The lowercase identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::World => "world",
            Category::Nation => "nation",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::validation(format!("Unknown category: {s}")))
    }
}

/// Parameters of a single headlines request.
///
/// Constructed fresh per fetch attempt and discarded after the request
/// resolves; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Headline topic
    pub category: Category,

    /// Two-letter country code
    pub country: String,

    /// Maximum number of articles to return
    pub max_results: u32,

    /// Opaque cache-busting token supplied by the caller, ignored by logic
    pub cache_bust: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            category: Category::default(),
            country: "us".to_string(),
            max_results: 10,
            cache_bust: None,
        }
    }
}

impl QueryParams {
    /// Build the outbound upstream URL for these parameters.
    ///
    /// The URL embeds exactly category, lang, country, max, and the API key.
    /// The cache-bust token is a client-facing concern and is not forwarded.
    pub fn upstream_url(&self, base: &str, lang: &str, api_key: &ApiKey) -> Result<String> {
        let mut url = Url::parse(base)?;
        url.query_pairs_mut()
            .append_pair("category", self.category.as_str())
            .append_pair("lang", lang)
            .append_pair("country", &self.country)
            .append_pair("max", &self.max_results.to_string())
            .append_pair("apikey", api_key.expose());
        Ok(url.into())
    }
}
