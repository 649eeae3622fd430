//! Article data structures as returned by the headlines API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The publisher of an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Publisher display name
    #[serde(default)]
    pub name: String,
}

/// A single headline article.
///
/// Field names follow the upstream wire format (camelCase JSON).
/// Articles are immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline title
    pub title: String,

    /// Short summary, may be absent
    #[serde(default)]
    pub description: Option<String>,

    /// Leading body text, may be absent
    #[serde(default)]
    pub content: Option<String>,

    /// Canonical URL of the article
    #[serde(default)]
    pub url: String,

    /// Cover image URL, may be absent
    #[serde(default)]
    pub image: Option<String>,

    /// Publication timestamp, may be absent on malformed records
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Publishing source
    #[serde(default)]
    pub source: Source,
}

impl Article {
    /// Derive a stable identity for this article.
    ///
    /// Uses the article URL when present, otherwise a hash of
    /// title + publication timestamp. Array position is never an identity:
    /// it does not survive reordering or filtering.
    pub fn stable_key(&self) -> String {
        if !self.url.trim().is_empty() {
            return self.url.clone();
        }

        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        if let Some(ts) = &self.published_at {
            hasher.update(ts.to_rfc3339().as_bytes());
        }
        hex::encode(&hasher.finalize()[..16])
    }
}

/// Top-level payload of the headlines endpoint.
///
/// `articles` defaults to empty when the payload omits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadlinesPayload {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article(title: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            description: None,
            content: None,
            url: url.to_string(),
            image: None,
            published_at: None,
            source: Source::default(),
        }
    }

    #[test]
    fn test_stable_key_prefers_url() {
        let article = sample_article("A", "https://example.com/a");
        assert_eq!(article.stable_key(), "https://example.com/a");
    }

    #[test]
    fn test_stable_key_falls_back_to_hash() {
        let a = sample_article("Same title", "");
        let b = sample_article("Same title", "");
        let c = sample_article("Other title", "");
        assert_eq!(a.stable_key(), b.stable_key());
        assert_ne!(a.stable_key(), c.stable_key());
    }

    #[test]
    fn test_payload_defaults_articles_to_empty() {
        let payload: HeadlinesPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.articles.is_empty());
    }

    #[test]
    fn test_article_parses_wire_format() {
        let json = r#"{
            "title": "Cats rule",
            "description": "about cats",
            "url": "https://example.com/cats",
            "image": null,
            "publishedAt": "2024-01-01T12:00:00Z",
            "source": {"name": "Example News"}
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Cats rule");
        assert_eq!(article.source.name, "Example News");
        assert!(article.published_at.is_some());
        assert!(article.content.is_none());
    }
}
