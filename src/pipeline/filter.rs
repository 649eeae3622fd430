// src/pipeline/filter.rs

//! Pure, synchronous article filtering.

use crate::models::Article;

/// Filter articles by case-insensitive substring match.
///
/// An article matches when the lower-cased term is a substring of its
/// lower-cased title, description, or content; absent fields are tolerated.
/// An empty term returns the full list unfiltered. The input is never
/// mutated, so filtering an already-filtered list with the same term
/// produces the same result.
pub fn filter_articles<'a>(articles: &'a [Article], term: &str) -> Vec<&'a Article> {
    if term.is_empty() {
        return articles.iter().collect();
    }

    let needle = term.to_lowercase();
    articles.iter().filter(|a| matches(a, &needle)).collect()
}

/// Check one article against an already lower-cased needle.
fn matches(article: &Article, needle: &str) -> bool {
    contains(&article.title, needle)
        || article
            .description
            .as_deref()
            .is_some_and(|d| contains(d, needle))
        || article
            .content
            .as_deref()
            .is_some_and(|c| contains(c, needle))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn sample_article(title: &str, description: Option<&str>) -> Article {
        Article {
            title: title.to_string(),
            description: description.map(str::to_string),
            content: None,
            url: String::new(),
            image: None,
            published_at: None,
            source: Source::default(),
        }
    }

    fn sample_articles() -> Vec<Article> {
        vec![
            sample_article("Cats rule", None),
            sample_article("Dogs drool", Some("about cats too")),
        ]
    }

    #[test]
    fn test_matches_across_title_and_description() {
        let articles = sample_articles();
        let filtered = filter_articles(&articles, "cat");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let articles = sample_articles();
        assert!(filter_articles(&articles, "xyz").is_empty());
    }

    #[test]
    fn test_empty_term_yields_all() {
        let articles = sample_articles();
        assert_eq!(filter_articles(&articles, "").len(), 2);
    }

    #[test]
    fn test_case_insensitive() {
        let articles = sample_articles();
        assert_eq!(filter_articles(&articles, "CAT").len(), 2);
        assert_eq!(filter_articles(&articles, "dOgS").len(), 1);
    }

    #[test]
    fn test_matches_content_field() {
        let mut article = sample_article("Title", None);
        article.content = Some("body text about ferrets".to_string());
        let articles = vec![article];
        assert_eq!(filter_articles(&articles, "ferret").len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let articles = sample_articles();
        let once: Vec<Article> = filter_articles(&articles, "cat")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_articles(&once, "cat");
        assert_eq!(twice.len(), once.len());
        assert!(twice.iter().zip(once.iter()).all(|(a, b)| *a == b));
    }
}
