// src/pipeline/feed.rs

//! Feed view-model: fetch state machine and async fetch driver.
//!
//! The state machine cycles `Loading → {Success | Failure} → Loading → …`
//! for the lifetime of the feed; there is no terminal state. Every fetch
//! carries a monotonically increasing sequence number, and an outcome is
//! discarded unless its sequence number is the latest issued, so a stale
//! response can never overwrite fresher state regardless of arrival order.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::{Article, Category, QueryParams};
use crate::pipeline::filter::filter_articles;
use crate::services::HeadlineSource;

/// Result of the most recent fetch cycle.
///
/// Exactly one variant holds at a time; the feed is never simultaneously
/// loading and failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// A request is in flight
    Loading,
    /// The last request completed with these articles
    Success(Vec<Article>),
    /// The last request failed with this message
    Failure(String),
}

/// Synchronous feed state. All transitions are pure and instantaneous.
#[derive(Debug)]
pub struct FeedState {
    result: FetchResult,
    category: Category,
    search: String,
    latest_seq: u64,
}

impl FeedState {
    /// Create the initial state. The feed starts Loading because the first
    /// fetch begins immediately on first use.
    pub fn new(category: Category) -> Self {
        Self {
            result: FetchResult::Loading,
            category,
            search: String::new(),
            latest_seq: 0,
        }
    }

    /// Start a new fetch cycle.
    ///
    /// Bumps the sequence number, enters Loading, and returns the sequence
    /// the caller must present when applying the outcome.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_seq += 1;
        self.result = FetchResult::Loading;
        self.latest_seq
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns false (and changes nothing) when `seq` is not the latest
    /// issued sequence number. The stored result is replaced wholesale;
    /// there is no incremental merge with prior articles.
    pub fn apply(&mut self, seq: u64, outcome: Result<Vec<Article>>) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.result = match outcome {
            Ok(articles) => FetchResult::Success(articles),
            Err(err) => FetchResult::Failure(err.to_string()),
        };
        true
    }

    /// Replace the search term. Filtering is derived, so nothing else moves.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the selected category. Returns true when it actually changed.
    pub fn set_category(&mut self, category: Category) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        true
    }

    /// Currently selected category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Current fetch result.
    pub fn result(&self) -> &FetchResult {
        &self.result
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.result, FetchResult::Loading)
    }

    /// The failure message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        match &self.result {
            FetchResult::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// The fetched articles with the current search filter applied.
    ///
    /// Empty while loading or failed; never mutates the stored list.
    pub fn visible(&self) -> Vec<&Article> {
        match &self.result {
            FetchResult::Success(articles) => filter_articles(articles, &self.search),
            _ => Vec::new(),
        }
    }
}

/// Async driver around [`FeedState`].
///
/// Owns the headline source and the in-flight fetch task. Issuing a new
/// fetch aborts the previous task instead of merely ignoring its result,
/// and the sequence guard in [`FeedState::apply`] covers the window where
/// an aborted task has already completed.
pub struct NewsFeed {
    source: Arc<dyn HeadlineSource>,
    state: Arc<Mutex<FeedState>>,
    defaults: QueryParams,
    inflight: Option<JoinHandle<()>>,
}

impl NewsFeed {
    /// Create a feed over the given source.
    ///
    /// `defaults` supplies the category, country, and result limit of the
    /// first fetch; the caller starts it with [`NewsFeed::refresh`].
    pub fn new(source: Arc<dyn HeadlineSource>, defaults: QueryParams) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(FeedState::new(defaults.category))),
            defaults,
            inflight: None,
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().expect("feed state poisoned")
    }

    /// Re-issue the fetch for the current category.
    pub fn refresh(&mut self) {
        self.spawn_fetch();
    }

    /// Select a category, fetching anew when it changed.
    pub fn set_category(&mut self, category: Category) {
        if self.state().set_category(category) {
            self.spawn_fetch();
        }
    }

    /// Replace the search term.
    pub fn set_search(&self, term: impl Into<String>) {
        self.state().set_search(term);
    }

    /// Snapshot of the current fetch result.
    pub fn result(&self) -> FetchResult {
        self.state().result().clone()
    }

    /// Snapshot of the articles visible under the current search term.
    pub fn visible_articles(&self) -> Vec<Article> {
        self.state().visible().into_iter().cloned().collect()
    }

    /// Wait for the in-flight fetch, if any, to settle.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.inflight.take() {
            // An aborted task resolves to a JoinError, which is fine here.
            let _ = handle.await;
        }
    }

    /// Abort any in-flight fetch and start a new one.
    fn spawn_fetch(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        let (seq, params) = {
            let mut state = self.state();
            let seq = state.begin_request();
            let params = QueryParams {
                category: state.category(),
                ..self.defaults.clone()
            };
            (seq, params)
        };

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        self.inflight = Some(tokio::spawn(async move {
            let outcome = source.top_headlines(&params).await;
            let mut state = state.lock().expect("feed state poisoned");
            if !state.apply(seq, outcome) {
                log::debug!("Discarding stale response for request #{seq}");
            }
        }));
    }
}

impl Drop for NewsFeed {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::AppError;
    use crate::models::Source;

    fn sample_article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: None,
            content: None,
            url: format!("https://example.com/{title}"),
            image: None,
            published_at: None,
            source: Source::default(),
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = FeedState::new(Category::General);
        assert!(state.is_loading());
        assert!(state.visible().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_success_transition() {
        let mut state = FeedState::new(Category::General);
        let seq = state.begin_request();
        assert!(state.apply(seq, Ok(vec![sample_article("A")])));
        assert!(!state.is_loading());
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn test_failure_transition() {
        let mut state = FeedState::new(Category::General);
        let seq = state.begin_request();
        assert!(state.apply(seq, Err(AppError::fetch("boom"))));
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("boom"));
        assert!(state.visible().is_empty());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = FeedState::new(Category::General);
        let first = state.begin_request();
        let second = state.begin_request();

        // The older request resolves after the newer one was issued.
        assert!(!state.apply(first, Ok(vec![sample_article("stale")])));
        assert!(state.is_loading());

        assert!(state.apply(second, Ok(vec![sample_article("fresh")])));
        match state.result() {
            FetchResult::Success(articles) => assert_eq!(articles[0].title, "fresh"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_stale_response_after_settled_result_discarded() {
        let mut state = FeedState::new(Category::General);
        let first = state.begin_request();
        let second = state.begin_request();
        assert!(state.apply(second, Ok(vec![sample_article("fresh")])));

        assert!(!state.apply(first, Err(AppError::fetch("late failure"))));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_refresh_reenters_loading() {
        let mut state = FeedState::new(Category::General);
        let seq = state.begin_request();
        state.apply(seq, Err(AppError::fetch("boom")));

        state.begin_request();
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_search_filters_visible() {
        let mut state = FeedState::new(Category::General);
        let seq = state.begin_request();
        state.apply(
            seq,
            Ok(vec![sample_article("Cats rule"), sample_article("Dogs drool")]),
        );

        state.set_search("cats");
        assert_eq!(state.visible().len(), 1);

        state.set_search("");
        assert_eq!(state.visible().len(), 2);
    }

    struct StaticSource(Vec<Article>);

    #[async_trait]
    impl HeadlineSource for StaticSource {
        async fn top_headlines(&self, _params: &QueryParams) -> crate::error::Result<Vec<Article>> {
            Ok(self.0.clone())
        }
    }

    /// Hangs forever on the general category, answers instantly otherwise.
    struct StallingSource;

    #[async_trait]
    impl HeadlineSource for StallingSource {
        async fn top_headlines(&self, params: &QueryParams) -> crate::error::Result<Vec<Article>> {
            if params.category == Category::General {
                std::future::pending().await
            } else {
                Ok(vec![sample_article("Sports win")])
            }
        }
    }

    #[tokio::test]
    async fn test_feed_fetches_on_refresh() {
        let source = Arc::new(StaticSource(vec![sample_article("A")]));
        let mut feed = NewsFeed::new(source, QueryParams::default());

        feed.refresh();
        feed.settled().await;

        assert_eq!(feed.result(), FetchResult::Success(vec![sample_article("A")]));
    }

    #[tokio::test]
    async fn test_category_change_cancels_inflight_fetch() {
        let mut feed = NewsFeed::new(Arc::new(StallingSource), QueryParams::default());

        // First fetch hangs on the general category.
        feed.refresh();

        // Changing category aborts it and issues a fresh request.
        feed.set_category(Category::Sports);
        feed.settled().await;

        match feed.result() {
            FetchResult::Success(articles) => assert_eq!(articles[0].title, "Sports win"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_applies_to_fetched_articles() {
        let source = Arc::new(StaticSource(vec![
            sample_article("Cats rule"),
            sample_article("Dogs drool"),
        ]));
        let mut feed = NewsFeed::new(source, QueryParams::default());

        feed.refresh();
        feed.settled().await;

        feed.set_search("dogs");
        let visible = feed.visible_articles();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Dogs drool");
    }
}
