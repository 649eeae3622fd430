//! Client-side fetch → filter pipeline.
//!
//! - `feed`: view-model state machine and the async fetch driver
//! - `filter`: pure substring filtering over the in-memory article list

pub mod feed;
pub mod filter;

pub use feed::{FeedState, FetchResult, NewsFeed};
pub use filter::filter_articles;
