//! Feed fetching: the fixed source table and concurrent RSS collection.
//!
//! Every run pulls the same fixed list of technology news feeds. Each source
//! carries a priority tier (1 = high) that later feeds the scorer's
//! source-quality bonus.
//!
//! # Failure policy
//!
//! A source that fails to download or parse is logged and skipped; the run
//! continues with whatever the remaining sources produced. The scoring and
//! assembly pipeline only ever sees the merged article list, never a
//! partial-failure signal.

pub mod fetch;
pub mod rss;

use crate::models::Article;
use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument};

/// How many feeds download concurrently.
const PARALLEL_FEEDS: usize = 6;

/// One configured feed source.
#[derive(Debug, Clone, Copy)]
pub struct FeedSource {
    /// Display name, recorded on every article from this feed.
    pub name: &'static str,
    /// RSS feed URL.
    pub url: &'static str,
    /// Source quality tier: 1 (high), 2, or 3 (low).
    pub priority: u8,
}

/// The fixed technology-news source list.
pub const SOURCES: &[FeedSource] = &[
    FeedSource { name: "TechCrunch", url: "https://techcrunch.com/feed/", priority: 1 },
    FeedSource { name: "Ars Technica", url: "https://feeds.arstechnica.com/arstechnica/technology-lab", priority: 1 },
    FeedSource { name: "The Verge", url: "https://www.theverge.com/rss/frontpage", priority: 1 },
    FeedSource { name: "Wired", url: "https://www.wired.com/feed/category/business/latest/rss", priority: 2 },
    FeedSource { name: "Engadget", url: "https://www.engadget.com/rss.xml", priority: 2 },
    FeedSource { name: "9to5Mac", url: "https://9to5mac.com/feed/", priority: 2 },
    FeedSource { name: "ZDNet", url: "https://www.zdnet.com/news/rss.xml", priority: 3 },
    FeedSource { name: "GeekWire", url: "https://www.geekwire.com/feed/", priority: 3 },
];

/// Fetch and parse every configured feed concurrently.
///
/// Returns the flattened article list across all sources. Failed sources
/// contribute nothing; the merge order across sources is whatever completion
/// order the fan-out produced.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all() -> Vec<Article> {
    let articles: Vec<Article> = stream::iter(SOURCES.iter())
        .map(|source| async move {
            match fetch::fetch_feed(source).await {
                Ok(articles) => {
                    info!(source = source.name, count = articles.len(), "Fetched feed");
                    articles
                }
                Err(e) => {
                    error!(source = source.name, error = %e, "Feed fetch failed; skipping source");
                    Vec::new()
                }
            }
        })
        .buffer_unordered(PARALLEL_FEEDS)
        .collect::<Vec<Vec<Article>>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    info!(count = articles.len(), sources = SOURCES.len(), "Merged articles from all feeds");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_table_priorities_are_valid() {
        assert!(!SOURCES.is_empty());
        for source in SOURCES {
            assert!((1..=3).contains(&source.priority), "bad priority for {}", source.name);
            assert!(source.url.starts_with("https://"), "bad url for {}", source.name);
        }
    }

    #[test]
    fn test_source_names_are_unique() {
        let mut names: Vec<&str> = SOURCES.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SOURCES.len());
    }

    #[test]
    fn test_at_least_one_priority_one_source() {
        assert!(SOURCES.iter().any(|s| s.priority == 1));
    }
}
