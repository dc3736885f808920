//! Data models for feed articles, scored articles, and digests.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: Raw article data as parsed from an RSS feed
//! - [`ScoredArticle`]: Article plus relevance score, matched keywords, and category
//! - [`Digest`]: One generated digest for a daily, weekly, or monthly window
//! - [`DigestSummary`] / [`DigestIndex`]: Lightweight index records for navigation
//!
//! JSON field names are camelCase (`rename_all`) to match the schema consumed
//! by the static-page renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw article as parsed from one RSS feed item.
///
/// Articles are immutable once fetched. Scoring and categorization never
/// modify them; they produce a derived [`ScoredArticle`] instead.
///
/// # Fields
///
/// * `published` - `None` when the feed item carried no parseable date.
///   Such articles fall outside every digest window (the date comparison
///   fails closed).
/// * `priority` - Source quality tier, 1 (high) through 3 (low). Priority-1
///   sources earn a flat scoring bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Item description, reduced to plain text. May be empty.
    #[serde(default)]
    pub description: String,
    /// Publication timestamp, if the feed provided a parseable one.
    pub published: Option<DateTime<Utc>>,
    /// Name of the feed source this article came from.
    pub source: String,
    /// Source quality tier: 1 (high), 2, or 3 (low).
    pub priority: u8,
}

/// An article after relevance scoring and categorization.
///
/// Derived from an [`Article`], never mutated after creation. The article
/// fields are flattened into the same JSON object as the scoring fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    /// The underlying article, flattened into this record on serialization.
    #[serde(flatten)]
    pub article: Article,
    /// Heuristic relevance score. Zero means excluded.
    pub relevance_score: u32,
    /// Up to five matched lexicon terms, in first-match order
    /// (companies before high-impact keywords before topics).
    pub matched_keywords: Vec<String>,
    /// Best-fit category key, or `None` when no category keyword matched.
    pub category: Option<String>,
}

/// The granularity of a digest window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    Daily,
    Weekly,
    Monthly,
}

impl DigestKind {
    /// All kinds in generation order.
    pub const ALL: [DigestKind; 3] = [DigestKind::Daily, DigestKind::Weekly, DigestKind::Monthly];

    /// Lowercase name, used for output subdirectories and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestKind::Daily => "daily",
            DigestKind::Weekly => "weekly",
            DigestKind::Monthly => "monthly",
        }
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated digest: the top stories for a single time window.
///
/// # Invariants
///
/// - `highlights` holds at most ten articles, sorted by descending
///   `relevance_score`, and is a prefix of the full deduplicated list.
/// - Every article in `by_category` carries `category == Some(bucket key)`.
/// - `total_articles` counts the full deduplicated list, before the
///   highlight truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    /// Canonical period identifier, e.g. `26-02-05`, `26-6`, or `26-02`.
    pub id: String,
    /// Window granularity.
    #[serde(rename = "type")]
    pub kind: DigestKind,
    /// Human-readable digest title.
    pub title: String,
    /// Human-readable label for the covered period.
    pub date_range: String,
    /// When this digest was generated.
    pub generated_at: DateTime<Utc>,
    /// The top qualifying articles, score-descending, at most ten.
    pub highlights: Vec<ScoredArticle>,
    /// Categorized partition of the full deduplicated article list.
    pub by_category: BTreeMap<String, Vec<ScoredArticle>>,
    /// Count of qualifying articles after filtering and deduplication.
    pub total_articles: usize,
}

impl Digest {
    /// Project this digest down to its index record.
    pub fn summary(&self) -> DigestSummary {
        DigestSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            date_range: self.date_range.clone(),
            total_articles: self.total_articles,
            highlight_count: self.highlights.len(),
        }
    }
}

/// Lightweight per-digest record stored in the master index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestSummary {
    pub id: String,
    pub title: String,
    pub date_range: String,
    pub total_articles: usize,
    pub highlight_count: usize,
}

/// The master index of all published digests, grouped by kind.
///
/// Each group is kept sorted newest-first. Zero-article digests are never
/// indexed, although their JSON files are still written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestIndex {
    pub last_updated: DateTime<Utc>,
    pub daily: Vec<DigestSummary>,
    pub weekly: Vec<DigestSummary>,
    pub monthly: Vec<DigestSummary>,
}

impl DigestIndex {
    /// An empty index stamped with the current time.
    pub fn new() -> Self {
        DigestIndex {
            last_updated: Utc::now(),
            daily: Vec::new(),
            weekly: Vec::new(),
            monthly: Vec::new(),
        }
    }

    /// The summary group for one digest kind.
    pub fn group_mut(&mut self, kind: DigestKind) -> &mut Vec<DigestSummary> {
        match kind {
            DigestKind::Daily => &mut self.daily,
            DigestKind::Weekly => &mut self.weekly,
            DigestKind::Monthly => &mut self.monthly,
        }
    }
}
