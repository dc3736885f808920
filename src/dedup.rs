//! Near-duplicate collapsing for scored articles.
//!
//! The same story usually arrives from several sources with reworded
//! headlines. Rather than exact-title matching, each title is reduced to a
//! cheap signature: lowercase, punctuation stripped, words of three or fewer
//! characters dropped, the rest sorted, and the first five joined. Titles
//! that are permutations of the same significant words collapse to one
//! signature regardless of word order or punctuation.
//!
//! Only the first article per signature survives. Callers pre-sort by
//! descending relevance score, so the survivor is the highest-scoring
//! instance of the story.
//!
//! Short generic titles can produce false-positive collisions; that is the
//! accepted cost of the approximation.

use crate::models::ScoredArticle;
use itertools::Itertools;

/// Words at or below this length are dropped from signatures.
const MIN_SIGNIFICANT_WORD_LEN: usize = 3;
/// Signatures keep at most this many words.
const SIGNATURE_WORDS: usize = 5;

/// Reduce a title to its dedup signature.
pub fn title_signature(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() > MIN_SIGNIFICANT_WORD_LEN)
        .sorted()
        .take(SIGNATURE_WORDS)
        .join("-")
}

/// Drop articles whose title signature was already seen, preserving the
/// relative order of survivors.
pub fn dedup_articles(articles: Vec<ScoredArticle>) -> Vec<ScoredArticle> {
    articles
        .into_iter()
        .unique_by(|a| title_signature(&a.article.title))
        .collect()
}
