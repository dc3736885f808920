//! Category assignment for articles.
//!
//! Each category's keywords are counted as case-insensitive substring hits
//! over the title and full description. The category with the strictly
//! highest hit count wins; on a tie the earliest category in the lexicon's
//! ordered list keeps the win. Zero hits everywhere means no category.
//!
//! Categorization runs independently of scoring: an article can score highly
//! yet land in no category, and a low-scoring article can carry a category
//! and still be filtered out downstream.

use crate::lexicon::Lexicon;
use crate::models::Article;

/// Assigns at most one best-fit category per article.
pub struct Categorizer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Categorizer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Categorizer { lexicon }
    }

    /// The best-fit category key for an article, if any keyword hit at all.
    pub fn categorize(&self, article: &Article) -> Option<String> {
        let haystack = format!("{} {}", article.title, article.description).to_lowercase();

        let mut best: Option<(&str, usize)> = None;
        for category in &self.lexicon.categories {
            let hits = category
                .keywords
                .iter()
                .filter(|k| haystack.contains(k.as_str()))
                .count();
            if hits == 0 {
                continue;
            }
            // Strictly greater only: ties keep the earlier category.
            match best {
                Some((_, top)) if hits <= top => {}
                _ => best = Some((category.key.as_str(), hits)),
            }
        }

        best.map(|(key, _)| key.to_string())
    }
}
