//! Digest assembly: the pipeline from raw articles to one digest record.
//!
//! For a given window, assembly runs in a fixed order:
//!
//! 1. Keep articles whose `published` timestamp falls inside the window
//!    (inclusive at both boundaries; articles without a timestamp are out).
//! 2. Score and categorize each survivor.
//! 3. Drop everything below the minimum relevance score.
//! 4. Stable-sort by score descending, so ties keep fetch order.
//! 5. Collapse near-duplicates; the first (highest-scoring) instance wins.
//! 6. Take the top ten as highlights; partition the *full* deduplicated list
//!    into category buckets; count the full list as `total_articles`.
//!
//! A window with no qualifying articles still yields a digest with empty
//! highlights and buckets. Skipping such digests in the published index is
//! the indexing side's job, not the assembler's.

use crate::categorize::Categorizer;
use crate::dedup::dedup_articles;
use crate::lexicon::Lexicon;
use crate::models::{Article, Digest, ScoredArticle};
use crate::scoring::Scorer;
use crate::window::Window;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Maximum number of highlight articles per digest.
const MAX_HIGHLIGHTS: usize = 10;

/// Assembles digests from raw article lists.
pub struct DigestAssembler<'a> {
    scorer: Scorer<'a>,
    categorizer: Categorizer<'a>,
    min_score: u32,
}

impl<'a> DigestAssembler<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        DigestAssembler {
            scorer: Scorer::new(lexicon),
            categorizer: Categorizer::new(lexicon),
            min_score: lexicon.min_relevance_score,
        }
    }

    /// Build the digest for one window from the full fetched article list.
    pub fn assemble(&self, articles: &[Article], window: &Window) -> Digest {
        let mut scored: Vec<ScoredArticle> = articles
            .iter()
            .filter(|a| {
                a.published
                    .map(|ts| window.contains(ts.naive_utc()))
                    .unwrap_or(false)
            })
            .map(|a| {
                let relevance = self.scorer.score(a);
                ScoredArticle {
                    article: a.clone(),
                    relevance_score: relevance.score,
                    matched_keywords: relevance.reasons,
                    category: self.categorizer.categorize(a),
                }
            })
            .filter(|sa| sa.relevance_score >= self.min_score)
            .collect();

        // Stable sort: equal scores keep fetch order.
        scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        let deduped = dedup_articles(scored);
        let total_articles = deduped.len();

        let mut by_category: BTreeMap<String, Vec<ScoredArticle>> = BTreeMap::new();
        for article in &deduped {
            if let Some(key) = &article.category {
                by_category.entry(key.clone()).or_default().push(article.clone());
            }
        }

        let highlights: Vec<ScoredArticle> = deduped.into_iter().take(MAX_HIGHLIGHTS).collect();

        debug!(
            id = %window.id,
            kind = %window.kind,
            total = total_articles,
            highlights = highlights.len(),
            categories = by_category.len(),
            "Assembled digest"
        );

        Digest {
            id: window.id.clone(),
            kind: window.kind,
            title: window.title.clone(),
            date_range: window.date_range.clone(),
            generated_at: Utc::now(),
            highlights,
            by_category,
            total_articles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DigestKind;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn lexicon() -> Lexicon {
        Lexicon::builtin()
    }

    fn window() -> Window {
        Window::daily(NaiveDate::from_ymd_opt(2026, 2, 5).unwrap())
    }

    fn article(title: &str, hour: u32) -> Article {
        Article {
            title: title.to_string(),
            link: format!("https://example.com/{}", hour),
            description: String::new(),
            published: Some(Utc.with_ymd_and_hms(2026, 2, 5, hour, 0, 0).unwrap()),
            source: "Test".to_string(),
            priority: 2,
        }
    }

    #[test]
    fn test_zero_article_digest_is_still_produced() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);
        let digest = assembler.assemble(&[], &window());

        assert_eq!(digest.id, "26-02-05");
        assert_eq!(digest.kind, DigestKind::Daily);
        assert_eq!(digest.total_articles, 0);
        assert!(digest.highlights.is_empty());
        assert!(digest.by_category.is_empty());
    }

    #[test]
    fn test_articles_outside_window_are_dropped() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        let mut outside = article("Nvidia announces billion dollar acquisition", 12);
        outside.published = Some(Utc.with_ymd_and_hms(2026, 2, 6, 0, 0, 0).unwrap());
        let inside = article("Microsoft cloud outage hits Azure", 12);

        let digest = assembler.assemble(&[outside, inside], &window());
        assert_eq!(digest.total_articles, 1);
        assert_eq!(digest.highlights[0].article.title, "Microsoft cloud outage hits Azure");
    }

    #[test]
    fn test_missing_published_fails_closed() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        let mut dateless = article("Nvidia announces billion dollar acquisition", 12);
        dateless.published = None;

        let digest = assembler.assemble(&[dateless], &window());
        assert_eq!(digest.total_articles, 0);
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        let mut first = article("Nvidia announces billion dollar acquisition", 0);
        first.published = Some(Utc.with_ymd_and_hms(2026, 2, 5, 0, 0, 0).unwrap());
        let mut last = article("Microsoft cloud outage hits Azure", 23);
        last.published = Some(
            Utc.with_ymd_and_hms(2026, 2, 5, 23, 59, 59).unwrap() + chrono::Duration::milliseconds(999),
        );

        let digest = assembler.assemble(&[first, last], &window());
        assert_eq!(digest.total_articles, 2);
    }

    #[test]
    fn test_below_threshold_articles_are_filtered() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        // "quantum" alone is a single topic hit: score 1, under the threshold.
        let weak = article("A quantum leap for niche startups nobody covers", 9);
        let digest = assembler.assemble(&[weak], &window());
        assert_eq!(digest.total_articles, 0);

        for bucket in digest.by_category.values() {
            for a in bucket {
                assert!(a.relevance_score >= lexicon.min_relevance_score);
            }
        }
    }

    #[test]
    fn test_highlights_sorted_by_score_descending() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        let articles = vec![
            article("Apple updates its browser", 8),
            article("Nvidia announces billion dollar acquisition of chip startup", 9),
            article("Microsoft cloud outage hits Azure", 10),
        ];
        let digest = assembler.assemble(&articles, &window());

        assert!(digest.highlights.len() >= 2);
        for pair in digest.highlights.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        assert_eq!(
            digest.highlights[0].article.title,
            "Nvidia announces billion dollar acquisition of chip startup"
        );
    }

    #[test]
    fn test_highlights_capped_at_ten_but_total_counts_all() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        // Distinct "countN" words keep every signature unique.
        let articles: Vec<Article> = (0..13)
            .map(|i| {
                article(
                    &format!("Google antitrust ruling count{} shakes markets", i),
                    (i % 24) as u32,
                )
            })
            .collect();

        let digest = assembler.assemble(&articles, &window());
        assert_eq!(digest.total_articles, 13);
        assert_eq!(digest.highlights.len(), 10);
    }

    #[test]
    fn test_dedup_keeps_highest_scoring_instance() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        // Same story twice; the priority-1 copy scores one point higher.
        let mut strong = article("Tesla unveils new robotaxi design", 9);
        strong.priority = 1;
        strong.source = "TechCrunch".to_string();
        let weak = Article {
            title: "New design: Tesla unveils robotaxi".to_string(),
            ..article("x", 10)
        };

        let digest = assembler.assemble(&[weak, strong.clone()], &window());
        assert_eq!(digest.total_articles, 1);
        assert_eq!(digest.highlights[0].article.source, "TechCrunch");
    }

    #[test]
    fn test_by_category_partition_is_consistent() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        let articles = vec![
            article("OpenAI trains new machine learning chatbot", 8),
            article("Microsoft cloud outage hits Azure", 9),
            article("Nvidia announces billion dollar acquisition of chip startup", 10),
        ];
        let digest = assembler.assemble(&articles, &window());

        for (key, bucket) in &digest.by_category {
            assert!(!bucket.is_empty());
            for a in bucket {
                assert_eq!(a.category.as_deref(), Some(key.as_str()));
            }
        }
    }

    #[test]
    fn test_by_category_covers_full_list_not_just_highlights() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);

        let articles: Vec<Article> = (0..12)
            .map(|i| {
                article(
                    &format!("Microsoft cloud outage count{} hits Azure", i),
                    (i % 24) as u32,
                )
            })
            .collect();

        let digest = assembler.assemble(&articles, &window());
        assert_eq!(digest.total_articles, 12);
        assert_eq!(digest.highlights.len(), 10);

        let bucketed: usize = digest.by_category.values().map(|b| b.len()).sum();
        assert_eq!(bucketed, 12);
    }

    #[test]
    fn test_assembly_is_idempotent_for_same_input() {
        let lexicon = lexicon();
        let assembler = DigestAssembler::new(&lexicon);
        let articles = vec![
            article("OpenAI trains new machine learning chatbot", 8),
            article("Nvidia announces billion dollar acquisition of chip startup", 10),
        ];

        let first = assembler.assemble(&articles, &window());
        let second = assembler.assemble(&articles, &window());
        assert_eq!(first.id, second.id);
        assert_eq!(first.date_range, second.date_range);
        assert_eq!(first.highlights, second.highlights);
        assert_eq!(first.by_category, second.by_category);
        assert_eq!(first.total_articles, second.total_articles);
    }
}
