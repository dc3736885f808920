//! Relevance scoring for articles.
//!
//! The scorer walks the lexicon tables over a lowercase haystack built from
//! the title and the first 500 characters of the description, accumulating a
//! weighted score and a short list of matched-term reasons:
//!
//! | Pass | Weight |
//! |------|--------|
//! | Company name in title or body | +2 |
//! | High-impact keyword | +3 |
//! | Relevant topic | +1 |
//! | Priority-1 source | +1 (no reason entry) |
//! | Company name in the title | +2 again |
//!
//! Company names found in the title score the company weight a second time on
//! top of the haystack pass: headline mentions are deliberately weighted twice
//! as heavily as body mentions.
//!
//! An exclusion-pattern match on the title short-circuits everything: the
//! article scores 0 with the single reason `"excluded"`, no matter how many
//! keywords also appear.
//!
//! Matching is case-insensitive, unanchored substring search with no stemming,
//! so short terms can match inside longer words ("ai" inside "openai").

use crate::lexicon::Lexicon;
use crate::models::Article;

/// Points per company-name match.
const COMPANY_WEIGHT: u32 = 2;
/// Points per high-impact keyword match.
const HIGH_IMPACT_WEIGHT: u32 = 3;
/// Points per relevant-topic match.
const TOPIC_WEIGHT: u32 = 1;
/// Flat bonus for priority-1 sources.
const PRIORITY_BONUS: u32 = 1;
/// Extra points per company name appearing in the title itself.
const TITLE_MENTION_BONUS: u32 = 2;
/// Reasons are truncated to this many entries, in match order.
const MAX_REASONS: usize = 5;

/// How many description characters participate in the haystack.
const DESCRIPTION_SCAN_CHARS: usize = 500;

/// A scoring result: the weighted score and the matched terms behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    /// Weighted relevance score; 0 means excluded or no matches.
    pub score: u32,
    /// Up to five matched terms in first-match order, or `["excluded"]`.
    pub reasons: Vec<String>,
}

/// Scores articles against a lexicon.
pub struct Scorer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Scorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Scorer { lexicon }
    }

    /// Score one article.
    ///
    /// Never fails: an empty or missing description simply contributes
    /// nothing to the haystack.
    pub fn score(&self, article: &Article) -> Relevance {
        if self.lexicon.is_excluded(&article.title) {
            return Relevance {
                score: 0,
                reasons: vec!["excluded".to_string()],
            };
        }

        let title = article.title.to_lowercase();
        let body: String = article
            .description
            .chars()
            .take(DESCRIPTION_SCAN_CHARS)
            .collect::<String>()
            .to_lowercase();
        let haystack = format!("{} {}", title, body);

        let mut score = 0;
        let mut reasons: Vec<String> = Vec::new();

        for term in &self.lexicon.companies {
            if haystack.contains(term.as_str()) {
                score += COMPANY_WEIGHT;
                push_reason(&mut reasons, term);
            }
        }
        for term in &self.lexicon.high_impact {
            if haystack.contains(term.as_str()) {
                score += HIGH_IMPACT_WEIGHT;
                push_reason(&mut reasons, term);
            }
        }
        for term in &self.lexicon.topics {
            if haystack.contains(term.as_str()) {
                score += TOPIC_WEIGHT;
                push_reason(&mut reasons, term);
            }
        }

        if article.priority == 1 {
            score += PRIORITY_BONUS;
        }

        // Second company pass over the title alone.
        for term in &self.lexicon.companies {
            if title.contains(term.as_str()) {
                score += TITLE_MENTION_BONUS;
            }
        }

        reasons.truncate(MAX_REASONS);
        Relevance { score, reasons }
    }
}

fn push_reason(reasons: &mut Vec<String>, term: &str) {
    if !reasons.iter().any(|r| r == term) {
        reasons.push(term.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{CategoryConfig, Lexicon, LexiconConfig};

    fn article(title: &str, description: &str, priority: u8) -> Article {
        Article {
            title: title.to_string(),
            link: "https://example.com/a".to_string(),
            description: description.to_string(),
            published: None,
            source: "Test".to_string(),
            priority,
        }
    }

    fn tiny_lexicon() -> Lexicon {
        Lexicon::from_config(LexiconConfig {
            companies: vec!["acme".to_string(), "globex".to_string()],
            high_impact: vec!["merger".to_string()],
            topics: vec!["widget".to_string()],
            exclusions: vec![r"\bsponsored\b".to_string()],
            categories: vec![CategoryConfig {
                key: "misc".to_string(),
                label: "Misc".to_string(),
                keywords: vec!["widget".to_string()],
            }],
            min_relevance_score: None,
        })
        .unwrap()
    }

    #[test]
    fn test_gpt5_announcement_scores_ten() {
        let lexicon = Lexicon::builtin();
        let scorer = Scorer::new(&lexicon);
        let result = scorer.score(&article("OpenAI announces GPT-5, stock jumps", "", 1));

        // openai company (+2), gpt-5 high-impact (+3), topics "ai" inside
        // "openai" (+1) and "stock" (+1), priority bonus (+1), openai title
        // mention (+2)
        assert_eq!(result.score, 10);
        assert_eq!(result.reasons, vec!["openai", "gpt-5", "ai", "stock"]);
    }

    #[test]
    fn test_exclusion_dominates_keyword_matches() {
        let lexicon = Lexicon::builtin();
        let scorer = Scorer::new(&lexicon);
        // Packed with companies and high-impact terms, but the exclusion wins.
        let result = scorer.score(&article(
            "Best Black Friday deals on laptops from Apple, Microsoft and Nvidia",
            "Billion dollar acquisition of OpenAI announced during the sale.",
            1,
        ));
        assert_eq!(result.score, 0);
        assert_eq!(result.reasons, vec!["excluded"]);
    }

    #[test]
    fn test_title_mentions_are_double_weighted() {
        let lexicon = tiny_lexicon();
        let scorer = Scorer::new(&lexicon);

        let in_title = scorer.score(&article("Acme ships a thing", "", 3));
        let in_body = scorer.score(&article("Company ships a thing", "Acme ships it.", 3));

        // Haystack pass gives both +2; the title pass adds +2 more.
        assert_eq!(in_title.score, 4);
        assert_eq!(in_body.score, 2);
        assert_eq!(in_title.reasons, vec!["acme"]);
        assert_eq!(in_body.reasons, vec!["acme"]);
    }

    #[test]
    fn test_priority_one_bonus() {
        let lexicon = tiny_lexicon();
        let scorer = Scorer::new(&lexicon);

        let high = scorer.score(&article("Globex widget news", "", 1));
        let low = scorer.score(&article("Globex widget news", "", 2));

        assert_eq!(high.score, low.score + 1);
        // The priority bonus leaves no reason entry.
        assert_eq!(high.reasons, low.reasons);
    }

    #[test]
    fn test_reasons_capped_at_five_in_match_order() {
        let lexicon = Lexicon::builtin();
        let scorer = Scorer::new(&lexicon);
        let result = scorer.score(&article(
            "Google, Apple, Microsoft, Amazon and Meta face antitrust lawsuit over cloud and ai privacy",
            "",
            2,
        ));
        assert_eq!(result.reasons.len(), 5);
        // Companies come before high-impact keywords and topics.
        assert_eq!(
            result.reasons,
            vec!["google", "apple", "microsoft", "amazon", "meta"]
        );
        assert!(result.score > 10);
    }

    #[test]
    fn test_description_contributes_beyond_title() {
        let lexicon = tiny_lexicon();
        let scorer = Scorer::new(&lexicon);

        let bare = scorer.score(&article("Quarterly update", "", 3));
        let with_body = scorer.score(&article("Quarterly update", "A Globex merger.", 3));

        assert_eq!(bare.score, 0);
        assert!(bare.reasons.is_empty());
        assert_eq!(with_body.score, 5);
        assert_eq!(with_body.reasons, vec!["globex", "merger"]);
    }

    #[test]
    fn test_description_scan_stops_at_500_chars() {
        let lexicon = tiny_lexicon();
        let scorer = Scorer::new(&lexicon);

        let padding = "x".repeat(500);
        let result = scorer.score(&article(
            "Quarterly update",
            &format!("{}merger", padding),
            3,
        ));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let lexicon = tiny_lexicon();
        let scorer = Scorer::new(&lexicon);
        let result = scorer.score(&article("GLOBEX-ACME MERGER TALKS", "", 3));
        // globex +2, acme +2, merger +3, both companies in title +2 each
        assert_eq!(result.score, 11);
        assert_eq!(result.reasons, vec!["acme", "globex", "merger"]);
    }

    #[test]
    fn test_duplicate_terms_counted_once_per_pass() {
        let lexicon = tiny_lexicon();
        let scorer = Scorer::new(&lexicon);
        let result = scorer.score(&article("Widget widget widget", "More widget talk.", 3));
        // Substring presence is boolean per term, not per occurrence.
        assert_eq!(result.score, 1);
        assert_eq!(result.reasons, vec!["widget"]);
    }
}
