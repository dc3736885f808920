//! The lexicon: keyword tables driving scoring and categorization.
//!
//! A [`Lexicon`] is an explicitly constructed, immutable configuration object.
//! It is built once at startup and passed by reference into the scorer and
//! categorizer, so tests can substitute smaller tables and nothing reads
//! hidden global state.
//!
//! # Tables
//!
//! - **Companies**: big-tech company names, worth 2 points per mention
//!   (doubled again for title mentions).
//! - **High-impact keywords**: event terms like "acquisition" or "layoffs",
//!   worth 3 points each.
//! - **Relevant topics**: broader technology terms, worth 1 point each.
//! - **Exclusion patterns**: case-insensitive regular expressions over the
//!   title. One match zeroes the article's score outright.
//! - **Categories**: an *ordered* list of category keyword sets. The order is
//!   the tie-break order for categorization, so it is part of the contract.
//!
//! All matching is lowercase substring search, so every table entry is
//! normalized to lowercase at construction time.

use regex::RegexSet;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing::info;

/// Default minimum relevance score an article needs to enter a digest.
pub const DEFAULT_MIN_RELEVANCE_SCORE: u32 = 3;

/// One category: a stable key, a display label, and its keyword set.
#[derive(Debug, Clone)]
pub struct Category {
    /// Stable key used in digest JSON (e.g. `"ai"`).
    pub key: String,
    /// Human-readable label for rendered pages.
    pub label: String,
    /// Lowercase keywords counted as substring hits.
    pub keywords: Vec<String>,
}

/// Immutable keyword tables plus the minimum-score tunable.
#[derive(Debug)]
pub struct Lexicon {
    /// Big-tech company names, lowercase.
    pub companies: Vec<String>,
    /// High-impact event keywords, lowercase.
    pub high_impact: Vec<String>,
    /// Broader relevant-topic keywords, lowercase.
    pub topics: Vec<String>,
    /// Categories in tie-break order.
    pub categories: Vec<Category>,
    /// Articles scoring below this never enter a digest.
    pub min_relevance_score: u32,
    exclusions: RegexSet,
}

/// Serde shape of a lexicon YAML file.
///
/// Every table is required except `min_relevance_score`, which falls back to
/// [`DEFAULT_MIN_RELEVANCE_SCORE`].
#[derive(Debug, Deserialize)]
pub struct LexiconConfig {
    pub companies: Vec<String>,
    pub high_impact: Vec<String>,
    pub topics: Vec<String>,
    pub exclusions: Vec<String>,
    pub categories: Vec<CategoryConfig>,
    pub min_relevance_score: Option<u32>,
}

/// Serde shape of one category entry in a lexicon YAML file.
#[derive(Debug, Deserialize)]
pub struct CategoryConfig {
    pub key: String,
    pub label: String,
    pub keywords: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from a parsed configuration.
    ///
    /// Keywords are lowercased; exclusion patterns are compiled into a single
    /// case-insensitive [`RegexSet`].
    ///
    /// # Errors
    ///
    /// Returns an error if any exclusion pattern fails to compile.
    pub fn from_config(config: LexiconConfig) -> Result<Self, regex::Error> {
        let patterns: Vec<String> = config
            .exclusions
            .iter()
            .map(|p| format!("(?i){}", p))
            .collect();
        let exclusions = RegexSet::new(&patterns)?;

        Ok(Lexicon {
            companies: lowercase_all(config.companies),
            high_impact: lowercase_all(config.high_impact),
            topics: lowercase_all(config.topics),
            categories: config
                .categories
                .into_iter()
                .map(|c| Category {
                    key: c.key,
                    label: c.label,
                    keywords: lowercase_all(c.keywords),
                })
                .collect(),
            min_relevance_score: config
                .min_relevance_score
                .unwrap_or(DEFAULT_MIN_RELEVANCE_SCORE),
            exclusions,
        })
    }

    /// Load a lexicon from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path)?;
        let config: LexiconConfig = serde_yaml::from_str(&raw)?;
        let lexicon = Lexicon::from_config(config)?;
        info!(
            path,
            companies = lexicon.companies.len(),
            categories = lexicon.categories.len(),
            "Loaded lexicon from file"
        );
        Ok(lexicon)
    }

    /// The built-in tables shipped with the binary.
    pub fn builtin() -> Self {
        Lexicon::from_config(builtin_config()).expect("built-in exclusion patterns compile")
    }

    /// Whether a title matches any exclusion pattern.
    pub fn is_excluded(&self, title: &str) -> bool {
        self.exclusions.is_match(title)
    }
}

fn lowercase_all(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

fn builtin_config() -> LexiconConfig {
    LexiconConfig {
        companies: to_strings(&[
            "google", "alphabet", "apple", "microsoft", "amazon", "meta", "facebook",
            "instagram", "whatsapp", "openai", "anthropic", "deepmind", "nvidia", "intel",
            "amd", "qualcomm", "tesla", "spacex", "netflix", "samsung", "tiktok", "bytedance",
            "oracle", "ibm", "salesforce", "uber", "twitter",
        ]),
        high_impact: to_strings(&[
            "acquisition", "acquires", "merger", "antitrust", "lawsuit", "regulation",
            "layoffs", "billion", "ipo", "funding round", "data breach", "outage",
            "gpt-5", "superintelligence", "export controls",
        ]),
        topics: to_strings(&[
            "ai", "artificial intelligence", "machine learning", "cloud", "chip",
            "semiconductor", "privacy", "security", "quantum", "robotics", "self-driving",
            "electric vehicle", "smartphone", "app store", "social media", "streaming",
            "search engine", "browser", "data center", "stock",
        ]),
        exclusions: to_strings(&[
            r"black friday",
            r"cyber monday",
            r"prime day",
            r"\bdeals?\b",
            r"\bsale\b",
            r"\bdiscount",
            r"\bcoupon",
            r"\bhow to\b",
            r"\breview\b",
            r"\bhands-on\b",
            r"\bunboxing\b",
            r"\btop \d+\b",
            r"\bbest\b.*\b(laptops?|phones?|tvs?|headphones|gifts?)\b",
            r"minor (update|release)",
            r"\bpatch notes\b",
            r"you won'?t believe",
            r"\bhere'?s why\b",
        ]),
        categories: vec![
            category("ai", "Artificial Intelligence", &[
                "ai", "artificial intelligence", "machine learning", "llm", "chatbot",
                "gpt", "neural", "openai", "anthropic", "deepmind",
            ]),
            category("hardware", "Hardware & Chips", &[
                "chip", "semiconductor", "processor", "gpu", "hardware", "device",
                "smartphone", "laptop", "foundry", "nvidia", "intel", "qualcomm",
            ]),
            category("cloud", "Cloud & Enterprise", &[
                "cloud", "aws", "azure", "data center", "datacenter", "saas",
                "enterprise", "server", "kubernetes",
            ]),
            category("social", "Social & Media", &[
                "social media", "tiktok", "instagram", "facebook", "streaming",
                "creator", "moderation", "subscribers",
            ]),
            category("policy", "Policy & Regulation", &[
                "antitrust", "regulation", "regulator", "lawsuit", "privacy", "gdpr",
                "congress", "senate", "ftc", "doj", "european commission", "fine",
            ]),
            category("business", "Business & Markets", &[
                "acquisition", "merger", "ipo", "funding", "revenue", "earnings",
                "stock", "billion", "startup", "valuation", "layoffs",
            ]),
        ],
        min_relevance_score: Some(DEFAULT_MIN_RELEVANCE_SCORE),
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn category(key: &str, label: &str, keywords: &[&str]) -> CategoryConfig {
    CategoryConfig {
        key: key.to_string(),
        label: label.to_string(),
        keywords: to_strings(keywords),
    }
}
