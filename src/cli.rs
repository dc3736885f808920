//! Command-line interface definitions for Tech Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can be provided via command-line flags or environment
//! variables.

use clap::Parser;

/// Command-line arguments for the Tech Digest generator.
///
/// # Examples
///
/// ```sh
/// # Generate today's daily digest plus the last completed week and month
/// tech_digest -o ./digests
///
/// # Retroactively populate trailing periods after adding a source
/// tech_digest -o ./digests --backfill
///
/// # Use a custom lexicon and a stricter score threshold
/// tech_digest -o ./digests --lexicon ./lexicon.yaml --min-score 5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for digest JSON files and the index
    #[arg(short, long, default_value = "./digests")]
    pub output_dir: String,

    /// Optional YAML file overriding the built-in lexicon
    #[arg(short, long, env = "TECH_DIGEST_LEXICON")]
    pub lexicon: Option<String>,

    /// Override the minimum relevance score an article needs to enter a digest
    #[arg(long, env = "TECH_DIGEST_MIN_SCORE")]
    pub min_score: Option<u32>,

    /// Also generate digests for trailing periods of every granularity
    #[arg(long)]
    pub backfill: bool,

    /// Trailing daily windows generated in backfill mode
    #[arg(long, default_value_t = crate::window::DEFAULT_BACKFILL_DAYS)]
    pub backfill_days: usize,

    /// Trailing weekly windows generated in backfill mode
    #[arg(long, default_value_t = crate::window::DEFAULT_BACKFILL_WEEKS)]
    pub backfill_weeks: usize,

    /// Trailing monthly windows generated in backfill mode
    #[arg(long, default_value_t = crate::window::DEFAULT_BACKFILL_MONTHS)]
    pub backfill_months: usize,
}
