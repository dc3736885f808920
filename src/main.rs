//! # Tech Digest
//!
//! A news digestion pipeline that pulls RSS feeds from a fixed list of
//! technology sources, scores each article for big-tech relevance with
//! keyword heuristics, collapses near-duplicate stories, groups the
//! survivors into categories, and writes daily, weekly, and monthly digest
//! JSON files plus a master index for a static-page renderer.
//!
//! ## Usage
//!
//! ```sh
//! tech_digest -o ./digests
//! tech_digest -o ./digests --backfill
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download and parse all configured RSS feeds (concurrent)
//! 2. **Windowing**: Pick the target period per granularity, or the trailing
//!    periods in backfill mode
//! 3. **Assembly**: Filter by window, score, categorize, threshold,
//!    deduplicate, and bucket each window's articles into a digest
//! 4. **Output**: Write one JSON file per digest and update `index.json`

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod categorize;
mod cli;
mod dedup;
mod digest;
mod feeds;
mod lexicon;
mod models;
mod outputs;
mod scoring;
mod utils;
mod window;

use cli::Cli;
use digest::DigestAssembler;
use lexicon::Lexicon;
use models::{Digest, DigestKind};
use outputs::{indexes, json};
use utils::ensure_writable_dir;
use window::{Window, backfill_windows, target_window};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("tech_digest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, backfill = args.backfill, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Lexicon ----
    let mut lexicon = match args.lexicon.as_deref() {
        Some(path) => Lexicon::from_yaml_file(path)?,
        None => Lexicon::builtin(),
    };
    if let Some(min_score) = args.min_score {
        lexicon.min_relevance_score = min_score;
    }
    info!(
        companies = lexicon.companies.len(),
        high_impact = lexicon.high_impact.len(),
        topics = lexicon.topics.len(),
        categories = lexicon.categories.len(),
        min_score = lexicon.min_relevance_score,
        "Lexicon ready"
    );

    // ---- Fetch feeds ----
    let articles = feeds::fetch_all().await;
    info!(count = articles.len(), "Total articles to analyze");

    // ---- Pick windows ----
    let today = Utc::now().date_naive();
    let mut windows: Vec<Window> = Vec::new();
    if args.backfill {
        windows.extend(backfill_windows(DigestKind::Daily, today, args.backfill_days));
        windows.extend(backfill_windows(DigestKind::Weekly, today, args.backfill_weeks));
        windows.extend(backfill_windows(DigestKind::Monthly, today, args.backfill_months));
    } else {
        for kind in DigestKind::ALL {
            windows.push(target_window(kind, today));
        }
    }
    info!(count = windows.len(), backfill = args.backfill, "Digest windows selected");

    // ---- Assemble digests ----
    let assembler = DigestAssembler::new(&lexicon);
    let mut digests: Vec<Digest> = Vec::new();
    for window in &windows {
        let digest = assembler.assemble(&articles, window);
        info!(
            id = %digest.id,
            kind = %digest.kind,
            total = digest.total_articles,
            highlights = digest.highlights.len(),
            categories = digest.by_category.len(),
            "Assembled digest"
        );
        digests.push(digest);
    }

    // ---- Write digest files ----
    let mut written = 0usize;
    for digest in &digests {
        match json::write_digest(digest, &args.output_dir).await {
            Ok(()) => written += 1,
            Err(e) => error!(id = %digest.id, error = %e, "Failed to write digest JSON"),
        }
    }

    // ---- Index update ----
    if let Err(e) = indexes::update_index(&args.output_dir, &digests).await {
        error!(error = %e, "Failed to update digest index");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        digests = digests.len(),
        written,
        "Execution complete"
    );

    Ok(())
}
