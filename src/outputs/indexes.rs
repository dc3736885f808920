//! Master index maintenance.
//!
//! `index.json` is the directory the static site renders its navigation
//! from: one [`crate::models::DigestSummary`] per published digest, grouped
//! by kind, each group sorted newest-first, plus a `lastUpdated` stamp.
//!
//! # Update semantics
//!
//! The file is read-modify-write. Re-generating a period replaces its
//! existing entry in place, so repeated runs (and backfill) stay idempotent.
//! Zero-article digests are skipped: their JSON files exist on disk but they
//! never appear in the published directory.

use crate::models::{Digest, DigestIndex, DigestKind, DigestSummary};
use chrono::Utc;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Merge the given digests into `index.json` under `output_dir`.
///
/// Creates the index if it does not exist. An unreadable existing index is
/// logged and rebuilt from scratch rather than failing the run.
#[instrument(level = "info", skip_all, fields(%output_dir, digests = digests.len()))]
pub async fn update_index(output_dir: &str, digests: &[Digest]) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/index.json", output_dir.trim_end_matches('/'));

    let mut index = if Path::new(&path).exists() {
        let raw = fs::read_to_string(&path).await?;
        match serde_json::from_str::<DigestIndex>(&raw) {
            Ok(index) => index,
            Err(e) => {
                warn!(path = %path, error = %e, "index.json unreadable; rebuilding");
                DigestIndex::new()
            }
        }
    } else {
        DigestIndex::new()
    };

    let mut indexed = 0;
    for digest in digests {
        if digest.total_articles == 0 {
            debug!(id = %digest.id, kind = %digest.kind, "Zero-article digest left out of index");
            continue;
        }
        merge_summary(&mut index, digest.kind, digest.summary());
        indexed += 1;
    }
    index.last_updated = Utc::now();

    fs::write(&path, serde_json::to_string(&index)?).await?;
    info!(path = %path, indexed, "Updated digest index");
    Ok(())
}

/// Replace-or-insert one summary in its kind group, keeping the group sorted
/// newest-first.
pub fn merge_summary(index: &mut DigestIndex, kind: DigestKind, summary: DigestSummary) {
    let group = index.group_mut(kind);
    match group.iter_mut().find(|s| s.id == summary.id) {
        Some(existing) => *existing = summary,
        None => group.push(summary),
    }
    group.sort_by(|a, b| period_sort_key(&b.id).cmp(&period_sort_key(&a.id)));
}

/// Numeric sort key for a period id.
///
/// Ids are dash-separated numeric fields ordered most-significant first
/// (`YY-MM-DD`, `YY-W`, `YY-MM`), so comparing the parsed tuple sorts
/// periods chronologically. Unpadded week numbers make plain string
/// comparison wrong ("26-10" < "26-9" lexicographically).
fn period_sort_key(id: &str) -> (u32, u32, u32) {
    let mut parts = id.split('-').filter_map(|p| p.parse::<u32>().ok());
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}
