//! JSON persistence for digests.
//!
//! Each digest is serialized to `{output_dir}/{kind}/{id}.json`. The static
//! page renderer reads these files directly, so the JSON field names are the
//! camelCase schema defined on the models.
//!
//! Every assembled digest is written, including zero-article ones; only the
//! index decides what gets published.

use crate::models::Digest;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write one digest to its JSON file, creating the kind directory if needed.
///
/// # Output Path
///
/// `{output_dir}/{kind}/{id}.json`, e.g. `./digests/weekly/26-5.json`.
#[instrument(level = "info", skip_all, fields(id = %digest.id, kind = %digest.kind))]
pub async fn write_digest(digest: &Digest, output_dir: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(digest)?;

    let kind_dir = format!("{}/{}", output_dir.trim_end_matches('/'), digest.kind);
    if let Err(e) = fs::create_dir_all(&kind_dir).await {
        error!(%kind_dir, error = %e, "Failed to create digest dir");
        return Err(e.into());
    }

    let path = format!("{}/{}.json", kind_dir, digest.id);
    fs::write(&path, json).await?;
    info!(path = %path, articles = digest.total_articles, "Wrote digest JSON");

    Ok(())
}
