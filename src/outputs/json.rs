//! JSON snapshot output.
//!
//! Snapshots are grouped by the local date of the load and named after the
//! section filter, so repeated loads of the same section on the same day
//! overwrite each other.

use crate::models::FeedSnapshot;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `snapshot` to `{json_output_dir}/{local_date}/{section}.json`.
///
/// Characters in the section that can't appear in a file name are replaced
/// with `_`. Returns the path written.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_snapshot(
    snapshot: &FeedSnapshot,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let full_json_dir = Path::new(json_output_dir).join(&snapshot.local_date);
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", file_stem(&snapshot.section)));
    fs::write(&output_json_filename, json).await?;
    info!(
        path = %output_json_filename.display(),
        articles = snapshot.articles.len(),
        "Wrote JSON snapshot"
    );

    Ok(output_json_filename)
}

fn file_stem(section: &str) -> String {
    let stem: String = section
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() { "all".to_string() } else { stem }
}
