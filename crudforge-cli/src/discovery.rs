//! Entity file discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively list files named `*<marker>.java` under `dir`, sorted
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn find_entities(dir: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!("{marker}.java");
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to scan directory: {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if matches {
            found.push(entry.into_path());
        }
    }

    found.sort();
    tracing::debug!(dir = %dir.display(), count = found.len(), "entity files discovered");
    Ok(found)
}
