//! File discovery for record corpora.
//!
//! Walks a corpus directory tree and collects every file whose name matches
//! a glob pattern, returning absolute paths in a deterministic order.

use crate::error::{EtlError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Recursively collect all files under `root` whose file name matches
/// `pattern`.
///
/// Every matching file reachable from the root is included exactly once,
/// as an absolute path. The result is sorted for a stable order. An
/// unreadable directory aborts the traversal.
pub fn collect_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern)
        .map_err(|e| EtlError::configuration(format!("invalid file pattern '{pattern}': {e}")))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| EtlError::Discovery {
            path: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| matcher.matches(n));
        if matches {
            files.push(std::path::absolute(entry.path())?);
        }
    }

    files.sort();
    debug!(
        "Found {} files matching '{}' under {}",
        files.len(),
        pattern,
        root.display()
    );
    Ok(files)
}
