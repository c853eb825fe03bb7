//! Data file discovery
//!
//! Lists the candidate table files next to the running program.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Regular files in `dir`, sorted by name, without `exclude`
pub fn available_files(dir: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    let excluded_name = exclude.and_then(Path::file_name);
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if excluded_name.is_some() && path.file_name() == excluded_name {
            continue;
        }
        files.push(path);
    }

    files.sort();
    tracing::debug!("Found {} candidate files in {}", files.len(), dir.display());
    Ok(files)
}

/// Name to show for a discovered file
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
