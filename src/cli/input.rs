//! Input argument resolution
//!
//! Turns the positional arguments into the ordered list of files to process.
//! An argument may name a file, a directory (walked recursively for `.csv`
//! files) or a glob pattern, for shells that leave patterns unexpanded.
//! Arguments that match nothing are kept as-is so the run reports them as
//! unavailable files instead of silently dropping them.

use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Expand every input argument, preserving argument order
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_dir() {
            let found = collect_csv_files(path);
            if found.is_empty() {
                warn!("No .{} files found under {}", CSV_EXTENSION, input);
            }
            files.extend(found);
        } else if path.exists() || !is_glob_pattern(input) {
            files.push(path.to_path_buf());
        } else {
            let matched = expand_glob(input)?;
            if matched.is_empty() {
                warn!("Pattern '{}' matched no files", input);
                files.push(path.to_path_buf());
            } else {
                files.extend(matched);
            }
        }
    }

    debug!("Resolved {} inputs to {} files", inputs.len(), files.len());
    Ok(files)
}

/// Whether an argument contains glob metacharacters
pub fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Every `.csv` file below `dir`, sorted by path
fn collect_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_csv_extension(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| {
        Error::configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable match for '{}': {}", pattern, e),
        }
    }

    Ok(files)
}
