/// File handling utilities
///
/// This module provides the handler-file selection rule, directory traversal,
/// and reading/writing of Go source files for the migration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use walkdir::WalkDir;

/// Directory marker that identifies HTTP handler packages.
pub const HANDLER_DIR_MARKER: &str = "internal/delivery/http/handler";

/// File name suffix of Go sources.
pub const GO_SUFFIX: &str = ".go";

/// Error when a selected file is not valid UTF-8 text
#[derive(Debug, thiserror::Error)]
#[error("file is not valid UTF-8: {}", path.display())]
pub struct NonUtf8Source {
    pub path: PathBuf,
}

/// Error when the migration root is missing or not a directory
#[derive(Debug, thiserror::Error)]
#[error("migration root not found or not a directory: {}", path.display())]
pub struct InvalidRoot {
    pub path: PathBuf,
}

/// Check whether a path is a handler file the migration applies to.
///
/// A file qualifies when its parent directory path contains the handler
/// package marker and its name ends in `.go`. The marker is compared against
/// the directory only, so a file named `handler.go` directly under
/// `internal/delivery/http/` does not qualify.
pub fn is_handler_file(path: &Path) -> bool {
    let in_handler_dir = path
        .parent()
        .map(|dir| normalized(dir).contains(HANDLER_DIR_MARKER))
        .unwrap_or(false);

    let is_go_source = path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(GO_SUFFIX))
        .unwrap_or(false);

    in_handler_dir && is_go_source
}

/// Path as a string with separators normalized to `/`.
fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Collect all handler files under the migration root
///
/// # Arguments
///
/// * `root` - Root of the services tree to walk
///
/// # Returns
///
/// Handler file paths in directory-traversal order. Symbolic links are not
/// followed; unreadable entries are logged and skipped.
pub fn collect_handler_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() || !root.is_dir() {
        return Err(InvalidRoot {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                let file_path = entry.path();
                if file_path.is_file() && is_handler_file(file_path) {
                    files.push(file_path.to_path_buf());
                }
            }
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }

    Ok(files)
}

/// Read a source file as UTF-8 text
///
/// # Arguments
///
/// * `file_path` - Path to the file
///
/// # Returns
///
/// The file content, or an error when the file cannot be read or is not
/// valid UTF-8
pub fn read_source(file_path: &Path) -> Result<String> {
    let bytes = fs::read(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    String::from_utf8(bytes).map_err(|_| {
        NonUtf8Source {
            path: file_path.to_path_buf(),
        }
        .into()
    })
}

/// Write rewritten source back to disk in place.
pub fn write_source(file_path: &Path, content: &str) -> Result<()> {
    fs::write(file_path, content)
        .with_context(|| format!("Failed to write file: {}", file_path.display()))
}
