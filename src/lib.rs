/// Response Fixer - a migration tool for Go HTTP handler response calls
///
/// This library rewrites call sites of the shared response package in handler
/// files, moving them from the old message-first signatures to the new
/// data-only API and inserting the shared errors import where it is needed.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export main rewriter types for convenience
pub use crate::core::rewriter::{FileOutcome, FileRewriter};
pub use crate::core::rules::get_rules;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Migrate a single handler file in place and return the outcome
///
/// This is a convenience function for simple use cases.
///
/// # Arguments
///
/// * `file_path` - Path to the handler file to rewrite
///
/// # Returns
///
/// Outcome of the rewrite, including per-rule substitution counts
pub fn fix_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<FileOutcome> {
    // Initialize a rewriter that writes changes back to disk
    let rewriter = FileRewriter::new(false);

    // Rewrite the file
    rewriter.rewrite_file(file_path.as_ref())
}

/// Command-line application functionality
pub mod app {
    use crate::core::rewriter::{FileOutcome, FileRewriter};
    use crate::utils::file_utils;
    use std::path::{Path, PathBuf};

    /// Run the migration over every handler file under a root directory
    ///
    /// Files that fail to rewrite do not stop the run; they are returned
    /// alongside the successful outcomes.
    ///
    /// # Arguments
    ///
    /// * `root` - Root of the services tree to migrate
    /// * `dry_run` - When true, report changes without writing anything
    ///
    /// # Returns
    ///
    /// Outcomes for rewritten files and (path, error) pairs for failures
    pub fn run_migration<P: AsRef<Path>>(
        root: P,
        dry_run: bool,
    ) -> anyhow::Result<(Vec<FileOutcome>, Vec<(PathBuf, String)>)> {
        let files = file_utils::collect_handler_files(root.as_ref())?;
        let rewriter = FileRewriter::new(dry_run);

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();

        for file_path in files {
            match rewriter.rewrite_file(&file_path) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => failures.push((file_path, format!("{:#}", e))),
            }
        }

        Ok((outcomes, failures))
    }
}
