/// Reporting for migration runs
///
/// This module aggregates per-file outcomes into a run report, formats the
/// console summary, and exports the report as JSON.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::core::rewriter::FileOutcome;
use crate::core::rules;

/// Aggregate report for one migration run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub version: String,
    pub generated_at: String,
    pub root: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub imports_added: usize,
    pub total_replacements: usize,
    pub rule_totals: Vec<RuleTotal>,
    pub files: Vec<FileEntry>,
    pub failures: Vec<Failure>,
}

/// Substitution count for one rule.
#[derive(Debug, Serialize)]
pub struct RuleTotal {
    pub rule: String,
    pub count: usize,
}

/// Per-file entry in the report.
#[derive(Debug, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub changed: bool,
    pub import_added: bool,
    pub replacements: Vec<RuleTotal>,
}

/// A file the run failed to process.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub path: String,
    pub error: String,
}

/// Build the run report from per-file outcomes
///
/// # Arguments
///
/// * `root` - Migration root the run was invoked against
/// * `dry_run` - Whether the run was a dry run
/// * `outcomes` - Outcomes of the files that were processed
/// * `failures` - Files that could not be processed, with their errors
///
/// # Returns
///
/// The aggregated report
pub fn build_report(
    root: &Path,
    dry_run: bool,
    outcomes: &[FileOutcome],
    failures: &[(PathBuf, String)],
) -> RunReport {
    // Canonical rule order comes from the compiled rule set.
    let mut rule_totals: Vec<RuleTotal> = rules::COMPILED_RULES
        .iter()
        .map(|rule| RuleTotal {
            rule: rule.name.to_string(),
            count: 0,
        })
        .collect();

    for outcome in outcomes {
        for (name, count) in &outcome.replacements {
            if let Some(total) = rule_totals.iter_mut().find(|t| t.rule == *name) {
                total.count += count;
            }
        }
    }

    let files: Vec<FileEntry> = outcomes
        .iter()
        .map(|outcome| FileEntry {
            path: outcome.path.display().to_string(),
            changed: outcome.changed,
            import_added: outcome.import_added,
            replacements: outcome
                .replacements
                .iter()
                .map(|(rule, count)| RuleTotal {
                    rule: rule.to_string(),
                    count: *count,
                })
                .collect(),
        })
        .collect();

    RunReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        root: root.display().to_string(),
        dry_run,
        files_scanned: outcomes.len() + failures.len(),
        files_changed: outcomes.iter().filter(|o| o.changed).count(),
        imports_added: outcomes.iter().filter(|o| o.import_added).count(),
        total_replacements: rule_totals.iter().map(|t| t.count).sum(),
        rule_totals,
        files,
        failures: failures
            .iter()
            .map(|(path, error)| Failure {
                path: path.display().to_string(),
                error: error.clone(),
            })
            .collect(),
    }
}

/// Export the run report to a JSON file
///
/// # Arguments
///
/// * `report` - Report to export
/// * `output_path` - Path where the JSON file will be written
///
/// # Returns
///
/// Result indicating success or failure
pub fn export_report_json(report: &RunReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).context(format!(
        "Failed to create JSON output file: {}",
        output_path.display()
    ))?;

    serde_json::to_writer_pretty(file, report).context("Failed to write JSON data")?;

    Ok(())
}

/// Format the run summary for console output
///
/// # Arguments
///
/// * `report` - Report to summarize
///
/// # Returns
///
/// Formatted string for console output
pub fn format_summary(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", "Migration Complete".bold()));
    if report.dry_run {
        output.push_str(&format!(
            "{}\n",
            "Dry run - no files were written".yellow().bold()
        ));
    }
    output.push_str(&format!(
        "{} {}\n",
        "Files scanned:".green(),
        report.files_scanned
    ));
    output.push_str(&format!(
        "{} {}\n",
        "Files rewritten:".green(),
        report.files_changed
    ));
    output.push_str(&format!(
        "{} {}\n",
        "Imports added:".green(),
        report.imports_added
    ));
    output.push_str(&format!(
        "{} {}\n",
        "Replacements:".green(),
        report.total_replacements
    ));

    output.push_str(&format!("\n{}\n", "Substitutions By Rule".cyan().bold()));
    for total in &report.rule_totals {
        output.push_str(&format!("  {}: {}\n", total.rule, total.count));
    }

    if !report.failures.is_empty() {
        output.push_str(&format!("\n{}\n", "Failures".red().bold()));
        for failure in &report.failures {
            output.push_str(&format!("  {}: {}\n", failure.path, failure.error));
        }
    }

    output
}

/// One console line for a file the run touched.
pub fn format_file_line(entry: &FileEntry) -> String {
    let mut parts = Vec::new();

    for total in &entry.replacements {
        if total.count > 0 {
            parts.push(format!("{}:{}", total.rule, total.count));
        }
    }
    if entry.import_added {
        parts.push("+import".to_string());
    }

    format!("  {}  {}", entry.path, parts.join(" "))
}
