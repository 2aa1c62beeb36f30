/// Response Fixer - migrates response helper call sites in Go HTTP handlers
/// This tool rewrites handler files to the new response package API
///
/// The main entry point for the response fixer application. It parses
/// command-line arguments, walks the services tree and rewrites every handler
/// file it finds.

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

// Import modules
mod core;
mod utils;

use crate::core::rewriter::{FileOutcome, FileRewriter};
use crate::utils::file_utils;
use crate::utils::report;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "response_fixer",
    author = "ERP Platform Team",
    version = "0.1.0",
    about = "Migrates response helper call sites in Go HTTP handlers",
    long_about = "This tool walks a services tree and rewrites handler calls to the shared
response package:
- response.Error(c, status, message, details) -> response.Error(c, errors.New(...))
- response.SuccessWithPagination(...) -> response.SuccessWithMeta(...)
- response.Success(c, status, message, data) -> response.Success(c, data)
- response.Created(c, message, data) -> response.Created(c, data)
It also inserts the shared errors import into files that need it."
)]
struct Args {
    /// Root of the services tree to migrate
    #[arg(name = "root", default_value = "services")]
    root: String,

    /// Report what would change without writing any files
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Export the migration report to a JSON file
    #[arg(long = "json")]
    json: Option<String>,

    /// Suppress terminal output
    #[arg(long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,

    /// Show only summary information
    #[arg(long = "summary-only", action = ArgAction::SetTrue)]
    summary_only: bool,

    /// Set logging level (default: INFO)
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Log file path (default: response_fixer.log)
    #[arg(long = "log-file", default_value = "response_fixer.log")]
    log_file: String,
}

/// Main entry point function
fn main() -> Result<()> {
    // Record the start time
    let start_time = Instant::now();

    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let _ = setup_logging(&args);

    let root = Path::new(&args.root);
    info!(
        "Starting migration under {} (dry run: {})",
        root.display(),
        args.dry_run
    );

    // Collect handler files to rewrite
    let files = match file_utils::collect_handler_files(root) {
        Ok(files) => files,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "Error:".red(), e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        warn!("No handler files found under {}", root.display());
        if !args.quiet {
            eprintln!(
                "{} {}",
                "No handler files found under".yellow(),
                root.display()
            );
        }
    }

    // Rewrite all handler files
    let (outcomes, failures) = rewrite_files(&files, &args);

    // Build the run report
    let run_report = report::build_report(root, args.dry_run, &outcomes, &failures);

    // Export the report if requested
    if let Some(json_path) = &args.json {
        report::export_report_json(&run_report, Path::new(json_path))?;
    }

    // Print results to console if not in quiet mode
    if !args.quiet {
        print!("{}", report::format_summary(&run_report));

        let elapsed_time = start_time.elapsed();
        println!(
            "{} {:.2} seconds",
            "Time elapsed:".green(),
            elapsed_time.as_secs_f64()
        );

        // Print the changed files
        if !args.summary_only {
            let changed: Vec<_> = run_report.files.iter().filter(|f| f.changed).collect();
            if !changed.is_empty() {
                println!("\n{}", "Changed Files".cyan().bold());
                for entry in changed {
                    println!("{}", report::format_file_line(entry));
                }
            }
        }
    }

    // A failed file must not go unnoticed in CI
    if !failures.is_empty() {
        process::exit(1);
    }

    Ok(())
}

/// Set up logging with file output
fn setup_logging(args: &Args) -> Result<()> {
    // Configure logging
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    // Set format
    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // Add file output
    if let Ok(file) = File::create(&args.log_file) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Initialize logger
    builder.init();

    Ok(())
}

/// Rewrite all handler files with progress tracking
fn rewrite_files(files: &[PathBuf], args: &Args) -> (Vec<FileOutcome>, Vec<(PathBuf, String)>) {
    let total_files = files.len();
    let rewriter = FileRewriter::new(args.dry_run);

    if !args.quiet && total_files > 0 {
        println!(
            "\n{} {} handler files...",
            "Migrating".bold(),
            total_files
        );
    }

    // Set up progress bar if not in quiet mode
    let progress_bar = if !args.quiet && total_files > 0 {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut outcomes = Vec::new();
    let mut failures = Vec::new();

    // Files are rewritten one at a time in traversal order
    for file_path in files {
        match rewriter.rewrite_file(file_path) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                error!("Error rewriting {}: {:#}", file_path.display(), e);
                failures.push((file_path.clone(), format!("{:#}", e)));
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Migration complete");
    }

    (outcomes, failures)
}
