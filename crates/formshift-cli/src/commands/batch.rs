//! Batch command - transfer every form of a directory into one template.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use formshift_core::files::{file_name, is_pdf, list_files};
use formshift_core::{BatchLog, LogEntry, Orchestrator, TransferOutcome};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory of filled-in source forms
    input_dir: PathBuf,

    /// Empty template form
    template: PathBuf,

    /// Output directory for the filled templates
    #[arg(short, long)]
    output_dir: PathBuf,

    /// JSON log file (overrides config)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Also write a summary CSV into the output directory
    #[arg(long)]
    summary: bool,

    /// Stop at the first file that cannot be transferred
    #[arg(long)]
    fail_fast: bool,
}

/// Result of transferring a single file.
struct FileResult {
    path: PathBuf,
    outcome: Option<TransferOutcome>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let continue_on_error = config.batch.continue_on_error && !args.fail_fast;
    let pdf_only = config.batch.pdf_only;
    let log = BatchLog::new(args.log.clone().unwrap_or_else(|| config.batch.log_file.clone()));
    let orchestrator = Orchestrator::new(config);

    let files: Vec<PathBuf> = list_files(&args.input_dir)?
        .into_iter()
        .filter(|p| !pdf_only || is_pdf(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No forms found in {}", args.input_dir.display());
    }

    println!(
        "{} Found {} files to transfer",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let name = file_name(&path);
        let destination = args.output_dir.join(&name);

        match orchestrator.transfer(&path, &args.template, &destination).await {
            Ok(outcome) => {
                log.append(LogEntry::for_outcome(&name, &outcome))?;
                results.push(FileResult {
                    path,
                    outcome: Some(outcome),
                    error: None,
                });
            }
            Err(e) => {
                log.append(LogEntry::for_error(&name, &e))?;
                if !continue_on_error {
                    error!("Failed to transfer {}: {}", path.display(), e);
                    pb.abandon();
                    anyhow::bail!("Transfer failed: {}", e);
                }
                warn!("Failed to transfer {}: {}", path.display(), e);
                results.push(FileResult {
                    path,
                    outcome: None,
                    error: Some(e.to_string()),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let clean = results
        .iter()
        .filter(|r| r.outcome.as_ref().is_some_and(TransferOutcome::is_clean))
        .count();
    let partial = results
        .iter()
        .filter(|r| r.outcome.as_ref().is_some_and(|o| !o.is_clean()))
        .count();
    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} clean, {} with failed fields, {} failed",
        style(clean).green(),
        style(partial).yellow(),
        style(failed.len()).red()
    );
    println!("   Log: {}", log.path().display());

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "failed_fields", "error"])?;

    for result in results {
        let filename = file_name(&result.path);
        match (&result.outcome, &result.error) {
            (Some(outcome), _) => {
                let status = if outcome.is_clean() { "success" } else { "partial" };
                wtr.write_record([
                    filename.as_str(),
                    status,
                    &outcome.failed_fields_count.to_string(),
                    "",
                ])?;
            }
            (None, error) => {
                wtr.write_record([
                    filename.as_str(),
                    "error",
                    "",
                    error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
