//! Compare command - list fields unique to either form and fields they share.

use std::path::PathBuf;

use clap::Args;
use console::style;

use formshift_core::Orchestrator;
use formshift_core::files::{file_name, file_stem};
use formshift_core::report::{format_diff_report, write_report};

use super::load_config;

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// First form
    first: PathBuf,

    /// Second form
    second: PathBuf,

    /// Also write the report to the reports directory
    #[arg(long)]
    save: bool,

    /// Reports directory (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.reports.output_dir.clone());
    let orchestrator = Orchestrator::new(config);

    let diff = orchestrator.compare(&args.first, &args.second).await?;
    let text = format_diff_report(&file_name(&args.first), &file_name(&args.second), &diff);
    print!("{}", text);

    if args.save {
        let report_name = format!(
            "diff-{}-{}.txt",
            file_stem(&args.first),
            file_stem(&args.second)
        );
        let path = write_report(&output_dir, &report_name, &text)?;
        eprintln!("{} Report written to {}", style("✓").green(), path.display());
    }

    Ok(())
}
