//! Analyze command - audit the field structure of a form.

use std::path::PathBuf;

use clap::Args;
use console::style;

use formshift_core::Orchestrator;
use formshift_core::files::file_stem;
use formshift_core::report::{format_audit_report, write_report};

use super::load_config;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Form to audit
    input: PathBuf,

    /// Also write the report to the reports directory
    #[arg(long)]
    save: bool,

    /// Reports directory (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the audit as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.reports.output_dir.clone());
    let orchestrator = Orchestrator::new(config);

    let report = orchestrator.audit(&args.input)?;
    let text = format_audit_report(&report);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", text);
    }

    if args.save {
        let file_name = format!("results-{}.txt", file_stem(&args.input));
        let path = write_report(&output_dir, &file_name, &text)?;
        eprintln!("{} Report written to {}", style("✓").green(), path.display());
    }

    Ok(())
}
