//! Extract command - dump the field values of a form as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use formshift_core::Orchestrator;

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Form to read
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(load_config(config_path)?);
    let snapshot = orchestrator.extract(&args.input)?;
    info!("Extracted {} fields from {}", snapshot.fields.len(), args.input.display());

    let json = serde_json::to_string_pretty(&snapshot)?;
    match args.output {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
