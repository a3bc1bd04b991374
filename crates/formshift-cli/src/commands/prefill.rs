//! Prefill command - mark the listed fields of a form with a placeholder.

use std::path::PathBuf;

use clap::Args;

use formshift_core::Orchestrator;

use super::{load_config, print_outcome};

/// Arguments for the prefill command.
#[derive(Args)]
pub struct PrefillArgs {
    /// Text file with one "name, type" pair per line
    fields: PathBuf,

    /// Form to mark
    pdf: PathBuf,

    /// Where to save the marked form
    #[arg(short, long)]
    output: PathBuf,

    /// Marker written into text fields (overrides config)
    #[arg(short, long)]
    marker: Option<String>,
}

pub async fn run(args: PrefillArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(marker) = args.marker {
        config.prefill.marker = marker;
    }

    let outcome = Orchestrator::new(config).prefill(&args.fields, &args.pdf, &args.output)?;
    print_outcome(&args.output, &outcome);
    Ok(())
}
