//! Fill command - write field records from a JSON file into a template.

use std::path::PathBuf;

use clap::Args;

use formshift_core::Orchestrator;

use super::{load_config, print_outcome};

/// Arguments for the fill command.
#[derive(Args)]
pub struct FillArgs {
    /// Template form
    template: PathBuf,

    /// JSON array of {fieldId, fieldType, value} records
    records: PathBuf,

    /// Where to save the filled form
    #[arg(short, long)]
    output: PathBuf,
}

pub async fn run(args: FillArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(load_config(config_path)?);
    let outcome = orchestrator.fill_from_file(&args.template, &args.records, &args.output)?;
    print_outcome(&args.output, &outcome);
    Ok(())
}
