//! Transfer command - copy field values from one form into a template.

use std::path::PathBuf;

use clap::Args;

use formshift_core::Orchestrator;

use super::{load_config, print_outcome};

/// Arguments for the transfer command.
#[derive(Args)]
pub struct TransferArgs {
    /// Filled-in source form
    source: PathBuf,

    /// Empty template form
    template: PathBuf,

    /// Where to save the filled template
    #[arg(short, long)]
    output: PathBuf,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: TransferArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(load_config(config_path)?);

    let outcome = orchestrator
        .transfer(&args.source, &args.template, &args.output)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&args.output, &outcome);
    }

    Ok(())
}
