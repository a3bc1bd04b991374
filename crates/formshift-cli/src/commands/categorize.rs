//! Categorize command - group the forms of a directory by field schema.

use std::path::PathBuf;

use clap::Args;
use console::style;

use formshift_core::Orchestrator;
use formshift_core::analysis::organize_groups;
use formshift_core::files::{is_pdf, list_files};

use super::load_config;

/// Arguments for the categorize command.
#[derive(Args)]
pub struct CategorizeArgs {
    /// Directory of forms
    input_dir: PathBuf,

    /// Copy each group into <DIR>/group_<n>
    #[arg(long, value_name = "DIR")]
    organize: Option<PathBuf>,

    /// Print groups as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: CategorizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pdf_only = config.batch.pdf_only;

    let files: Vec<PathBuf> = list_files(&args.input_dir)?
        .into_iter()
        .filter(|p| !pdf_only || is_pdf(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No forms found in {}", args.input_dir.display());
    }

    let groups = Orchestrator::new(config).categorize(&files)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        println!(
            "{} {} forms in {} groups",
            style("ℹ").blue(),
            files.len(),
            groups.len()
        );
        for (index, group) in groups.iter().enumerate() {
            println!();
            println!(
                "{} ({} fields)",
                style(format!("Group {}", index + 1)).bold(),
                group.field_count
            );
            for file in &group.files {
                println!("  - {}", file);
            }
        }
    }

    if let Some(output_dir) = args.organize {
        let copied = organize_groups(&groups, &args.input_dir, &output_dir)?;
        eprintln!(
            "{} Copied {} files into {}",
            style("✓").green(),
            copied,
            output_dir.display()
        );
    }

    Ok(())
}
