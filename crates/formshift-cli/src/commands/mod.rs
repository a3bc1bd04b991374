//! Subcommand implementations.

pub mod analyze;
pub mod batch;
pub mod categorize;
pub mod compare;
pub mod config;
pub mod extract;
pub mod fill;
pub mod prefill;
pub mod transfer;

use std::path::Path;

use console::style;

use formshift_core::{FormshiftConfig, TransferOutcome};

/// Load the configuration from `config_path`, or defaults when not given.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<FormshiftConfig> {
    let config = if let Some(path) = config_path {
        FormshiftConfig::from_file(Path::new(path))?
    } else {
        FormshiftConfig::default()
    };
    Ok(config)
}

/// Print the result of a write operation.
pub(crate) fn print_outcome(destination: &Path, outcome: &TransferOutcome) {
    if outcome.is_clean() {
        println!(
            "{} Saved {} without errors",
            style("✓").green(),
            destination.display()
        );
        return;
    }

    println!(
        "{} Saved {} with {} failed fields",
        style("!").yellow(),
        destination.display(),
        style(outcome.failed_fields_count).red()
    );
    for failed in &outcome.failed_fields {
        println!(
            "  - {} ({}) = {:?}: {}",
            failed.field_id, failed.field_type, failed.value, failed.error
        );
    }
}
