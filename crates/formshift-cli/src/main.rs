//! CLI application for migrating PDF form data between form versions.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{analyze, batch, categorize, compare, config, extract, fill, prefill, transfer};

/// Formshift - move field data between versions of PDF forms
#[derive(Parser)]
#[command(name = "formshift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy field values from a filled form into a template
    Transfer(transfer::TransferArgs),

    /// Transfer every form of a directory into a template
    Batch(batch::BatchArgs),

    /// Group the forms of a directory by field schema
    Categorize(categorize::CategorizeArgs),

    /// Compare the fields of two forms
    Compare(compare::CompareArgs),

    /// Audit the field structure of a form
    Analyze(analyze::AnalyzeArgs),

    /// Dump the field values of a form as JSON
    Extract(extract::ExtractArgs),

    /// Write field records from a JSON file into a template
    Fill(fill::FillArgs),

    /// Mark listed fields of a form with a placeholder
    Prefill(prefill::PrefillArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Transfer(args) => transfer::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Categorize(args) => categorize::run(args, config_path).await,
        Commands::Compare(args) => compare::run(args, config_path).await,
        Commands::Analyze(args) => analyze::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Fill(args) => fill::run(args, config_path).await,
        Commands::Prefill(args) => prefill::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
