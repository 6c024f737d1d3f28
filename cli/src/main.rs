//! energy-report - command line front end
//!
//! Collects category directories into a report and exports it as a
//! landscape DOCX document.

mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "energy-report")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Options shared by every command
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Exporter settings file (JSON)
    #[arg(long, global = true, env = "ENERGY_REPORT_SETTINGS")]
    settings: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect category directories and print the resulting report
    Collect {
        /// Directory whose subdirectories are categories
        data_root: PathBuf,

        /// Print the report as JSON (usable with `export --spec`)
        #[arg(long)]
        json: bool,
    },

    /// Export a report to a DOCX file
    Export {
        /// Output file; `.docx` is appended when there is no extension
        output: PathBuf,

        /// Collect the report from this data directory
        #[arg(long, conflicts_with = "spec", required_unless_present = "spec")]
        data: Option<PathBuf>,

        /// Read the report from a JSON file
        #[arg(long)]
        spec: Option<PathBuf>,
    },

    /// Print the outline of an exported DOCX file
    Inspect {
        document: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let settings = commands::load_settings(cli.global.settings.as_deref())?;

    match cli.command {
        Commands::Collect { data_root, json } => commands::collect(&settings, &data_root, json),
        Commands::Export { output, data, spec } => {
            let source = match (data, spec) {
                (Some(data), _) => commands::ReportInput::DataRoot(data),
                (None, Some(spec)) => commands::ReportInput::SpecFile(spec),
                (None, None) => anyhow::bail!("either --data or --spec is required"),
            };
            commands::export(&settings, &source, &output)
        }
        Commands::Inspect { document, json } => commands::inspect(&document, json),
    }
}
