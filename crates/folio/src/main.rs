//! folio CLI - Confluence folder exporter.
//!
//! - `folio <FOLDER_URL>...`: export every page below each folder to
//!   `.txt` and `.docx`
//! - `folio --merge <FOLDER> [txt|word]`: merge a folder's exports into one
//!   file

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{ExtractArgs, MergeArgs, SettingsArgs};
use output::Output;

/// Export Confluence folders to Word and plain text.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Confluence folder links (`https://<site>/wiki/spaces/<KEY>/folder/<ID>`).
    #[arg(
        value_name = "FOLDER_URL",
        required_unless_present = "merge",
        conflicts_with = "merge"
    )]
    folder_urls: Vec<String>,

    /// Merge the exports in FOLDER (a path, or a name below the output
    /// directory). FORMAT is `txt` (default) or `word`.
    #[arg(long, num_args = 1..=2, value_names = ["FOLDER", "FORMAT"])]
    merge: Option<Vec<String>>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Enable info-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.merge {
        Some(merge) => MergeArgs::from_values(merge).and_then(|args| args.execute(&cli.settings)),
        None => ExtractArgs::new(cli.folder_urls).execute(&cli.settings),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
