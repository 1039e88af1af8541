//! CLI command implementations.

mod extract;
mod merge;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use extract::ExtractArgs;
pub(crate) use merge::MergeArgs;

/// Options shared by extract and merge.
#[derive(Args)]
pub(crate) struct SettingsArgs {
    /// Output base directory (default: `confluence_exports`).
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Credential file (default: search for Tokens_txt.txt).
    #[arg(long, value_name = "FILE", env = "FOLIO_CREDENTIALS")]
    pub(crate) credentials: Option<PathBuf>,

    /// Children requested per API call (1-250).
    #[arg(long, value_name = "N")]
    pub(crate) page_size: Option<u32>,

    /// HTTP timeout per request, in seconds.
    #[arg(long, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,
}

impl SettingsArgs {
    /// Load configuration with these flags applied on top.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        Ok(Config::load(self.config.as_deref(), Some(&self.cli_settings()))?)
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            output_dir: self.output.clone(),
            credentials_file: self.credentials.clone(),
            page_size: self.page_size,
            timeout_secs: self.timeout,
        }
    }
}
