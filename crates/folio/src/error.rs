//! CLI error types.

use folio_config::ConfigError;
use folio_export::MergeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Merge(#[from] MergeError),

    #[error("{failed} of {total} folders failed")]
    FoldersFailed { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
