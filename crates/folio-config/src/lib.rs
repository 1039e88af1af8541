//! Configuration management for folio.
//!
//! Parses an optional `folio.toml` with serde, auto-discovered in the current
//! directory or its parents, and loads Confluence credentials from a
//! `KEY=value` file (see [`Credentials`]).
//!
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `output.dir` and `credentials.file` support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod credentials;
mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use credentials::{CREDENTIALS_FILENAME, Credentials, default_search_paths};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Output directory used when neither the config file nor the CLI sets one.
const DEFAULT_OUTPUT_DIR: &str = "confluence_exports";

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the Confluence v2 API accepts.
const MAX_PAGE_SIZE: u32 = 250;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output base directory.
    pub output_dir: Option<PathBuf>,
    /// Override credential file path (disables the search).
    pub credentials_file: Option<PathBuf>,
    /// Override API page size.
    pub page_size: Option<u32>,
    /// Override HTTP timeout.
    pub timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// Confluence API settings.
    pub confluence: ConfluenceSettings,
    /// Where to find the credential file.
    pub credentials: CredentialsConfig,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Base directory; each folder export gets a subdirectory.
    pub dir: PathBuf,
}

/// Confluence API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfluenceSettings {
    /// Number of results requested per paginated call.
    pub page_size: u32,
    /// Global HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl ConfluenceSettings {
    /// HTTP timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ConfluenceSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Credential file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsConfig {
    /// Explicit credential file. When set, no search is performed.
    pub file: Option<PathBuf>,
    /// Candidate paths tried in order when `file` is unset.
    pub search_paths: Vec<PathBuf>,
}

/// Raw configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigRaw {
    output: OutputConfigRaw,
    confluence: ConfluenceSettingsRaw,
    credentials: CredentialsConfigRaw,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct OutputConfigRaw {
    dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfluenceSettingsRaw {
    page_size: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct CredentialsConfigRaw {
    file: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`EXPORT_DIR`} not set").
        message: String,
    },
    /// No credential file exists at any searched location.
    #[error("Credentials file not found (searched: {})", display_paths(.searched))]
    CredentialsNotFound {
        /// Paths that were tried, in order.
        searched: Vec<PathBuf>,
    },
    /// A required credential key is absent or empty.
    #[error("Missing required credential {key} in {}", .path.display())]
    MissingCredentials {
        /// The missing key (e.g., `CONFLUENCE_API_TOKEN`).
        key: String,
        /// The credential file that was read.
        path: PathBuf,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load Confluence credentials from the configured location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsNotFound`] or
    /// [`ConfigError::MissingCredentials`] when the file is absent or
    /// incomplete.
    pub fn load_credentials(&self) -> Result<Credentials, ConfigError> {
        match &self.credentials.file {
            Some(path) => Credentials::from_file(path),
            None => Credentials::discover(&self.credentials.search_paths),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.output.dir.to_string_lossy(), "output.dir")?;

        let page_size = self.confluence.page_size;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "confluence.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.confluence.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "confluence.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.output_dir {
            self.output.dir.clone_from(dir);
        }
        if let Some(file) = &settings.credentials_file {
            self.credentials.file = Some(file.clone());
        }
        if let Some(page_size) = settings.page_size {
            self.confluence.page_size = page_size;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.confluence.timeout_secs = timeout_secs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            output: OutputConfig {
                dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            confluence: ConfluenceSettings::default(),
            credentials: CredentialsConfig {
                file: None,
                search_paths: default_search_paths(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: ConfigRaw = toml::from_str(&content)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_raw(raw, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variables and resolve relative paths against
    /// `config_dir`.
    fn from_raw(raw: ConfigRaw, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default_with_base(config_dir);

        if let Some(dir) = raw.output.dir {
            let dir = expand::expand_env(&dir, "output.dir")?;
            config.output.dir = config_dir.join(dir);
        }
        if let Some(file) = raw.credentials.file {
            let file = expand::expand_env(&file, "credentials.file")?;
            config.credentials.file = Some(config_dir.join(file));
        }
        if let Some(page_size) = raw.confluence.page_size {
            config.confluence.page_size = page_size;
        }
        if let Some(timeout_secs) = raw.confluence.timeout_secs {
            config.confluence.timeout_secs = timeout_secs;
        }

        Ok(config)
    }
}
