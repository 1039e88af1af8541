//! Confluence credential file loading.
//!
//! The credential file holds plain `KEY=value` lines. Blank lines, lines
//! starting with `#` and lines without `=` are ignored; keys and values are
//! trimmed.
//!
//! ```text
//! CONFLUENCE_BASE_URL=https://example.atlassian.net
//! CONFLUENCE_API_EMAIL=someone@example.com
//! CONFLUENCE_API_TOKEN=secret
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ConfigError;

/// Default credential filename searched next to the executable.
pub const CREDENTIALS_FILENAME: &str = "Tokens_txt.txt";

const BASE_URL_KEY: &str = "CONFLUENCE_BASE_URL";
const EMAIL_KEY: &str = "CONFLUENCE_API_EMAIL";
const TOKEN_KEY: &str = "CONFLUENCE_API_TOKEN";

/// Resolved Confluence credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Site base URL without trailing slash (e.g. `https://example.atlassian.net`).
    pub base_url: String,
    /// Account email used as the basic-auth user.
    pub email: String,
    /// API token used as the basic-auth password.
    pub api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load credentials from the first existing file in `search_paths`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsNotFound`] if none of the paths exist,
    /// or any error from [`Credentials::from_file`].
    pub fn discover(search_paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let path = search_paths
            .iter()
            .find(|p| p.is_file())
            .ok_or_else(|| ConfigError::CredentialsNotFound {
                searched: search_paths.to_vec(),
            })?;
        Self::from_file(path)
    }

    /// Load credentials from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CredentialsNotFound`] if the file does not exist,
    /// [`ConfigError::Io`] if it cannot be read, and
    /// [`ConfigError::MissingCredentials`] if a required key is absent or empty.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::CredentialsNotFound {
                searched: vec![path.to_path_buf()],
            });
        }
        debug!("Loading credentials from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse credential file content.
    ///
    /// `source` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if a required key is absent
    /// or empty, or [`ConfigError::Validation`] if the base URL has no
    /// http(s) scheme.
    pub fn parse(content: &str, source: &Path) -> Result<Self, ConfigError> {
        let values = parse_key_values(content);

        let require = |key: &str| -> Result<String, ConfigError> {
            values
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| ConfigError::MissingCredentials {
                    key: key.to_owned(),
                    path: source.to_path_buf(),
                })
        };

        let base_url = require(BASE_URL_KEY)?;
        let email = require(EMAIL_KEY)?;
        let api_token = require(TOKEN_KEY)?;

        crate::require_http_url(&base_url, BASE_URL_KEY)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            email,
            api_token,
        })
    }
}

/// Default credential search paths: next to the executable, then its parent
/// directory, then the current directory.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        paths.push(exe_dir.join(CREDENTIALS_FILENAME));
        if let Some(parent) = exe_dir.parent() {
            paths.push(parent.join(CREDENTIALS_FILENAME));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(CREDENTIALS_FILENAME);
        if !paths.contains(&candidate) {
            paths.push(candidate);
        }
    }
    paths
}

fn parse_key_values(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect()
}
