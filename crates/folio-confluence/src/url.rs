//! Folder link parsing.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfluenceError;

static FOLDER_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^/?#]+)?/wiki/spaces/([^/?#]+)/folder/(\d+)/?(?:[?#].*)?$")
        .expect("invalid folder URL regex")
});

/// Parsed Confluence folder link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderUrl {
    url: String,
    space_key: String,
    folder_id: String,
}

impl FolderUrl {
    /// Parse a link of the form `https://{site}/wiki/spaces/{key}/folder/{id}`.
    ///
    /// Scheme and host are optional; a trailing slash, query string or
    /// fragment is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::InvalidUrl`] if the path has another shape
    /// or the folder id is not numeric.
    pub fn parse(url: &str) -> Result<Self, ConfluenceError> {
        let trimmed = url.trim();
        let caps = FOLDER_PATH
            .captures(trimmed)
            .ok_or_else(|| ConfluenceError::InvalidUrl {
                url: url.to_owned(),
            })?;
        Ok(Self {
            url: trimmed.to_owned(),
            space_key: caps[1].to_owned(),
            folder_id: caps[2].to_owned(),
        })
    }

    /// Space key (`ENG` in `/wiki/spaces/ENG/folder/1`).
    pub fn space_key(&self) -> &str {
        &self.space_key
    }

    /// Numeric folder id.
    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    /// The link as given (trimmed).
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl FromStr for FolderUrl {
    type Err = ConfluenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FolderUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
