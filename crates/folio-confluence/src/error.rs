//! Error types for Confluence access.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// Folder link does not have the `/wiki/spaces/{key}/folder/{id}` shape.
    #[error("Invalid Confluence folder URL: {url}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
    },

    /// Credentials rejected (401/403).
    #[error("Authentication failed ({status}) for {url}: check CONFLUENCE_API_EMAIL and CONFLUENCE_API_TOKEN")]
    Auth {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// Folder or page does not exist or is not visible (404).
    #[error("Not found: {url}")]
    NotFound {
        /// Request URL.
        url: String,
    },

    /// Server-side failure (5xx). Not retried.
    #[error("Server error {status} for {url}: {body}")]
    TransientHttp {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body.
        body: String,
    },

    /// Any other non-success status.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body is not the expected JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

impl ConfluenceError {
    /// Map a non-success HTTP status to an error.
    pub(crate) fn from_status(status: u16, url: &str, body: String) -> Self {
        match status {
            401 | 403 => Self::Auth {
                status,
                url: url.to_owned(),
            },
            404 => Self::NotFound {
                url: url.to_owned(),
            },
            500..=599 => Self::TransientHttp {
                status,
                url: url.to_owned(),
                body,
            },
            _ => Self::Http { status, body },
        }
    }
}

impl From<serde_json::Error> for ConfluenceError {
    fn from(e: serde_json::Error) -> Self {
        ConfluenceError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ConfluenceError {
    fn from(e: ureq::Error) -> Self {
        ConfluenceError::Transport(e.to_string())
    }
}
