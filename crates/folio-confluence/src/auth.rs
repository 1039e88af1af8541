//! HTTP basic authentication with an Atlassian API token.

use std::fmt;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

/// Precomputed `Authorization` header value.
pub(crate) struct BasicAuth {
    header: String,
}

impl BasicAuth {
    /// Build `Basic base64(email:token)`.
    pub(crate) fn new(email: &str, api_token: &str) -> Self {
        let encoded = BASE64_STANDARD.encode(format!("{email}:{api_token}"));
        Self {
            header: format!("Basic {encoded}"),
        }
    }

    pub(crate) fn header(&self) -> &str {
        &self.header
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicAuth(<redacted>)")
    }
}
