//! Confluence Cloud REST API client.
//!
//! Provides a sync HTTP client for the `/wiki/api/v2` endpoints with
//! API-token basic authentication.

mod folders;
mod pages;
mod search;

use folio_config::{ConfluenceSettings, Credentials};
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::auth::BasicAuth;
use crate::error::ConfluenceError;

/// Upper bound for a response body; large ADF documents exceed ureq's default.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth: BasicAuth,
    page_size: u32,
}

impl ConfluenceClient {
    /// Create a client for the site in `credentials`.
    pub fn new(credentials: &Credentials, settings: &ConfluenceSettings) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(settings.timeout()))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: credentials.base_url.trim_end_matches('/').to_owned(),
            auth: BasicAuth::new(&credentials.email, &credentials.api_token),
            page_size: settings.page_size,
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/wiki/api/v2", self.base_url)
    }

    /// Get the site base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ConfluenceError> {
        debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .header("Authorization", self.auth.header())
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::from_status(status, url, error_body));
        }

        let body = body_reader
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}
