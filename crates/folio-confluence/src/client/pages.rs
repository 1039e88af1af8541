//! Page operations.

use folio_content::{ContentFormat, RawBody};
use tracing::{debug, info};

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Page, PageResponse};

impl ConfluenceClient {
    /// Get a page with its body.
    ///
    /// Requests the ADF body first; pages without one are fetched again in
    /// storage format.
    pub(crate) fn fetch_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        info!("Getting page {}", page_id);

        let response: PageResponse = self.get_json(&self.page_url(page_id, "atlas_doc_format"))?;
        if let Some(value) = response.body_value(ContentFormat::Adf) {
            let body = RawBody::new(ContentFormat::Adf, value);
            return Ok(response.into_page(body, &self.base_url));
        }

        debug!("Page {} has no ADF body, requesting storage format", page_id);
        let response: PageResponse = self.get_json(&self.page_url(page_id, "storage"))?;
        let body = RawBody::new(
            ContentFormat::Html,
            response.body_value(ContentFormat::Html).unwrap_or_default(),
        );
        Ok(response.into_page(body, &self.base_url))
    }

    fn page_url(&self, page_id: &str, body_format: &str) -> String {
        format!(
            "{}/pages/{}?body-format={}",
            self.api_url(),
            page_id,
            body_format
        )
    }
}
