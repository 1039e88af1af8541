//! Page content prepared for rendering.

use folio_confluence::Page;
use folio_content::{Block, normalize};

use crate::error::ExportError;

/// A page's metadata and normalized blocks, shared by both exporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// Page title.
    pub title: String,
    /// Key of the space the folder belongs to.
    pub space_key: String,
    /// Version number.
    pub version: u32,
    /// Creation time of the current version, as served by the API.
    pub last_modified: String,
    /// Web link to the page.
    pub url: String,
    /// Normalized body.
    pub blocks: Vec<Block>,
}

impl PageDocument {
    /// Normalize a fetched page.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Content`] if the body cannot be normalized.
    pub fn from_page(page: &Page, space_key: &str) -> Result<Self, ExportError> {
        let blocks = normalize(&page.body).map_err(|source| ExportError::Content {
            title: page.title.clone(),
            source,
        })?;
        Ok(Self {
            title: page.title.clone(),
            space_key: space_key.to_owned(),
            version: page.version.number,
            last_modified: page.version.created_at.clone().unwrap_or_default(),
            url: page.web_url.clone().unwrap_or_default(),
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use folio_confluence::PageVersion;
    use folio_content::{ContentFormat, RawBody};

    use super::*;

    #[test]
    fn test_from_page() {
        let mut page = Page::new("1", "Notes", RawBody::new(ContentFormat::Html, "<p>Hi</p>"));
        page.version = PageVersion {
            number: 3,
            created_at: Some("2024-01-01T00:00:00Z".to_owned()),
        };
        page.web_url = Some("https://x/wiki/p/1".to_owned());

        let doc = PageDocument::from_page(&page, "REL").unwrap();
        assert_eq!(doc.space_key, "REL");
        assert_eq!(doc.version, 3);
        assert_eq!(doc.last_modified, "2024-01-01T00:00:00Z");
        assert_eq!(doc.blocks, vec![Block::Paragraph("Hi".to_owned())]);
    }

    #[test]
    fn test_bad_body_names_page() {
        let page = Page::new("1", "Broken", RawBody::new(ContentFormat::Adf, "not json"));
        let err = PageDocument::from_page(&page, "REL").unwrap_err();
        assert!(err.to_string().starts_with("Page 'Broken'"));
    }
}
