//! Folder and page types.

use folio_content::{ContentFormat, RawBody};
use serde::Deserialize;

/// Confluence folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    /// Folder ID.
    pub id: String,
    /// Folder title; names the export directory.
    pub title: String,
}

/// Page version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    /// Version number.
    pub number: u32,
    /// When this version was created (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Page with its body, ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Parent folder or page ID.
    pub parent_id: Option<String>,
    /// Current version.
    pub version: PageVersion,
    /// Body in the format the API served.
    pub body: RawBody,
    /// Absolute web link (`{base}/wiki{webui}`).
    pub web_url: Option<String>,
}

impl Page {
    /// Create a page with default version and no links.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: RawBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: None,
            version: PageVersion::default(),
            body,
            web_url: None,
        }
    }
}

/// `GET /pages/{id}` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageResponse {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub version: PageVersion,
    #[serde(default)]
    pub body: PageBody,
    #[serde(rename = "_links", default)]
    pub links: WebLinks,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageBody {
    #[serde(default)]
    pub atlas_doc_format: Option<BodyRepresentation>,
    #[serde(default)]
    pub storage: Option<BodyRepresentation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BodyRepresentation {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WebLinks {
    #[serde(default)]
    pub webui: Option<String>,
}

impl PageResponse {
    /// Non-empty body in the requested representation.
    pub(crate) fn body_value(&self, format: ContentFormat) -> Option<&str> {
        let repr = match format {
            ContentFormat::Adf => self.body.atlas_doc_format.as_ref(),
            ContentFormat::Html => self.body.storage.as_ref(),
        };
        repr.map(|r| r.value.as_str())
            .filter(|value| !value.trim().is_empty())
    }

    /// Convert into a [`Page`] carrying `body`; `base_url` is the site root.
    pub(crate) fn into_page(self, body: RawBody, base_url: &str) -> Page {
        Page {
            web_url: self.links.webui.map(|webui| format!("{base_url}/wiki{webui}")),
            id: self.id,
            title: self.title,
            parent_id: self.parent_id,
            version: self.version,
            body,
        }
    }
}
