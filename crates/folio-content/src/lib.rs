//! Page body normalization for folio.
//!
//! Confluence serves page bodies either as ADF (Atlassian Document Format,
//! a JSON tree) or as storage-format XHTML. Both are reduced to the same
//! ordered sequence of [`Block`]s, which the exporters render.
//!
//! ```
//! use folio_content::{Block, ContentFormat, RawBody, normalize};
//!
//! let body = RawBody::new(ContentFormat::Html, "<p>Hello <strong>world</strong></p>");
//! let blocks = normalize(&body).unwrap();
//! assert_eq!(blocks, vec![Block::Paragraph("Hello world".to_owned())]);
//! ```

mod adf;
mod block;
mod error;
mod html;
mod table;
mod text;

pub use adf::parse_adf;
pub use block::{Block, ExpandableSection};
pub use error::ContentError;
pub use html::parse_html;
pub use table::{CELL_PADDING, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, TableBlock};

use std::fmt;

/// Markup flavour of a page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFormat {
    /// Atlassian Document Format (JSON).
    Adf,
    /// Confluence storage format (XHTML with `ac:`/`ri:` macros).
    Html,
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adf => f.write_str("ADF"),
            Self::Html => f.write_str("HTML"),
        }
    }
}

/// Raw page body as served by the API, tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody {
    /// Markup flavour.
    pub format: ContentFormat,
    /// Raw markup.
    pub value: String,
}

impl RawBody {
    /// Create a raw body.
    pub fn new(format: ContentFormat, value: impl Into<String>) -> Self {
        Self {
            format,
            value: value.into(),
        }
    }
}

/// Normalize a raw page body into blocks.
///
/// # Errors
///
/// Returns [`ContentError::UnsupportedContentFormat`] if the markup does not
/// match its format tag (invalid ADF JSON, or HTML that is not markup at all).
pub fn normalize(body: &RawBody) -> Result<Vec<Block>, ContentError> {
    match body.format {
        ContentFormat::Adf => parse_adf(&body.value),
        ContentFormat::Html => parse_html(&body.value),
    }
}
