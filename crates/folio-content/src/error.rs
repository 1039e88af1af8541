//! Error types for content normalization.

use crate::ContentFormat;

/// Error from body normalization.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The markup does not match its declared format.
    #[error("Unsupported {format} content: {reason}")]
    UnsupportedContentFormat {
        /// Declared format of the body.
        format: ContentFormat,
        /// Why the body was rejected.
        reason: String,
    },
}

impl ContentError {
    pub(crate) fn unsupported(format: ContentFormat, reason: impl Into<String>) -> Self {
        Self::UnsupportedContentFormat {
            format,
            reason: reason.into(),
        }
    }
}

/// Error while parsing storage XHTML into a tree.
#[derive(Debug, thiserror::Error)]
pub(crate) enum MarkupError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
