//! Error types for export and merge.

use std::path::PathBuf;

use folio_confluence::ConfluenceError;
use folio_content::ContentError;

/// Error while exporting a folder or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Confluence request or URL error.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),

    /// Neither the folder walk nor the content search found a page.
    #[error("No pages found in folder '{folder}'")]
    NoPages {
        /// Folder title.
        folder: String,
    },

    /// Page body could not be normalized.
    #[error("Page '{title}': {source}")]
    Content {
        /// Title of the failing page.
        title: String,
        /// Underlying error.
        #[source]
        source: ContentError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `.docx` package error.
    #[error("Document package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A `.docx` file could not be read.
    #[error("Document could not be read: {0}")]
    DocxRead(#[from] docx_rs::ReaderError),
}

/// Error while merging a folder's exports.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The folder does not exist.
    #[error("Folder not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The folder has no exports of the requested format.
    #[error("No .{extension} files found in {}", .dir.display())]
    NoFilesFound {
        /// Folder searched.
        dir: PathBuf,
        /// Extension searched for.
        extension: &'static str,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Merged document could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}
