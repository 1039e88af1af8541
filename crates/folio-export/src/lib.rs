//! Document export for folio.
//!
//! Renders normalized pages to plain text and Word, drives whole-folder
//! exports and merges a folder's exports into one document.
//!
//! # Example
//!
//! ```
//! use folio_confluence::{ChildItem, ChildKind, FolderUrl, MockSource};
//! use folio_export::{FolderExporter, MergeFormat, Merger};
//!
//! let source = MockSource::new()
//!     .with_folder("7", "Release Notes")
//!     .with_children("7", vec![ChildItem::new("1", ChildKind::Page, "Page 1")])
//!     .with_pages(["1"]);
//! let out = tempfile::tempdir().unwrap();
//!
//! let url = FolderUrl::parse("https://example.atlassian.net/wiki/spaces/REL/folder/7").unwrap();
//! let report = FolderExporter::new(&source, out.path()).export(&url).unwrap();
//! assert_eq!(report.page_count, 1);
//!
//! let merged = Merger::new(&report.output_dir).merge(MergeFormat::Txt).unwrap();
//! assert!(merged.ends_with("ALL_RELEASES_MERGED_Release Notes.txt"));
//! ```

mod document;
pub mod docx;
mod error;
mod filename;
mod merge;
mod pipeline;
mod text;
mod word;

pub use document::PageDocument;
pub use error::{ExportError, MergeError};
pub use filename::{FileNamer, MAX_FILENAME_CHARS, sanitize_filename};
pub use merge::{MERGED_PREFIX, MergeFormat, Merger, natural_cmp};
pub use pipeline::{BatchReport, FolderExporter, FolderOutcome, FolderReport};
pub use text::TextExporter;
pub use word::WordExporter;
