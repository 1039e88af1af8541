//! Folder export pipeline.
//!
//! [`FolderExporter`] drives one folder link through the whole flow:
//!
//! 1. Parse the link into space key and folder id
//! 2. Fetch the folder title
//! 3. Walk the folder into an ordered page list, falling back to a content
//!    search; a folder without pages fails
//! 4. Create the output directory, normalize each page and write its `.txt`
//!    and `.docx`
//!
//! Batches isolate failures: a folder that fails is reported and the next
//! link is processed.

use std::fs;
use std::path::{Path, PathBuf};

use folio_confluence::{ContentSource, FolderUrl, FolderWalker};
use tracing::{info, warn};

use crate::document::PageDocument;
use crate::error::ExportError;
use crate::filename::{FileNamer, sanitize_filename};
use crate::text::TextExporter;
use crate::word::WordExporter;

/// Result of exporting one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderReport {
    /// Folder title as served by the API.
    pub folder_title: String,
    /// Directory the files were written to.
    pub output_dir: PathBuf,
    /// Number of pages exported.
    pub page_count: usize,
}

/// Outcome of one folder link in a batch.
#[derive(Debug)]
pub struct FolderOutcome {
    /// The link as given.
    pub url: String,
    /// Export result.
    pub result: Result<FolderReport, ExportError>,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input link.
    pub outcomes: Vec<FolderOutcome>,
}

impl BatchReport {
    /// Number of folders that failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Whether any folder failed.
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// Total pages exported across successful folders.
    pub fn page_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|report| report.page_count)
            .sum()
    }
}

/// Exports Confluence folders to text and Word files.
pub struct FolderExporter<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    output_dir: PathBuf,
    text: TextExporter,
    word: WordExporter,
}

impl<'a, S: ContentSource + ?Sized> FolderExporter<'a, S> {
    /// Create an exporter writing below `output_dir`.
    #[must_use]
    pub fn new(source: &'a S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            text: TextExporter::new(),
            word: WordExporter::new(),
        }
    }

    /// Export every folder link in order.
    ///
    /// Invalid links and failing folders are recorded in the report and do
    /// not stop the batch.
    pub fn export_batch<T: AsRef<str>>(&self, urls: &[T]) -> BatchReport {
        let outcomes = urls
            .iter()
            .map(|url| {
                let url = url.as_ref();
                let result = FolderUrl::parse(url)
                    .map_err(ExportError::from)
                    .and_then(|folder_url| self.export(&folder_url));
                if let Err(e) = &result {
                    warn!("Folder export failed for {}: {}", url, e);
                }
                FolderOutcome {
                    url: url.to_owned(),
                    result,
                }
            })
            .collect();
        BatchReport { outcomes }
    }

    /// Export one folder.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoPages`] for a folder without pages, otherwise
    /// the first API, normalization or IO error. Pages written before the
    /// failure are left in place.
    pub fn export(&self, url: &FolderUrl) -> Result<FolderReport, ExportError> {
        let folder = self.source.get_folder(url.folder_id())?;
        let pages =
            FolderWalker::new(self.source).collect_or_search(url.space_key(), url.folder_id())?;
        if pages.is_empty() {
            return Err(ExportError::NoPages {
                folder: folder.title,
            });
        }

        let dir = self.output_dir.join(sanitize_filename(&folder.title));
        fs::create_dir_all(&dir)?;
        info!("Exporting folder '{}' to {}", folder.title, dir.display());

        let mut namer = FileNamer::new();
        for page in &pages {
            let doc = PageDocument::from_page(page, url.space_key())?;
            let name = namer.name_for(&page.title, &page.id);
            self.write_page(&dir, &name, &doc)?;
            info!("Exported page '{}' as {}", page.title, name);
        }

        info!("Exported {} pages from '{}'", pages.len(), folder.title);
        Ok(FolderReport {
            folder_title: folder.title,
            output_dir: dir,
            page_count: pages.len(),
        })
    }

    fn write_page(&self, dir: &Path, name: &str, doc: &PageDocument) -> Result<(), ExportError> {
        fs::write(dir.join(format!("{name}.txt")), self.text.render(doc))?;
        self.word.render(doc).save(&dir.join(format!("{name}.docx")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_confluence::{ChildItem, ChildKind, ConfluenceError, MockSource, Page};
    use folio_content::{ContentFormat, RawBody};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::docx::DocxDocument;

    const FOLDER: &str = "https://example.atlassian.net/wiki/spaces/REL/folder/100";

    fn page(id: &str, title: &str) -> ChildItem {
        ChildItem::new(id, ChildKind::Page, title)
    }

    fn release_source() -> MockSource {
        MockSource::new()
            .with_folder("100", "Release Notes")
            .with_children("100", vec![page("1", "Page 1"), page("2", "Page 2")])
            .with_pages(["1", "2"])
    }

    #[test]
    fn test_export_writes_both_formats() {
        let out = tempfile::tempdir().unwrap();
        let source = release_source();

        let report = FolderExporter::new(&source, out.path())
            .export(&FolderUrl::parse(FOLDER).unwrap())
            .unwrap();

        assert_eq!(report.page_count, 2);
        assert_eq!(report.output_dir, out.path().join("Release Notes"));
        for name in ["Page 1", "Page 2"] {
            assert!(report.output_dir.join(format!("{name}.txt")).is_file());
            assert!(report.output_dir.join(format!("{name}.docx")).is_file());
        }

        let text = fs::read_to_string(report.output_dir.join("Page 1.txt")).unwrap();
        assert!(text.contains("Space: REL\n"));
        assert!(text.ends_with("Body of 1\n"));

        let expected = PageDocument::from_page(&source.get_page("2").unwrap(), "REL").unwrap();
        let doc = DocxDocument::open(&report.output_dir.join("Page 2.docx")).unwrap();
        assert_eq!(doc, WordExporter::new().render(&expected));
    }

    #[test]
    fn test_export_twice_is_byte_identical() {
        let out = tempfile::tempdir().unwrap();
        let source = release_source();
        let exporter = FolderExporter::new(&source, out.path());
        let url = FolderUrl::parse(FOLDER).unwrap();

        exporter.export(&url).unwrap();
        let first_txt = fs::read(out.path().join("Release Notes/Page 1.txt")).unwrap();
        let first_docx = fs::read(out.path().join("Release Notes/Page 1.docx")).unwrap();

        exporter.export(&url).unwrap();
        assert_eq!(
            fs::read(out.path().join("Release Notes/Page 1.txt")).unwrap(),
            first_txt
        );
        assert_eq!(
            fs::read(out.path().join("Release Notes/Page 1.docx")).unwrap(),
            first_docx
        );
    }

    #[test]
    fn test_colliding_titles_get_page_id() {
        let out = tempfile::tempdir().unwrap();
        let source = MockSource::new()
            .with_folder("100", "Notes")
            .with_children("100", vec![page("1", "A/B"), page("2", "A:B")])
            .with_page(Page::new(
                "1",
                "A/B",
                RawBody::new(ContentFormat::Html, "<p>first</p>"),
            ))
            .with_page(Page::new(
                "2",
                "A:B",
                RawBody::new(ContentFormat::Html, "<p>second</p>"),
            ));

        FolderExporter::new(&source, out.path())
            .export(&FolderUrl::parse(FOLDER).unwrap())
            .unwrap();

        let dir = out.path().join("Notes");
        assert!(fs::read_to_string(dir.join("A_B.txt")).unwrap().contains("first"));
        assert!(fs::read_to_string(dir.join("A_B (2).txt")).unwrap().contains("second"));
    }

    #[test]
    fn test_adf_and_html_tables_export_identically() {
        let html = "<table><tr><th>Version</th><th>Date</th></tr>\
                    <tr><td>2.10.0</td><td>2024-03-01</td></tr></table>";
        let adf = r#"{"type":"doc","version":1,"content":[{"type":"table","content":[
            {"type":"tableRow","content":[
                {"type":"tableHeader","content":[{"type":"paragraph","content":[{"type":"text","text":"Version"}]}]},
                {"type":"tableHeader","content":[{"type":"paragraph","content":[{"type":"text","text":"Date"}]}]}]},
            {"type":"tableRow","content":[
                {"type":"tableCell","content":[{"type":"paragraph","content":[{"type":"text","text":"2.10.0"}]}]},
                {"type":"tableCell","content":[{"type":"paragraph","content":[{"type":"text","text":"2024-03-01"}]}]}]}
        ]}]}"#;

        let out = tempfile::tempdir().unwrap();
        let source = MockSource::new()
            .with_folder("100", "Tables")
            .with_children("100", vec![page("1", "Html"), page("2", "Adf")])
            .with_page(Page::new("1", "Html", RawBody::new(ContentFormat::Html, html)))
            .with_page(Page::new("2", "Adf", RawBody::new(ContentFormat::Adf, adf)));

        FolderExporter::new(&source, out.path())
            .export(&FolderUrl::parse(FOLDER).unwrap())
            .unwrap();

        let body = |name: &str| {
            let text = fs::read_to_string(out.path().join("Tables").join(name)).unwrap();
            text.split_once("URL: \n\n").unwrap().1.to_owned()
        };
        assert_eq!(body("Html.txt"), body("Adf.txt"));
        assert!(body("Adf.txt").contains("2.10.0"));
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let out = tempfile::tempdir().unwrap();
        let source = MockSource::new()
            .with_failure("200", 403)
            .with_folder("300", "Good")
            .with_children("300", vec![page("3", "Three")])
            .with_page(Page::new(
                "3",
                "Three",
                RawBody::new(ContentFormat::Html, "<p>three</p>"),
            ));

        let report = FolderExporter::new(&source, out.path()).export_batch(&[
            "https://example.atlassian.net/wiki/spaces/REL/folder/200",
            "not a folder link",
            "https://example.atlassian.net/wiki/spaces/REL/folder/300",
        ]);

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.failed_count(), 2);
        assert!(report.has_failures());
        assert_eq!(report.page_count(), 1);
        assert!(matches!(
            report.outcomes[0].result,
            Err(ExportError::Confluence(ConfluenceError::Auth { .. }))
        ));
        assert!(matches!(
            report.outcomes[1].result,
            Err(ExportError::Confluence(ConfluenceError::InvalidUrl { .. }))
        ));
        assert!(out.path().join("Good/Three.txt").is_file());
    }

    #[test]
    fn test_empty_folder_fails() {
        let out = tempfile::tempdir().unwrap();
        let source = MockSource::new().with_folder("100", "Empty");

        let err = FolderExporter::new(&source, out.path())
            .export(&FolderUrl::parse(FOLDER).unwrap())
            .unwrap_err();
        assert!(matches!(err, ExportError::NoPages { ref folder } if folder == "Empty"));
        assert!(!out.path().join("Empty").exists());
        assert!(source.requests().contains(&"search 100".to_owned()));

        let report = FolderExporter::new(&source, out.path()).export_batch(&[FOLDER]);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_search_fallback_exports_pages() {
        let out = tempfile::tempdir().unwrap();
        let source = MockSource::new()
            .with_folder("100", "Found")
            .with_search_results("100", vec![page("7", "Page 7")])
            .with_pages(["7"]);

        let report = FolderExporter::new(&source, out.path())
            .export(&FolderUrl::parse(FOLDER).unwrap())
            .unwrap();
        assert_eq!(report.page_count, 1);
        assert!(out.path().join("Found/Page 7.txt").is_file());
    }

    #[test]
    fn test_bad_page_aborts_folder() {
        let out = tempfile::tempdir().unwrap();
        let source = MockSource::new()
            .with_children("100", vec![page("1", "Broken")])
            .with_page(Page::new(
                "1",
                "Broken",
                RawBody::new(ContentFormat::Adf, "not json"),
            ));

        let err = FolderExporter::new(&source, out.path())
            .export(&FolderUrl::parse(FOLDER).unwrap())
            .unwrap_err();
        assert!(matches!(err, ExportError::Content { ref title, .. } if title == "Broken"));
        assert!(!out.path().join("100/Broken.txt").exists());
    }
}
