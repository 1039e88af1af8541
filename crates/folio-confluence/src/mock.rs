//! In-memory content source for testing.
//!
//! Provides [`MockSource`] for exercising traversal and export without HTTP.

use std::collections::HashMap;
use std::sync::RwLock;

use folio_content::{ContentFormat, RawBody};

use crate::error::ConfluenceError;
use crate::source::{ContentRef, ContentSource};
use crate::types::{ChildItem, Folder, Page};

/// Mock content source.
///
/// Children, pages and folders are registered with builder methods. Unknown
/// folders have a title equal to their ID and unknown parents have no
/// children; unknown pages are a 404. Every call is recorded.
///
/// # Example
///
/// ```
/// use folio_confluence::{ChildItem, ChildKind, FolderWalker, MockSource};
///
/// let source = MockSource::new()
///     .with_children("1", vec![ChildItem::new("2", ChildKind::Page, "Notes")])
///     .with_pages(["2"]);
///
/// let pages = FolderWalker::new(&source).collect("1").unwrap();
/// assert_eq!(pages[0].id, "2");
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    folders: HashMap<String, Folder>,
    children: HashMap<String, Vec<ChildItem>>,
    pages: HashMap<String, Page>,
    search_results: HashMap<String, Vec<ChildItem>>,
    failures: HashMap<String, u16>,
    requests: RwLock<Vec<String>>,
}

impl MockSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a folder title.
    #[must_use]
    pub fn with_folder(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        self.folders.insert(
            id.clone(),
            Folder {
                id,
                title: title.into(),
            },
        );
        self
    }

    /// Register the children of a folder or page.
    #[must_use]
    pub fn with_children(mut self, parent_id: impl Into<String>, children: Vec<ChildItem>) -> Self {
        self.children.insert(parent_id.into(), children);
        self
    }

    /// Register a page.
    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.clone(), page);
        self
    }

    /// Register pages with a one-paragraph HTML body and title `Page {id}`.
    #[must_use]
    pub fn with_pages<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for id in ids {
            let id = id.into();
            let body = RawBody::new(ContentFormat::Html, format!("<p>Body of {id}</p>"));
            let page = Page::new(id.clone(), format!("Page {id}"), body);
            self.pages.insert(id, page);
        }
        self
    }

    /// Register what a content search below `folder_id` finds.
    #[must_use]
    pub fn with_search_results(
        mut self,
        folder_id: impl Into<String>,
        results: Vec<ChildItem>,
    ) -> Self {
        self.search_results.insert(folder_id.into(), results);
        self
    }

    /// Make every call touching `id` fail with HTTP `status`.
    #[must_use]
    pub fn with_failure(mut self, id: impl Into<String>, status: u16) -> Self {
        self.failures.insert(id.into(), status);
        self
    }

    /// Calls made so far, as `folder {id}`, `children {id}`, `page {id}` or
    /// `search {id}`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    fn record(&self, kind: &str, id: &str) -> Result<(), ConfluenceError> {
        self.requests.write().unwrap().push(format!("{kind} {id}"));
        match self.failures.get(id) {
            Some(&status) => Err(ConfluenceError::from_status(
                status,
                &format!("mock://{kind}/{id}"),
                String::new(),
            )),
            None => Ok(()),
        }
    }
}

impl ContentSource for MockSource {
    fn get_folder(&self, folder_id: &str) -> Result<Folder, ConfluenceError> {
        self.record("folder", folder_id)?;
        Ok(self.folders.get(folder_id).cloned().unwrap_or_else(|| Folder {
            id: folder_id.to_owned(),
            title: folder_id.to_owned(),
        }))
    }

    fn list_children(&self, parent: &ContentRef) -> Result<Vec<ChildItem>, ConfluenceError> {
        self.record("children", parent.id())?;
        Ok(self.children.get(parent.id()).cloned().unwrap_or_default())
    }

    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        self.record("page", page_id)?;
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| ConfluenceError::NotFound {
                url: format!("mock://page/{page_id}"),
            })
    }

    fn search_pages(
        &self,
        _space_key: &str,
        folder_id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        self.record("search", folder_id)?;
        Ok(self.search_results.get(folder_id).cloned().unwrap_or_default())
    }
}
