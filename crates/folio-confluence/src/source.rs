//! Content source abstraction.
//!
//! [`ContentSource`] is the seam between traversal and transport: the
//! [`ConfluenceClient`](crate::ConfluenceClient) implements it over HTTP and
//! [`MockSource`](crate::MockSource) in memory.

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{ChildItem, Folder, Page};

/// Node whose children can be listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentRef {
    /// Folder by ID.
    Folder(String),
    /// Page by ID.
    Page(String),
}

impl ContentRef {
    /// Content ID.
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(id) | Self::Page(id) => id,
        }
    }
}

/// Read access to a Confluence content tree.
pub trait ContentSource {
    /// Get folder metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be fetched.
    fn get_folder(&self, folder_id: &str) -> Result<Folder, ConfluenceError>;

    /// List all direct children of a folder or page, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if any listing request fails.
    fn list_children(&self, parent: &ContentRef) -> Result<Vec<ChildItem>, ConfluenceError>;

    /// Get a page with its body.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched.
    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError>;

    /// Find pages below a folder by content search, for folders whose child
    /// listing is empty.
    ///
    /// Sources without search find nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the search cannot be run at all.
    fn search_pages(
        &self,
        _space_key: &str,
        _folder_id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        Ok(Vec::new())
    }
}

impl ContentSource for ConfluenceClient {
    fn get_folder(&self, folder_id: &str) -> Result<Folder, ConfluenceError> {
        self.fetch_folder(folder_id)
    }

    fn list_children(&self, parent: &ContentRef) -> Result<Vec<ChildItem>, ConfluenceError> {
        match parent {
            ContentRef::Folder(id) => self.list_folder_children(id),
            ContentRef::Page(id) => self.list_page_children(id),
        }
    }

    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        self.fetch_page(page_id)
    }

    fn search_pages(
        &self,
        space_key: &str,
        folder_id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        self.search_folder_pages(space_key, folder_id)
    }
}
