//! Folder traversal.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::error::ConfluenceError;
use crate::source::{ContentRef, ContentSource};
use crate::types::{ChildItem, ChildKind, Page};

/// Flattens a folder tree into its pages.
///
/// Traversal is depth-first pre-order in API order: a page is emitted when
/// reached and its own children are visited before its next sibling; a
/// folder's children are visited in place. An explicit stack of child
/// queues replaces recursion, and a visited set stops cycles.
pub struct FolderWalker<'a, S: ContentSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ContentSource + ?Sized> FolderWalker<'a, S> {
    /// Create a walker over `source`.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Collect every page below `folder_id`.
    ///
    /// # Errors
    ///
    /// Returns the first API error; the walk is abandoned.
    pub fn collect(&self, folder_id: &str) -> Result<Vec<Page>, ConfluenceError> {
        let root = ContentRef::Folder(folder_id.to_owned());
        let mut visited = HashSet::from([folder_id.to_owned()]);
        let mut stack: Vec<VecDeque<ChildItem>> = vec![self.source.list_children(&root)?.into()];
        let mut pages = Vec::new();

        while let Some(queue) = stack.last_mut() {
            let Some(item) = queue.pop_front() else {
                stack.pop();
                continue;
            };

            let node = match item.kind {
                ChildKind::Folder => ContentRef::Folder(item.id),
                ChildKind::Page => ContentRef::Page(item.id),
                ChildKind::Other(kind) => {
                    debug!("Skipping {} '{}' ({})", kind, item.title, item.id);
                    continue;
                }
            };

            if !visited.insert(node.id().to_owned()) {
                warn!("Skipping '{}' ({}): already visited", item.title, node.id());
                continue;
            }

            if let ContentRef::Page(page_id) = &node {
                let page = self.source.get_page(page_id)?;
                info!("Collected page '{}' ({})", page.title, page.id);
                pages.push(page);
            }

            let children = self.source.list_children(&node)?;
            if !children.is_empty() {
                stack.push(children.into());
            }
        }

        Ok(pages)
    }

    /// Collect every page below `folder_id`, searching the space when the
    /// walk finds none.
    ///
    /// Search hits are fetched in result order, each once.
    ///
    /// # Errors
    ///
    /// Returns the first API error.
    pub fn collect_or_search(
        &self,
        space_key: &str,
        folder_id: &str,
    ) -> Result<Vec<Page>, ConfluenceError> {
        let pages = self.collect(folder_id)?;
        if !pages.is_empty() {
            return Ok(pages);
        }

        info!("No pages below folder {}, trying content search", folder_id);
        let mut seen = HashSet::new();
        self.source
            .search_pages(space_key, folder_id)?
            .into_iter()
            .filter(|item| item.kind == ChildKind::Page && seen.insert(item.id.clone()))
            .map(|item| self.source.get_page(&item.id))
            .collect()
    }
}
