//! Folder and children operations.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::pagination::collect_paginated;
use crate::types::{ChildItem, ChildrenPage, Folder};

impl ConfluenceClient {
    /// Get folder metadata.
    pub(crate) fn fetch_folder(&self, folder_id: &str) -> Result<Folder, ConfluenceError> {
        info!("Getting folder {}", folder_id);
        self.get_json(&format!("{}/folders/{}", self.api_url(), folder_id))
    }

    /// List all direct children of a folder.
    pub(crate) fn list_folder_children(
        &self,
        folder_id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        self.list_children_of("folders", folder_id)
    }

    /// List all direct children of a page.
    pub(crate) fn list_page_children(
        &self,
        page_id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        self.list_children_of("pages", page_id)
    }

    fn list_children_of(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        let url = format!(
            "{}/{}/{}/direct-children?limit={}",
            self.api_url(),
            collection,
            id,
            self.page_size
        );
        let children = collect_paginated(&self.base_url, url, |next| {
            self.get_json::<ChildrenPage>(next)
        })?;
        info!("Found {} children of {} {}", children.len(), collection, id);
        Ok(children)
    }
}
