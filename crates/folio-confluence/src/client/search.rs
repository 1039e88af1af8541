//! CQL content search.
//!
//! Some folders list no children through the v2 API even though pages sit
//! below them. For those, pages are found with the v1 search endpoint.

use std::collections::HashSet;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info, warn};

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{ChildItem, SearchResult, SearchResults};

/// Results requested per search call.
const SEARCH_LIMIT: usize = 50;

/// Query-string unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

impl ConfluenceClient {
    /// Find the pages below `folder_id` with CQL.
    ///
    /// Tries `ancestor = id`, then `parent = id`, keeping only results whose
    /// ancestors include the folder. A failing query is logged and the next
    /// one is tried.
    pub(crate) fn search_folder_pages(
        &self,
        space_key: &str,
        folder_id: &str,
    ) -> Result<Vec<ChildItem>, ConfluenceError> {
        for cql in folder_queries(space_key, folder_id) {
            info!("Searching pages: {}", cql);
            let fetched = collect_offset(|start| self.get_json(&self.search_url(&cql, start)));
            let results = match fetched {
                Ok(results) => results,
                Err(e) => {
                    warn!("CQL search failed: {}", e);
                    continue;
                }
            };
            let items = below_folder(results, folder_id);
            if !items.is_empty() {
                info!("Found {} pages via search", items.len());
                return Ok(items);
            }
        }
        Ok(Vec::new())
    }

    fn search_url(&self, cql: &str, start: usize) -> String {
        format!(
            "{}/wiki/rest/api/content/search?cql={}&limit={SEARCH_LIMIT}&start={start}&expand=ancestors",
            self.base_url,
            utf8_percent_encode(cql, QUERY_ENCODE_SET)
        )
    }
}

/// Queries in the order they are tried.
fn folder_queries(space_key: &str, folder_id: &str) -> [String; 2] {
    [
        format!(r#"space = "{space_key}" AND type = page AND ancestor = {folder_id}"#),
        format!(r#"space = "{space_key}" AND type = page AND parent = {folder_id}"#),
    ]
}

/// Fetch offset-paginated results until a short or repeated page.
fn collect_offset<F>(mut fetch: F) -> Result<Vec<SearchResult>, ConfluenceError>
where
    F: FnMut(usize) -> Result<SearchResults, ConfluenceError>,
{
    let mut results: Vec<SearchResult> = Vec::new();
    let mut seen = HashSet::new();
    let mut start = 0;
    loop {
        let page = fetch(start)?;
        let count = page.results.len();
        debug!("Search returned {} results at offset {}", count, start);

        let before = results.len();
        results.extend(page.results.into_iter().filter(|r| seen.insert(r.id.clone())));
        if count < SEARCH_LIMIT || results.len() == before {
            return Ok(results);
        }
        start += count;
    }
}

fn below_folder(results: Vec<SearchResult>, folder_id: &str) -> Vec<ChildItem> {
    results
        .into_iter()
        .filter(|result| result.is_below(folder_id))
        .map(SearchResult::into_child)
        .collect()
}
