//! Content search results (REST v1 `content/search`).

use serde::Deserialize;

use super::child::{ChildItem, ChildKind};

/// One page of search results.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Content found by a CQL query, with `expand=ancestors`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResult {
    pub id: String,
    #[serde(rename = "type", default = "page_kind")]
    pub kind: ChildKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Ancestor {
    pub id: String,
}

fn page_kind() -> ChildKind {
    ChildKind::Page
}

impl SearchResult {
    /// Whether `folder_id` is among this result's ancestors.
    pub(crate) fn is_below(&self, folder_id: &str) -> bool {
        self.ancestors.iter().any(|ancestor| ancestor.id == folder_id)
    }

    pub(crate) fn into_child(self) -> ChildItem {
        ChildItem::new(self.id, self.kind, self.title)
    }
}
