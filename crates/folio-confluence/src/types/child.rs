//! Folder and page children.

use serde::Deserialize;

/// Kind of a child node in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ChildKind {
    /// Folder; its children are walked in place.
    Folder,
    /// Page; exported, and its own children are walked.
    Page,
    /// Whiteboard, database, smart link, ... (not exported).
    Other(String),
}

impl From<String> for ChildKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "folder" => Self::Folder,
            "page" => Self::Page,
            _ => Self::Other(kind),
        }
    }
}

/// Direct child of a folder or page, in API order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChildItem {
    /// Content ID.
    pub id: String,
    /// Content type.
    #[serde(rename = "type")]
    pub kind: ChildKind,
    /// Title.
    #[serde(default)]
    pub title: String,
}

impl ChildItem {
    /// Create a child item.
    pub fn new(id: impl Into<String>, kind: ChildKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
        }
    }
}

/// One page of a `direct-children` listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ChildrenPage {
    #[serde(default)]
    pub results: Vec<ChildItem>,
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
}

/// Cursor links of a paginated response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageLinks {
    /// Relative URL of the next page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deserialize_children_page() {
        let json = r#"{
            "results": [
                {"id": "1", "type": "page", "title": "Release 1.0", "status": "current"},
                {"id": "2", "type": "folder", "title": "Archive"},
                {"id": "3", "type": "whiteboard", "title": "Plan"}
            ],
            "_links": {"next": "/wiki/api/v2/folders/9/direct-children?cursor=abc", "base": "https://x/wiki"}
        }"#;
        let page: ChildrenPage = serde_json::from_str(json).unwrap();

        assert_eq!(
            page.results,
            vec![
                ChildItem::new("1", ChildKind::Page, "Release 1.0"),
                ChildItem::new("2", ChildKind::Folder, "Archive"),
                ChildItem::new("3", ChildKind::Other("whiteboard".to_owned()), "Plan"),
            ]
        );
        assert_eq!(
            page.links.next.as_deref(),
            Some("/wiki/api/v2/folders/9/direct-children?cursor=abc")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: ChildrenPage = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(page.links.next.is_none());
    }
}
