//! Element tree for storage-format markup.

use std::collections::HashMap;

/// Element in a parsed storage-format document.
///
/// Text follows the XML text/tail model: `text` is the content before the
/// first child, `tail` is the content after this element's end tag and
/// before the next sibling.
#[derive(Debug, Clone, Default)]
pub(crate) struct TreeNode {
    /// Tag name including any namespace prefix (`p`, `ac:structured-macro`).
    pub tag: String,
    /// Text before the first child.
    pub text: String,
    /// Text after the end tag.
    pub tail: String,
    /// Attributes keyed by their prefixed name.
    pub attrs: HashMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    #[cfg(test)]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the `class` attribute lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TreeNode> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// First descendant (depth-first, excluding `self`) matching `predicate`.
    pub fn find_descendant(&self, predicate: &dyn Fn(&TreeNode) -> bool) -> Option<&TreeNode> {
        for child in &self.children {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text of this element and its descendants, tails included
    /// for children but not for `self`.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
            out.push_str(&child.tail);
        }
        out
    }
}
