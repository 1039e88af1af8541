//! Normalized content blocks.

use crate::TableBlock;

/// One unit of normalized page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Running text. May contain `\n` for explicit line breaks.
    Paragraph(String),
    /// Section heading, level 1-6.
    Heading {
        /// Heading level.
        level: u8,
        /// Heading text.
        text: String,
    },
    /// List entry. `ordinal` is `Some(n)` for numbered lists.
    ListItem {
        /// Position in a numbered list, `None` for bullets.
        ordinal: Option<usize>,
        /// Item text.
        text: String,
    },
    /// Table.
    Table(TableBlock),
    /// Collapsible section.
    Expand(ExpandableSection),
}

/// Collapsible section with a title and nested content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandableSection {
    /// Section title; may be empty.
    pub title: String,
    /// Section content.
    pub body: Vec<Block>,
}

impl ExpandableSection {
    /// Create a section.
    pub fn new(title: impl Into<String>, body: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }
}
