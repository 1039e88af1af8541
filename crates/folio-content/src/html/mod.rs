//! Storage-format XHTML to blocks.
//!
//! The markup is parsed into a [`TreeNode`] tree and walked once. Inline
//! content accumulates in a buffer that is flushed into a paragraph whenever
//! a block-level element starts or ends.

mod entities;
mod parser;
mod tree;

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use self::entities::decode_all_entities;
use self::parser::StorageParser;
use self::tree::TreeNode;
use crate::text::{collapse_lines, collapse_whitespace};
use crate::{Block, ContentError, ContentFormat, ExpandableSection, TableBlock};

/// Elements whose boundaries separate words in extracted text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "tr", "td", "th",
    "table", "tbody", "thead", "blockquote", "pre", "section", "br", "hr",
    "ac:rich-text-body", "ac:plain-text-body", "ac:task", "ac:task-body",
];

static LINE_BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|tr|table|blockquote|pre)\s*>")
        .expect("invalid line break regex")
});

static CELL_END_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</t[dh]\s*>").expect("invalid cell end regex"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

/// Parse storage-format XHTML into blocks.
///
/// Markup that the XML reader rejects is reduced to plain paragraphs by
/// stripping tags, so a malformed page still exports its text.
///
/// # Errors
///
/// Returns [`ContentError::UnsupportedContentFormat`] if the body is not
/// markup at all.
pub fn parse_html(value: &str) -> Result<Vec<Block>, ContentError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }
    if !value.starts_with('<') {
        return Err(ContentError::unsupported(
            ContentFormat::Html,
            "body does not start with markup",
        ));
    }

    match StorageParser::new().parse(value) {
        Ok(root) => {
            let mut collector = BlockCollector::default();
            collector.visit_children(&root);
            Ok(collector.finish())
        }
        Err(e) => {
            warn!(error = %e, "Storage markup is not well-formed, extracting plain text");
            Ok(plain_text_blocks(value))
        }
    }
}

/// Tag-stripping fallback: one paragraph per non-empty line.
fn plain_text_blocks(markup: &str) -> Vec<Block> {
    let text = LINE_BREAK_TAG.replace_all(markup, "\n");
    let text = CELL_END_TAG.replace_all(&text, " ");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_all_entities(&text);
    text.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .map(Block::Paragraph)
        .collect()
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Block>,
    inline: String,
}

impl BlockCollector {
    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }

    fn flush(&mut self) {
        let text = collapse_lines(&self.inline);
        self.inline.clear();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph(text));
        }
    }

    fn push_block(&mut self, block: Block) {
        self.flush();
        self.blocks.push(block);
    }

    /// Source newlines are layout, not content.
    fn push_text(&mut self, text: &str) {
        self.inline
            .extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
    }

    fn visit_children(&mut self, node: &TreeNode) {
        self.push_text(&node.text);
        for child in &node.children {
            self.visit(child);
            self.push_text(&child.tail);
        }
    }

    fn visit_block(&mut self, node: &TreeNode) {
        self.flush();
        self.visit_children(node);
        self.flush();
    }

    fn visit(&mut self, node: &TreeNode) {
        match node.tag.as_str() {
            "script" | "style" | "ac:parameter" | "ac:placeholder" | "ac:image"
            | "ri:attachment" => {}
            "br" => self.inline.push('\n'),
            "hr" => self.flush(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let text = collapse_whitespace(&extract_text(node));
                if text.is_empty() {
                    self.flush();
                } else {
                    let level = node.tag[1..].parse().unwrap_or(1);
                    self.push_block(Block::Heading { level, text });
                }
            }
            "table" => {
                let table = table_from_html(node);
                if table.is_empty() {
                    self.flush();
                } else {
                    self.push_block(Block::Table(table));
                }
            }
            "ul" | "ol" | "ac:task-list" => {
                self.flush();
                self.push_list(node);
            }
            "li" | "ac:task" => {
                self.flush();
                let text = collapse_whitespace(&extract_text(node));
                if !text.is_empty() {
                    self.blocks.push(Block::ListItem {
                        ordinal: None,
                        text,
                    });
                }
            }
            "a" => {
                self.visit_children(node);
                if let Some(href) = node.attr("href").filter(|href| !href.is_empty()) {
                    self.inline.push_str(&format!(" [{href}]"));
                }
            }
            "ac:link" => self.push_text(&link_text(node)),
            "ac:structured-macro" | "ac:macro" => self.visit_macro(node),
            "ac:plain-text-body" => {
                let code = node.text_content();
                let code = code.trim_matches(|c| c == '\n' || c == '\r');
                if code.trim().is_empty() {
                    self.flush();
                } else {
                    self.push_block(Block::Paragraph(code.to_owned()));
                }
            }
            "div" if node.has_class("expand-container") => {
                let title = node
                    .find_descendant(&|n| n.has_class("expand-control-text"))
                    .map(|n| collapse_whitespace(&n.text_content()))
                    .unwrap_or_default();
                let body = node
                    .find_descendant(&|n| n.has_class("expand-content"))
                    .map(collect_section)
                    .unwrap_or_default();
                self.push_block(Block::Expand(ExpandableSection::new(title, body)));
            }
            "p" | "div" | "blockquote" | "pre" | "section" | "article" | "header"
            | "footer" | "ac:rich-text-body" | "ac:layout" | "ac:layout-section"
            | "ac:layout-cell" | "ac:task-body" => self.visit_block(node),
            _ => self.visit_children(node),
        }
    }

    fn visit_macro(&mut self, node: &TreeNode) {
        if node.attr("ac:name") == Some("expand") {
            let title = node
                .children_named("ac:parameter")
                .find(|p| p.attr("ac:name") == Some("title"))
                .map(|p| collapse_whitespace(&p.text_content()))
                .unwrap_or_default();
            let body = node
                .children_named("ac:rich-text-body")
                .next()
                .map(collect_section)
                .unwrap_or_default();
            self.push_block(Block::Expand(ExpandableSection::new(title, body)));
        } else {
            self.visit_block(node);
        }
    }

    fn push_list(&mut self, list: &TreeNode) {
        let start = if list.tag == "ol" {
            Some(
                list.attr("start")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(1),
            )
        } else {
            None
        };
        let item_tag = if list.tag == "ac:task-list" {
            "ac:task"
        } else {
            "li"
        };

        for (index, item) in list.children_named(item_tag).enumerate() {
            let text = collapse_whitespace(&extract_text(item));
            if !text.is_empty() {
                self.blocks.push(Block::ListItem {
                    ordinal: start.map(|s: usize| s + index),
                    text,
                });
            }
        }
    }
}

fn collect_section(body: &TreeNode) -> Vec<Block> {
    let mut collector = BlockCollector::default();
    collector.visit_children(body);
    collector.finish()
}

fn table_from_html(table: &TreeNode) -> TableBlock {
    let mut rows = Vec::new();
    collect_rows(table, &mut rows);
    TableBlock::new(rows)
}

/// Rows of this table only; nested tables are read as cell text.
fn collect_rows(node: &TreeNode, rows: &mut Vec<Vec<String>>) {
    for child in &node.children {
        match child.tag.as_str() {
            "tr" => rows.push(
                child
                    .children
                    .iter()
                    .filter(|cell| cell.tag == "td" || cell.tag == "th")
                    .map(|cell| collapse_whitespace(&extract_text(cell)))
                    .collect(),
            ),
            "table" => {}
            _ => collect_rows(child, rows),
        }
    }
}

/// Text of an element with word breaks at block boundaries.
fn extract_text(node: &TreeNode) -> String {
    let mut out = node.text.clone();
    for child in &node.children {
        let is_block = BLOCK_TAGS.contains(&child.tag.as_str());
        match child.tag.as_str() {
            "script" | "style" | "ac:parameter" | "ac:placeholder" => {}
            "ac:link" => out.push_str(&link_text(child)),
            "a" => {
                out.push_str(&extract_text(child));
                if let Some(href) = child.attr("href").filter(|href| !href.is_empty()) {
                    out.push_str(&format!(" [{href}]"));
                }
            }
            _ if is_block => {
                out.push(' ');
                out.push_str(&extract_text(child));
                out.push(' ');
            }
            _ => out.push_str(&extract_text(child)),
        }
        out.push_str(&child.tail);
    }
    out
}

/// Visible text of an `ac:link`: its link body, or the target's title.
fn link_text(link: &TreeNode) -> String {
    let body = link
        .children
        .iter()
        .filter(|c| c.tag == "ac:plain-text-link-body" || c.tag == "ac:link-body")
        .map(TreeNode::text_content)
        .collect::<String>();
    if !body.trim().is_empty() {
        return body;
    }
    link.children
        .iter()
        .find_map(|c| c.attr("ri:content-title").or_else(|| c.attr("ri:filename")))
        .unwrap_or_default()
        .to_owned()
}
