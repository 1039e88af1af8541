//! ADF (Atlassian Document Format) to blocks.
//!
//! ADF is a JSON tree of `{ "type", "attrs", "content", "text", "marks" }`
//! nodes rooted at a `doc` node. Block nodes map onto [`Block`] variants;
//! container nodes without their own block (panels, layouts, quotes) are
//! flattened into their children.

use serde_json::Value;

use crate::text::{collapse_lines, collapse_whitespace};
use crate::{Block, ContentError, ContentFormat, ExpandableSection, TableBlock};

/// Parse an ADF document into blocks.
///
/// # Errors
///
/// Returns [`ContentError::UnsupportedContentFormat`] if `value` is not JSON
/// or its root is not a `doc` node.
pub fn parse_adf(value: &str) -> Result<Vec<Block>, ContentError> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: Value = serde_json::from_str(value)
        .map_err(|e| ContentError::unsupported(ContentFormat::Adf, e.to_string()))?;

    if node_type(&doc) != "doc" {
        return Err(ContentError::unsupported(
            ContentFormat::Adf,
            "root node is not of type \"doc\"",
        ));
    }

    let mut blocks = Vec::new();
    collect_blocks(children(&doc), &mut blocks);
    Ok(blocks)
}

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or("")
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn attr<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get("attrs").and_then(|attrs| attrs.get(name))
}

fn attr_str<'a>(node: &'a Value, name: &str) -> Option<&'a str> {
    attr(node, name).and_then(Value::as_str)
}

fn collect_blocks(nodes: &[Value], out: &mut Vec<Block>) {
    for node in nodes {
        match node_type(node) {
            "paragraph" => {
                let text = collapse_lines(&inline_text(node));
                if !text.is_empty() {
                    out.push(Block::Paragraph(text));
                }
            }
            "heading" => {
                let text = collapse_whitespace(&inline_text(node));
                if !text.is_empty() {
                    out.push(Block::Heading {
                        level: heading_level(node),
                        text,
                    });
                }
            }
            "bulletList" => push_list_items(node, None, out),
            "orderedList" => {
                let start = attr(node, "order")
                    .and_then(Value::as_u64)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(1);
                push_list_items(node, Some(start), out);
            }
            "table" => {
                let table = table_from_adf(node);
                if !table.is_empty() {
                    out.push(Block::Table(table));
                }
            }
            "expand" | "nestedExpand" => {
                let mut body = Vec::new();
                collect_blocks(children(node), &mut body);
                let title = attr_str(node, "title").unwrap_or_default().trim();
                out.push(Block::Expand(ExpandableSection::new(title, body)));
            }
            "codeBlock" => {
                let code: String = children(node).iter().map(inline_text).collect();
                let code = code.trim_matches('\n');
                if !code.trim().is_empty() {
                    out.push(Block::Paragraph(code.to_owned()));
                }
            }
            "rule" | "mediaSingle" | "mediaGroup" | "media" | "extension" => {}
            // panel, blockquote, layoutSection, layoutColumn, bodiedExtension, ...
            _ => collect_blocks(children(node), out),
        }
    }
}

fn heading_level(node: &Value) -> u8 {
    attr(node, "level")
        .and_then(Value::as_u64)
        .and_then(|level| u8::try_from(level).ok())
        .map_or(1, |level| level.clamp(1, 6))
}

fn push_list_items(list: &Value, start: Option<usize>, out: &mut Vec<Block>) {
    let items = children(list)
        .iter()
        .filter(|item| node_type(item) == "listItem");
    for (index, item) in items.enumerate() {
        let text = collapse_whitespace(&plain_text(item));
        if !text.is_empty() {
            out.push(Block::ListItem {
                ordinal: start.map(|s| s + index),
                text,
            });
        }
    }
}

fn table_from_adf(table: &Value) -> TableBlock {
    let rows = children(table)
        .iter()
        .filter(|row| node_type(row) == "tableRow")
        .map(|row| {
            children(row)
                .iter()
                .filter(|cell| matches!(node_type(cell), "tableCell" | "tableHeader"))
                .map(|cell| collapse_whitespace(&plain_text(cell)))
                .collect()
        })
        .collect();
    TableBlock::new(rows)
}

/// Text of a block-level subtree; child blocks are separated by a space.
fn plain_text(node: &Value) -> String {
    match node_type(node) {
        "paragraph" | "heading" | "codeBlock" => inline_text(node),
        "text" | "hardBreak" | "mention" | "emoji" | "status" | "date" | "inlineCard" => {
            inline_text(node)
        }
        _ => children(node)
            .iter()
            .map(plain_text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Concatenated inline content of a node.
fn inline_text(node: &Value) -> String {
    match node_type(node) {
        "text" => {
            let text = node.get("text").and_then(Value::as_str).unwrap_or_default();
            match link_href(node) {
                Some(href) => format!("{text} [{href}]"),
                None => text.to_owned(),
            }
        }
        "hardBreak" => "\n".to_owned(),
        "mention" | "status" => attr_str(node, "text").unwrap_or_default().to_owned(),
        "emoji" => attr_str(node, "text")
            .or_else(|| attr_str(node, "shortName"))
            .unwrap_or_default()
            .to_owned(),
        "date" => attr_str(node, "timestamp").unwrap_or_default().to_owned(),
        "inlineCard" => attr_str(node, "url").unwrap_or_default().to_owned(),
        _ => children(node).iter().map(inline_text).collect(),
    }
}

fn link_href(node: &Value) -> Option<&str> {
    node.get("marks")?
        .as_array()?
        .iter()
        .find(|mark| node_type(mark) == "link")
        .and_then(|mark| attr_str(mark, "href"))
        .filter(|href| !href.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(content: &str) -> String {
        format!(r#"{{"type":"doc","version":1,"content":[{content}]}}"#)
    }

    fn para(text: &str) -> String {
        format!(r#"{{"type":"paragraph","content":[{{"type":"text","text":"{text}"}}]}}"#)
    }

    #[test]
    fn test_paragraphs_and_headings() {
        let adf = doc(&format!(
            r#"{{"type":"heading","attrs":{{"level":2}},"content":[{{"type":"text","text":"Changes"}}]}},{},{{"type":"paragraph"}}"#,
            para("Fixed  the   bug")
        ));
        let blocks = parse_adf(&adf).unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    text: "Changes".to_owned()
                },
                Block::Paragraph("Fixed the bug".to_owned()),
            ]
        );
    }

    #[test]
    fn test_link_marks_and_hard_breaks() {
        let adf = doc(
            r#"{"type":"paragraph","content":[
                {"type":"text","text":"See"},
                {"type":"text","text":" docs","marks":[{"type":"link","attrs":{"href":"https://example.com"}}]},
                {"type":"hardBreak"},
                {"type":"text","text":"next line"}
            ]}"#,
        );
        let blocks = parse_adf(&adf).unwrap();
        assert_eq!(
            blocks,
            vec![Block::Paragraph(
                "See docs [https://example.com]\nnext line".to_owned()
            )]
        );
    }

    #[test]
    fn test_lists() {
        let adf = doc(&format!(
            r#"{{"type":"bulletList","content":[{{"type":"listItem","content":[{}]}}]}},
               {{"type":"orderedList","attrs":{{"order":3}},"content":[
                   {{"type":"listItem","content":[{}]}},
                   {{"type":"listItem","content":[{}]}}]}}"#,
            para("bullet"),
            para("third"),
            para("fourth")
        ));
        let blocks = parse_adf(&adf).unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::ListItem {
                    ordinal: None,
                    text: "bullet".to_owned()
                },
                Block::ListItem {
                    ordinal: Some(3),
                    text: "third".to_owned()
                },
                Block::ListItem {
                    ordinal: Some(4),
                    text: "fourth".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_expand_with_nested_table() {
        let adf = doc(&format!(
            r#"{{"type":"expand","attrs":{{"title":"Details"}},"content":[
                {},
                {{"type":"table","content":[{{"type":"tableRow","content":[
                    {{"type":"tableCell","content":[{}]}}]}}]}}
            ]}}"#,
            para("inside"),
            para("cell")
        ));
        let blocks = parse_adf(&adf).unwrap();
        assert_eq!(
            blocks,
            vec![Block::Expand(ExpandableSection::new(
                "Details",
                vec![
                    Block::Paragraph("inside".to_owned()),
                    Block::Table(TableBlock::new(vec![vec!["cell".to_owned()]])),
                ]
            ))]
        );
    }

    #[test]
    fn test_panel_is_flattened() {
        let adf = doc(&format!(
            r#"{{"type":"panel","attrs":{{"panelType":"info"}},"content":[{}]}}"#,
            para("note")
        ));
        assert_eq!(
            parse_adf(&adf).unwrap(),
            vec![Block::Paragraph("note".to_owned())]
        );
    }

    #[test]
    fn test_table_rows_keep_ragged_shape() {
        let adf = doc(&format!(
            r#"{{"type":"table","content":[
                {{"type":"tableRow","content":[{{"type":"tableHeader","content":[{}]}},{{"type":"tableHeader","content":[{}]}}]}},
                {{"type":"tableRow","content":[{{"type":"tableCell","content":[{}]}}]}}
            ]}}"#,
            para("a"),
            para("b"),
            para("c")
        ));
        let blocks = parse_adf(&adf).unwrap();
        let Block::Table(table) = &blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 0), "c");
        assert_eq!(table.cell(1, 1), "");
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = parse_adf("{not json").unwrap_err();
        assert!(matches!(
            err,
            ContentError::UnsupportedContentFormat {
                format: ContentFormat::Adf,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_doc_root() {
        let err = parse_adf(r#"{"type":"paragraph"}"#).unwrap_err();
        assert!(err.to_string().contains("doc"));
    }
}
