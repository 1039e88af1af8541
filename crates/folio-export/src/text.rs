//! Plain-text rendering.

use folio_content::{Block, MAX_COLUMN_WIDTH, TableBlock};

use crate::document::PageDocument;

const HEADER_RULE_WIDTH: usize = 80;
const TRUNCATION_MARKER: &str = "...";

/// Renders pages as plain text.
///
/// Output is deterministic: rendering the same document twice yields the
/// same string, ending in exactly one newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExporter;

impl TextExporter {
    /// Create an exporter.
    pub fn new() -> Self {
        Self
    }

    /// Render a page.
    pub fn render(&self, doc: &PageDocument) -> String {
        let rule = "=".repeat(HEADER_RULE_WIDTH);
        let mut out = format!(
            "{rule}\n{title}\n{rule}\n\nSpace: {space}\nVersion: {version}\nLast Modified: {modified}\nURL: {url}\n\n",
            title = doc.title,
            space = doc.space_key,
            version = doc.version,
            modified = doc.last_modified,
            url = doc.url,
        );
        out.push_str(&render_blocks(&doc.blocks));
        let trimmed_len = out.trim_end_matches('\n').len();
        out.truncate(trimmed_len);
        out.push('\n');
        out
    }
}

/// Render blocks separated by blank lines; consecutive list items stay
/// on adjacent lines.
fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut previous_was_item = false;
    for block in blocks {
        let is_item = matches!(block, Block::ListItem { .. });
        if !out.is_empty() {
            out.push_str(if is_item && previous_was_item { "\n" } else { "\n\n" });
        }
        out.push_str(&render_block(block));
        previous_was_item = is_item;
    }
    out
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph(text) => text.clone(),
        Block::Heading { text, .. } => {
            format!("{text}\n{}", "-".repeat(text.chars().count()))
        }
        Block::ListItem {
            ordinal: Some(n),
            text,
        } => format!("{n}. {text}"),
        Block::ListItem { ordinal: None, text } => format!("- {text}"),
        Block::Table(table) => render_table(table),
        Block::Expand(section) => {
            let body = render_blocks(&section.body);
            if body.is_empty() {
                format!("--- Expand: {} ---\n--- End Expand ---", section.title)
            } else {
                format!(
                    "--- Expand: {} ---\n{body}\n--- End Expand ---",
                    section.title
                )
            }
        }
    }
}

/// Fixed-width table: cells padded to their column width and joined by
/// ` | `, with a dashed separator under the header row.
fn render_table(table: &TableBlock) -> String {
    let widths = table.column_widths();
    let mut lines = Vec::with_capacity(table.row_count() + 1);

    for row in 0..table.row_count() {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = truncate_cell(table.cell(row, col));
                let pad = width.saturating_sub(cell.chars().count());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        lines.push(cells.join(" | "));

        if row == 0 && table.has_header() {
            let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            lines.push(separator.join(" | "));
        }
    }
    lines.join("\n")
}

fn truncate_cell(cell: &str) -> String {
    if cell.chars().count() <= MAX_COLUMN_WIDTH {
        return cell.to_owned();
    }
    let keep = MAX_COLUMN_WIDTH - TRUNCATION_MARKER.len();
    let mut truncated: String = cell.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use folio_content::ExpandableSection;
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(blocks: Vec<Block>) -> PageDocument {
        PageDocument {
            title: "Release 2.10.0".to_owned(),
            space_key: "REL".to_owned(),
            version: 4,
            last_modified: "2024-05-02T10:00:00.000Z".to_owned(),
            url: "https://acme.atlassian.net/wiki/spaces/REL/pages/101".to_owned(),
            blocks,
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn test_render_header_and_paragraphs() {
        let text = TextExporter::new().render(&doc(vec![
            Block::Paragraph("First".to_owned()),
            Block::Paragraph("Second".to_owned()),
        ]));
        let rule = "=".repeat(80);
        assert_eq!(
            text,
            format!(
                "{rule}\nRelease 2.10.0\n{rule}\n\nSpace: REL\nVersion: 4\nLast Modified: 2024-05-02T10:00:00.000Z\nURL: https://acme.atlassian.net/wiki/spaces/REL/pages/101\n\nFirst\n\nSecond\n"
            )
        );
    }

    #[test]
    fn test_empty_body_ends_with_single_newline() {
        let text = TextExporter::new().render(&doc(vec![]));
        assert!(text.ends_with("/pages/101\n"));
    }

    #[test]
    fn test_headings_and_lists() {
        let body = render_blocks(&[
            Block::Heading {
                level: 2,
                text: "Fixes".to_owned(),
            },
            Block::ListItem {
                ordinal: None,
                text: "one".to_owned(),
            },
            Block::ListItem {
                ordinal: None,
                text: "two".to_owned(),
            },
            Block::ListItem {
                ordinal: Some(1),
                text: "first".to_owned(),
            },
            Block::Paragraph("after".to_owned()),
        ]);
        assert_eq!(body, "Fixes\n-----\n\n- one\n- two\n1. first\n\nafter");
    }

    #[test]
    fn test_table_layout() {
        let table = TableBlock::new(vec![
            row(&["Component", "Version"]),
            row(&["api", "2.10.0 hotfix"]),
        ]);
        let expected = format!(
            "{:<11} | {:<15}\n{} | {}\n{:<11} | {:<15}",
            "Component",
            "Version",
            "-".repeat(11),
            "-".repeat(15),
            "api",
            "2.10.0 hotfix"
        );
        assert_eq!(render_table(&table), expected);
    }

    #[test]
    fn test_single_row_table_has_no_separator() {
        let table = TableBlock::new(vec![row(&["only"])]);
        assert_eq!(render_table(&table), format!("{:<10}", "only"));
    }

    #[test]
    fn test_long_cells_truncated() {
        let long = "a".repeat(100);
        let table = TableBlock::new(vec![row(&[long.as_str()])]);
        let rendered = render_table(&table);
        assert_eq!(rendered.chars().count(), 80);
        assert!(rendered.ends_with(&format!("{}...", "a".repeat(4))));
    }

    #[test]
    fn test_expand_section() {
        let body = render_blocks(&[Block::Expand(ExpandableSection::new(
            "Details",
            vec![Block::Paragraph("hidden".to_owned())],
        ))]);
        assert_eq!(body, "--- Expand: Details ---\nhidden\n--- End Expand ---");
    }

    #[test]
    fn test_render_is_deterministic() {
        let document = doc(vec![Block::Table(TableBlock::new(vec![row(&["a", "b"])]))]);
        let exporter = TextExporter::new();
        assert_eq!(exporter.render(&document), exporter.render(&document));
    }
}
