//! Word merge.

use std::path::PathBuf;

use tracing::warn;

use super::{MergeHeader, file_name, file_stem};
use crate::docx::{DocxBlock, DocxDocument, DocxParagraph, ParagraphStyle};

const SEPARATOR_WIDTH: usize = 80;
const METADATA_PREFIXES: [&str; 4] = ["Space:", "Version:", "Author:", "Last Modified:"];

/// Build one document from Word exports, copying each body structurally.
pub(super) fn merge_word(header: &MergeHeader, files: &[PathBuf]) -> DocxDocument {
    let total = header.file_count;
    let mut out = DocxDocument::new();
    out.push_paragraph(DocxParagraph::new(
        ParagraphStyle::Title,
        format!("ALL RELEASE NOTES - {}", header.folder_name.to_uppercase()),
    ));
    out.push_paragraph(DocxParagraph::plain(format!("Merged from {total} release notes")));
    out.push_paragraph(DocxParagraph::plain(format!("Generated: {}", header.generated)));
    out.push_page_break();

    for (index, path) in files.iter().enumerate() {
        if index > 0 {
            out.push_page_break();
        }
        out.push_paragraph(DocxParagraph::new(
            ParagraphStyle::Heading(1),
            format!("RELEASE {}/{total}: {}", index + 1, file_stem(path)),
        ));
        out.push_paragraph(DocxParagraph::plain("=".repeat(SEPARATOR_WIDTH)));
        out.push_paragraph(DocxParagraph::plain(""));

        match DocxDocument::open(path) {
            Ok(source) => {
                let start = body_start(&source.blocks);
                out.blocks.extend(source.blocks.into_iter().skip(start));
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                out.push_paragraph(DocxParagraph::plain(format!(
                    "[ERROR: Could not read {}]",
                    file_name(path)
                )));
            }
        }
    }

    out.push_page_break();
    out.push_paragraph(DocxParagraph::new(
        ParagraphStyle::Heading(1),
        "END OF MERGED RELEASE NOTES",
    ));
    out
}

/// Index of the first body block after an exported prelude.
///
/// The prelude is a title heading, metadata lines and a `URL:` line,
/// followed by empty paragraphs. Documents without a `URL:` line in their
/// prelude are copied from the start.
fn body_start(blocks: &[DocxBlock]) -> usize {
    let title_len = usize::from(matches!(
        blocks.first(),
        Some(DocxBlock::Paragraph(p)) if p.style.is_heading()
    ));
    let mut url_index = None;
    for (index, block) in blocks.iter().enumerate().skip(title_len) {
        let DocxBlock::Paragraph(paragraph) = block else {
            break;
        };
        let text = paragraph.text();
        if text.starts_with("URL:") {
            url_index = Some(index);
            break;
        }
        let is_prelude = text.trim().is_empty()
            || METADATA_PREFIXES.iter().any(|prefix| text.starts_with(prefix));
        if !is_prelude {
            break;
        }
    }

    let Some(url_index) = url_index else {
        return 0;
    };
    let trailing_empty = blocks[url_index + 1..]
        .iter()
        .take_while(|block| matches!(block, DocxBlock::Paragraph(p) if p.text().trim().is_empty()))
        .count();
    url_index + 1 + trailing_empty
}

#[cfg(test)]
mod tests {
    use folio_content::{Block, TableBlock};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::PageDocument;
    use crate::docx::{DocxTable, Run};
    use crate::word::WordExporter;

    fn exported(title: &str, blocks: Vec<Block>) -> DocxDocument {
        WordExporter::new().render(&PageDocument {
            title: title.to_owned(),
            space_key: "REL".to_owned(),
            version: 1,
            last_modified: "2024-01-01".to_owned(),
            url: "https://x/wiki/p".to_owned(),
            blocks,
        })
    }

    fn header(count: usize) -> MergeHeader {
        MergeHeader {
            folder_name: "notes".to_owned(),
            file_count: count,
            generated: "2024-05-01 12:00:00".to_owned(),
        }
    }

    #[test]
    fn test_body_start_skips_prelude() {
        let doc = exported("Title", vec![Block::Paragraph("body".to_owned())]);
        assert_eq!(body_start(&doc.blocks), 4);
    }

    #[test]
    fn test_body_start_title_starting_with_url() {
        let doc = exported("URL: shortener release", vec![Block::Paragraph("body".to_owned())]);
        assert_eq!(body_start(&doc.blocks), 4);
    }

    #[test]
    fn test_body_start_without_prelude() {
        let mut doc = DocxDocument::new();
        doc.push_paragraph(DocxParagraph::plain("just text"));
        doc.push_paragraph(DocxParagraph::plain("URL: later"));
        assert_eq!(body_start(&doc.blocks), 0);
    }

    #[test]
    fn test_merge_copies_bodies_structurally() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("1.0.docx");
        let table = TableBlock::new(vec![
            vec!["Key".to_owned(), "Value".to_owned()],
            vec!["a".to_owned(), "b".to_owned()],
        ]);
        exported("One", vec![Block::Paragraph("first".to_owned()), Block::Table(table)])
            .save(&first)
            .unwrap();
        let missing = tmp.path().join("1.1.docx");

        let merged = merge_word(&header(2), &[first, missing]);

        let texts: Vec<String> = merged
            .blocks
            .iter()
            .map(|block| match block {
                DocxBlock::Paragraph(p) => p.text(),
                DocxBlock::Table(_) => "<table>".to_owned(),
                DocxBlock::PageBreak => "<break>".to_owned(),
            })
            .collect();
        let rule = "=".repeat(80);
        assert_eq!(
            texts,
            vec![
                "ALL RELEASE NOTES - NOTES".to_owned(),
                "Merged from 2 release notes".to_owned(),
                "Generated: 2024-05-01 12:00:00".to_owned(),
                "<break>".to_owned(),
                "RELEASE 1/2: 1.0".to_owned(),
                rule.clone(),
                String::new(),
                "first".to_owned(),
                "<table>".to_owned(),
                "<break>".to_owned(),
                "RELEASE 2/2: 1.1".to_owned(),
                rule,
                String::new(),
                "[ERROR: Could not read 1.1.docx]".to_owned(),
                "<break>".to_owned(),
                "END OF MERGED RELEASE NOTES".to_owned(),
            ]
        );

        let DocxBlock::Paragraph(title) = &merged.blocks[0] else {
            panic!("expected title paragraph");
        };
        assert_eq!(title.style, ParagraphStyle::Title);
        assert_eq!(
            merged.blocks[8],
            DocxBlock::Table(DocxTable {
                column_widths: vec![10, 10],
                rows: vec![
                    vec!["Key".to_owned(), "Value".to_owned()],
                    vec!["a".to_owned(), "b".to_owned()],
                ],
                header: true,
            })
        );
    }

    #[test]
    fn test_bold_runs_survive_merge() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.docx");
        let mut doc = exported("A", vec![]);
        doc.push_paragraph(DocxParagraph {
            style: ParagraphStyle::Normal,
            runs: vec![Run::bold("Note:"), Run::new(" kept")],
            boxed: true,
        });
        doc.save(&path).unwrap();

        let merged = merge_word(&header(1), &[path]);
        assert_eq!(
            merged.blocks[7],
            DocxBlock::Paragraph(DocxParagraph {
                style: ParagraphStyle::Normal,
                runs: vec![Run::bold("Note:"), Run::new(" kept")],
                boxed: false,
            })
        );
    }
}
