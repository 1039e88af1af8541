//! `.docx` writer.
//!
//! Builds a `docx-rs` document from a [`DocxDocument`] and packs it.

use std::io::Cursor;

use docx_rs::{
    BreakType, Docx, PageMargin, Paragraph, ParagraphBorders, SpecialIndentType, Style,
    StyleType, Table, TableCell, TableLayoutType, TableRow, WidthType,
};

use super::{CHAR_WIDTH_TWIPS, DocxBlock, DocxDocument, DocxParagraph, DocxTable, Run};
use crate::error::ExportError;

/// US Letter in twips.
const PAGE_SIZE: (u32, u32) = (12240, 15840);
const PAGE_MARGIN: i32 = 1440;

/// Heading font sizes in half-points, levels 1-6.
const HEADING_SIZES: [usize; 6] = [32, 26, 24, 22, 22, 22];

/// Package `doc` as `.docx` bytes.
pub(super) fn write_package(doc: &DocxDocument) -> Result<Vec<u8>, ExportError> {
    let mut ids = ParagraphIds::default();
    let mut docx = with_styles(Docx::new())
        .page_size(PAGE_SIZE.0, PAGE_SIZE.1)
        .page_margin(
            PageMargin::new()
                .top(PAGE_MARGIN)
                .right(PAGE_MARGIN)
                .bottom(PAGE_MARGIN)
                .left(PAGE_MARGIN)
                .header(720)
                .footer(720)
                .gutter(0),
        );

    for block in &doc.blocks {
        docx = match block {
            DocxBlock::Paragraph(paragraph) => {
                docx.add_paragraph(build_paragraph(paragraph, &mut ids))
            }
            DocxBlock::Table(table) => docx.add_table(build_table(table, &mut ids)),
            DocxBlock::PageBreak => docx.add_paragraph(
                ids.paragraph()
                    .add_run(docx_rs::Run::new().add_break(BreakType::Page)),
            ),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer)?;
    Ok(buffer.into_inner())
}

/// Paragraph ids numbered from 1 in document order.
///
/// `docx-rs` otherwise draws ids from a process-wide counter, which would
/// make two packages of the same document differ.
#[derive(Default)]
struct ParagraphIds(usize);

impl ParagraphIds {
    fn paragraph(&mut self) -> Paragraph {
        self.0 += 1;
        Paragraph::new().id(format!("{:08X}", self.0))
    }
}

fn build_paragraph(paragraph: &DocxParagraph, ids: &mut ParagraphIds) -> Paragraph {
    let mut out = ids.paragraph();
    if let Some(id) = paragraph.style.style_id() {
        out = out.style(&id);
    }
    if paragraph.boxed {
        out.property = out.property.set_borders(ParagraphBorders::new());
    }
    for run in &paragraph.runs {
        out = out.add_run(build_run(run));
    }
    out
}

fn build_run(run: &Run) -> docx_rs::Run {
    let mut out = docx_rs::Run::new();
    for (i, line) in xml_safe(&run.text).split('\n').enumerate() {
        if i > 0 {
            out = out.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            out = out.add_text(line);
        }
    }
    if run.bold {
        out = out.bold();
    }
    out
}

fn build_table(table: &DocxTable, ids: &mut ParagraphIds) -> Table {
    let widths: Vec<usize> = table
        .column_widths
        .iter()
        .map(|width| width * CHAR_WIDTH_TWIPS)
        .collect();

    let mut rows = Vec::with_capacity(table.rows.len());
    for (row_index, row) in table.rows.iter().enumerate() {
        let is_header = table.header && row_index == 0;
        let mut cells = Vec::with_capacity(row.len());
        for (col, text) in row.iter().enumerate() {
            let mut paragraph = DocxParagraph::plain(text.as_str());
            if is_header {
                paragraph = paragraph.bolded();
            }
            cells.push(
                TableCell::new()
                    .width(widths.get(col).copied().unwrap_or(0), WidthType::Dxa)
                    .add_paragraph(build_paragraph(&paragraph, ids)),
            );
        }
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
        .set_grid(widths)
        .layout(TableLayoutType::Fixed)
}

/// Register the paragraph styles [`ParagraphStyle`](super::ParagraphStyle)
/// refers to.
fn with_styles(mut docx: Docx) -> Docx {
    docx = docx.add_style(
        Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .based_on("Normal")
            .next("Normal")
            .size(56)
            .bold(),
    );
    for (index, size) in HEADING_SIZES.iter().enumerate() {
        let level = index + 1;
        docx = docx.add_style(
            Style::new(format!("Heading{level}"), StyleType::Paragraph)
                .name(format!("heading {level}"))
                .based_on("Normal")
                .next("Normal")
                .size(*size)
                .bold()
                .outline_lvl(index),
        );
    }
    for (id, name) in [("ListBullet", "List Bullet"), ("ListNumber", "List Number")] {
        docx = docx.add_style(
            Style::new(id, StyleType::Paragraph)
                .name(name)
                .based_on("Normal")
                .indent(Some(360), Some(SpecialIndentType::Hanging(360)), None, None),
        );
    }
    docx
}

/// Drop characters XML 1.0 forbids.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n') || !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;
    use crate::docx::ParagraphStyle;

    fn document_xml(doc: &DocxDocument) -> String {
        let bytes = write_package(doc).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_boxed_paragraph_has_borders() {
        let mut doc = DocxDocument::new();
        doc.push_paragraph(DocxParagraph::plain("Details").bolded().boxed());
        doc.push_paragraph(DocxParagraph::plain("plain"));
        let xml = document_xml(&doc);

        assert_eq!(xml.matches("<w:pBdr>").count(), 1);
        assert!(xml.contains(r#"w14:paraId="00000001""#));
        assert!(xml.contains(r#"w14:paraId="00000002""#));
    }

    #[test]
    fn test_styles_registered() {
        let mut doc = DocxDocument::new();
        doc.push_paragraph(DocxParagraph::new(ParagraphStyle::Heading(2), "Fixes"));
        let bytes = write_package(&doc).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut styles = String::new();
        archive
            .by_name("word/styles.xml")
            .unwrap()
            .read_to_string(&mut styles)
            .unwrap();

        for id in ["Title", "Heading1", "Heading6", "ListBullet", "ListNumber"] {
            assert!(styles.contains(&format!(r#"w:styleId="{id}""#)), "missing {id}");
        }
        assert!(document_xml(&doc).contains(r#"<w:pStyle w:val="Heading2" />"#));
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(xml_safe("a\u{0001}b\tc\nd"), "ab\tc\nd");
    }

    #[test]
    fn test_package_is_deterministic() {
        let mut doc = DocxDocument::new();
        doc.push_paragraph(DocxParagraph::plain("same"));
        doc.push_table(DocxTable {
            column_widths: vec![10],
            rows: vec![vec!["cell".to_owned()]],
            header: false,
        });
        assert_eq!(doc.to_bytes().unwrap(), doc.to_bytes().unwrap());
    }
}
