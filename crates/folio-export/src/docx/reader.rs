//! `.docx` reader.
//!
//! Maps what `docx-rs` reads back onto a [`DocxDocument`]. Paragraph styles,
//! bold runs, line and page breaks and tables are kept; bookmarks, comments
//! and content controls are skipped. Nested tables are flattened into their
//! cell's text. `docx-rs` does not read paragraph borders, so read
//! paragraphs are never boxed.

use docx_rs::{
    Bold, Break, BreakType, DocumentChild, ParagraphChild, RunChild, TableCellContent,
    TableChild, TableRowChild,
};

use super::{
    CHAR_WIDTH_TWIPS, DocxBlock, DocxDocument, DocxParagraph, DocxTable, ParagraphStyle, Run,
};
use crate::error::ExportError;

/// Read a `.docx` package from memory.
pub(super) fn read_package(bytes: &[u8]) -> Result<DocxDocument, ExportError> {
    let docx = docx_rs::read_docx(bytes)?;
    let mut blocks = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                let (paragraph, page_break) = read_paragraph(paragraph);
                if !page_break {
                    blocks.push(DocxBlock::Paragraph(paragraph));
                    continue;
                }
                if !paragraph.runs.is_empty() {
                    blocks.push(DocxBlock::Paragraph(paragraph));
                }
                blocks.push(DocxBlock::PageBreak);
            }
            DocumentChild::Table(table) => blocks.push(DocxBlock::Table(read_table(table))),
            _ => {}
        }
    }
    Ok(DocxDocument { blocks })
}

/// A paragraph and whether it holds a page break.
fn read_paragraph(paragraph: &docx_rs::Paragraph) -> (DocxParagraph, bool) {
    let style = paragraph
        .property
        .style
        .as_ref()
        .map_or(ParagraphStyle::Normal, |style| ParagraphStyle::from_style_id(&style.val));
    let mut out = DocxParagraph {
        style,
        runs: Vec::new(),
        boxed: paragraph.property.borders.is_some(),
    };
    let page = Break::new(BreakType::Page);
    let mut page_break = false;

    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        let mut text = String::new();
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(br) if *br == page => page_break = true,
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
        if !text.is_empty() {
            out.runs.push(Run {
                text,
                bold: run.run_property.bold.as_ref() == Some(&Bold::new()),
            });
        }
    }
    (out, page_break)
}

#[derive(Default)]
struct CellText {
    lines: Vec<String>,
    bold: bool,
}

fn read_table(table: &docx_rs::Table) -> DocxTable {
    let rows: Vec<Vec<CellText>> = table
        .rows
        .iter()
        .map(|TableChild::TableRow(row)| {
            row.cells
                .iter()
                .map(|TableRowChild::TableCell(cell)| {
                    let mut text = CellText {
                        bold: true,
                        ..CellText::default()
                    };
                    collect_cell(&cell.children, &mut text);
                    text
                })
                .collect()
        })
        .filter(|row: &Vec<CellText>| !row.is_empty())
        .collect();

    let header = rows.first().is_some_and(|first| {
        first.iter().any(|cell| !cell.lines.is_empty()) && first.iter().all(|cell| cell.bold)
    });
    let columns = rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(table.grid.len());

    let mut column_widths: Vec<usize> = table
        .grid
        .iter()
        .map(|twips| (twips + CHAR_WIDTH_TWIPS / 2) / CHAR_WIDTH_TWIPS)
        .collect();
    column_widths.resize(columns, 0);

    let rows = rows
        .into_iter()
        .map(|row| {
            let mut row: Vec<String> = row.into_iter().map(|cell| cell.lines.join("\n")).collect();
            row.resize(columns, String::new());
            row
        })
        .collect();

    DocxTable {
        column_widths,
        rows,
        header,
    }
}

/// Append a cell's paragraph texts, descending into nested tables.
fn collect_cell(children: &[TableCellContent], out: &mut CellText) {
    for content in children {
        match content {
            TableCellContent::Paragraph(paragraph) => {
                let (paragraph, _) = read_paragraph(paragraph);
                out.bold &= paragraph.runs.iter().all(|run| run.bold);
                let text = paragraph.text();
                if !text.is_empty() {
                    out.lines.push(text);
                }
            }
            TableCellContent::Table(nested) => {
                for TableChild::TableRow(row) in &nested.rows {
                    for TableRowChild::TableCell(cell) in &row.cells {
                        collect_cell(&cell.children, out);
                    }
                }
            }
            _ => {}
        }
    }
}
