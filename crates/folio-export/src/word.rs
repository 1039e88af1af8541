//! Word rendering.

use folio_content::{Block, TableBlock};

use crate::docx::{DocxDocument, DocxParagraph, DocxTable, ParagraphStyle, Run};
use crate::document::PageDocument;

/// Renders pages as Word documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordExporter;

impl WordExporter {
    /// Create an exporter.
    pub fn new() -> Self {
        Self
    }

    /// Render a page.
    ///
    /// The prelude is a `Heading1` title, a metadata paragraph led by a bold
    /// `Space:` run, the `URL:` paragraph and an empty paragraph.
    pub fn render(&self, doc: &PageDocument) -> DocxDocument {
        let mut out = DocxDocument::new();
        out.push_paragraph(DocxParagraph::new(ParagraphStyle::Heading(1), doc.title.as_str()));
        out.push_paragraph(DocxParagraph {
            style: ParagraphStyle::Normal,
            runs: vec![
                Run::bold(format!("Space: {}", doc.space_key)),
                Run::new(format!(
                    " | Version: {} | Last Modified: {}",
                    doc.version, doc.last_modified
                )),
            ],
            boxed: false,
        });
        out.push_paragraph(DocxParagraph::plain(format!("URL: {}", doc.url)));
        out.push_paragraph(DocxParagraph::plain(""));

        for block in &doc.blocks {
            push_block(&mut out, block, false);
        }
        out
    }
}

fn push_block(out: &mut DocxDocument, block: &Block, boxed: bool) {
    let paragraph = match block {
        Block::Paragraph(text) => DocxParagraph::plain(text.as_str()),
        Block::Heading { level, text } => DocxParagraph::new(ParagraphStyle::Heading(*level), text.as_str()),
        Block::ListItem {
            ordinal: Some(n),
            text,
        } => DocxParagraph::new(ParagraphStyle::ListNumber, format!("{n}. {text}")),
        Block::ListItem { ordinal: None, text } => {
            DocxParagraph::new(ParagraphStyle::ListBullet, format!("\u{2022} {text}"))
        }
        Block::Table(table) => {
            out.push_table(docx_table(table));
            return;
        }
        Block::Expand(section) => {
            out.push_paragraph(DocxParagraph::plain(section.title.as_str()).bolded().boxed());
            for child in &section.body {
                push_block(out, child, true);
            }
            return;
        }
    };
    out.push_paragraph(if boxed { paragraph.boxed() } else { paragraph });
}

fn docx_table(table: &TableBlock) -> DocxTable {
    let columns = table.column_count();
    let rows = (0..table.row_count())
        .map(|row| {
            (0..columns)
                .map(|col| table.cell(row, col).to_owned())
                .collect()
        })
        .collect();
    DocxTable {
        column_widths: table.column_widths(),
        rows,
        header: table.has_header(),
    }
}
