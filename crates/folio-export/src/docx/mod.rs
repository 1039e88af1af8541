//! Minimal WordprocessingML documents.
//!
//! Models the subset of `.docx` that folio writes: styled paragraphs of
//! (optionally bold) runs, box-bordered paragraphs, bordered tables and
//! page breaks. [`DocxDocument::to_bytes`] builds and packs the document
//! with `docx-rs` and [`DocxDocument::from_bytes`] reads one back, so merged
//! documents copy content structurally.

mod reader;
mod writer;

use std::fs;
use std::path::Path;

use crate::error::ExportError;

/// Approximate width of one character in twentieths of a point.
pub const CHAR_WIDTH_TWIPS: usize = 100;

/// Paragraph style, by `styles.xml` id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// Body text (no `w:pStyle`).
    #[default]
    Normal,
    /// Document title.
    Title,
    /// Heading level 1-6.
    Heading(u8),
    /// Bulleted list entry.
    ListBullet,
    /// Numbered list entry.
    ListNumber,
}

impl ParagraphStyle {
    /// Style id in `styles.xml`, `None` for the default style.
    pub fn style_id(self) -> Option<String> {
        match self {
            Self::Normal => None,
            Self::Title => Some("Title".to_owned()),
            Self::Heading(level) => Some(format!("Heading{}", level.clamp(1, 6))),
            Self::ListBullet => Some("ListBullet".to_owned()),
            Self::ListNumber => Some("ListNumber".to_owned()),
        }
    }

    /// Parse a style id; unknown ids read as [`ParagraphStyle::Normal`].
    pub fn from_style_id(id: &str) -> Self {
        match id {
            "Title" => Self::Title,
            "ListBullet" => Self::ListBullet,
            "ListNumber" => Self::ListNumber,
            _ => id
                .strip_prefix("Heading")
                .and_then(|level| level.parse::<u8>().ok())
                .filter(|level| (1..=6).contains(level))
                .map_or(Self::Normal, Self::Heading),
        }
    }

    /// Whether this is a heading or title.
    pub fn is_heading(self) -> bool {
        matches!(self, Self::Title | Self::Heading(_))
    }
}

/// Run of text with uniform formatting. `\n` is a line break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    /// Text.
    pub text: String,
    /// Bold weight.
    pub bold: bool,
}

impl Run {
    /// Regular run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxParagraph {
    /// Paragraph style.
    pub style: ParagraphStyle,
    /// Runs in order.
    pub runs: Vec<Run>,
    /// Drawn with a single-line box border.
    pub boxed: bool,
}

impl DocxParagraph {
    /// Paragraph of one regular run (no run when `text` is empty).
    pub fn new(style: ParagraphStyle, text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run::new(text)]
        };
        Self {
            style,
            runs,
            boxed: false,
        }
    }

    /// Body paragraph of one regular run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(ParagraphStyle::Normal, text)
    }

    /// Make every run bold.
    #[must_use]
    pub fn bolded(mut self) -> Self {
        for run in &mut self.runs {
            run.bold = true;
        }
        self
    }

    /// Add a box border.
    #[must_use]
    pub fn boxed(mut self) -> Self {
        self.boxed = true;
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Bordered table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxTable {
    /// Column widths in characters.
    pub column_widths: Vec<usize>,
    /// Cell text by row; every row has one cell per column.
    pub rows: Vec<Vec<String>>,
    /// First row is a bold, repeated header row.
    pub header: bool,
}

/// Body element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxBlock {
    /// Paragraph.
    Paragraph(DocxParagraph),
    /// Table.
    Table(DocxTable),
    /// Page break.
    PageBreak,
}

/// Word document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxDocument {
    /// Body elements in order.
    pub blocks: Vec<DocxBlock>,
}

impl DocxDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph.
    pub fn push_paragraph(&mut self, paragraph: DocxParagraph) {
        self.blocks.push(DocxBlock::Paragraph(paragraph));
    }

    /// Append a table.
    pub fn push_table(&mut self, table: DocxTable) {
        self.blocks.push(DocxBlock::Table(table));
    }

    /// Append a page break.
    pub fn push_page_break(&mut self) {
        self.blocks.push(DocxBlock::PageBreak);
    }

    /// Package as `.docx` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the package cannot be written.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        writer::write_package(self)
    }

    /// Write a `.docx` file.
    ///
    /// # Errors
    ///
    /// Returns an error if packaging or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Read a `.docx` package.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a readable `.docx` package.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExportError> {
        reader::read_package(bytes)
    }

    /// Read a `.docx` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        Self::from_bytes(&fs::read(path)?)
    }
}
