//! Table block and column layout.

/// Narrowest column, in characters.
pub const MIN_COLUMN_WIDTH: usize = 10;

/// Widest column, in characters. Longer cells are truncated in text output.
pub const MAX_COLUMN_WIDTH: usize = 80;

/// Extra characters added to the widest cell of a column.
pub const CELL_PADDING: usize = 2;

/// Table of plain-text cells.
///
/// Rows keep their source order. Rows without cells are dropped on
/// construction; rows shorter than the widest row read as empty cells.
/// The first row is a header row when there is more than one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBlock {
    rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Build a table from rows of cell text.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: rows.into_iter().filter(|row| !row.is_empty()).collect(),
        }
    }

    /// Rows as given (not padded).
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the first row is rendered as a header.
    pub fn has_header(&self) -> bool {
        self.rows.len() > 1
    }

    /// Cell text, or `""` past the end of a short row.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Column widths in characters.
    ///
    /// Each column is as wide as its widest cell plus [`CELL_PADDING`],
    /// clamped to [`MIN_COLUMN_WIDTH`]..=[`MAX_COLUMN_WIDTH`].
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![MIN_COLUMN_WIDTH; self.column_count()];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                let wanted = (cell.chars().count() + CELL_PADDING).min(MAX_COLUMN_WIDTH);
                *width = (*width).max(wanted);
            }
        }
        widths
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn test_empty_rows_dropped() {
        let table = TableBlock::new(vec![row(&["a"]), vec![], row(&["b"])]);
        assert_eq!(table.row_count(), 2);
        assert!(table.has_header());
    }

    #[test]
    fn test_column_count_uses_widest_row() {
        let table = TableBlock::new(vec![row(&["a", "b", "c"]), row(&["d"])]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_column_widths_floor_and_padding() {
        let table = TableBlock::new(vec![
            row(&["Name", "Description"]),
            row(&["x", "a fairly long description"]),
        ]);
        assert_eq!(table.column_widths(), vec![10, 27]);
    }

    #[test]
    fn test_column_widths_ceiling() {
        let long = "y".repeat(200);
        let table = TableBlock::new(vec![row(&[long.as_str()])]);
        assert_eq!(table.column_widths(), vec![MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn test_column_widths_count_chars_not_bytes() {
        let table = TableBlock::new(vec![row(&["ääääääääääää"])]);
        assert_eq!(table.column_widths(), vec![14]);
    }

    #[test]
    fn test_single_row_has_no_header() {
        let table = TableBlock::new(vec![row(&["only"])]);
        assert!(!table.has_header());
        assert!(TableBlock::default().is_empty());
    }
}
