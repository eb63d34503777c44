use std::collections::BTreeMap;

use crate::excel::cell::CellValue;
use crate::excel::validation::ListValidation;

// Grid limits of the xlsx format
pub const MAX_ROWS: u32 = 1_048_576;
pub const MAX_COLS: u16 = 16_384;

/// A note pinned to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub row: u32,
    pub col: u16,
    pub text: String,
    pub author: Option<String>,
}

/// One sheet of an in-memory workbook.
///
/// Cells are stored sparsely under 1-based (row, column) keys. Styling and
/// validations are queued here and applied when the workbook is written out.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub hidden: bool,
    cells: BTreeMap<(u32, u16), CellValue>,
    pub(crate) validations: Vec<ListValidation>,
    pub(crate) column_formats: BTreeMap<u16, String>,
    pub(crate) column_widths: BTreeMap<u16, f64>,
    pub(crate) row_heights: BTreeMap<u32, f64>,
    pub(crate) tab_color: Option<u32>,
    pub(crate) styled_header: bool,
    pub(crate) autofit: bool,
    pub(crate) protection: Option<String>,
    pub(crate) notes: Vec<Note>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, hidden: bool) -> Self {
        Self {
            name: name.into(),
            hidden,
            cells: BTreeMap::new(),
            validations: Vec::new(),
            column_formats: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            tab_color: None,
            styled_header: false,
            autofit: false,
            protection: None,
            notes: Vec::new(),
        }
    }

    pub(crate) fn set_cell(&mut self, row: u32, col: u16, value: CellValue) {
        self.cells.insert((row, col), value);
    }

    pub(crate) fn remove_cell(&mut self, row: u32, col: u16) {
        self.cells.remove(&(row, col));
    }

    #[must_use]
    pub fn cell(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Non-empty cells in row-major order.
    pub fn used_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells.iter().map(|(&(row, col), value)| (row, col, value))
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Highest row holding a value, 0 when the sheet is empty.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(row, _)| row).max().unwrap_or(0)
    }

    /// Highest column holding a value, 0 when the sheet is empty.
    #[must_use]
    pub fn max_col(&self) -> u16 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }

    #[must_use]
    pub fn validations(&self) -> &[ListValidation] {
        &self.validations
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.protection.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_cells() {
        let mut sheet = Sheet::new("sheet1", false);
        assert_eq!(sheet.max_row(), 0);
        assert_eq!(sheet.max_col(), 0);

        sheet.set_cell(2, 4, CellValue::from("Turkey"));
        sheet.set_cell(100, 1, CellValue::from(5));

        assert_eq!(sheet.cell(2, 4), Some(&CellValue::Text("Turkey".into())));
        assert_eq!(sheet.cell(1, 1), None);
        assert_eq!(sheet.max_row(), 100);
        assert_eq!(sheet.max_col(), 4);
        assert_eq!(sheet.cell_count(), 2);

        sheet.remove_cell(2, 4);
        assert_eq!(sheet.cell(2, 4), None);
        assert_eq!(sheet.cell_count(), 1);
    }

    #[test]
    fn test_used_cells_order() {
        let mut sheet = Sheet::new("sheet1", false);
        sheet.set_cell(2, 1, CellValue::from("b"));
        sheet.set_cell(1, 2, CellValue::from("a2"));
        sheet.set_cell(1, 1, CellValue::from("a1"));

        let coords: Vec<(u32, u16)> = sheet.used_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(coords, [(1, 1), (1, 2), (2, 1)]);
    }
}
