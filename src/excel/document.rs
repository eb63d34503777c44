use anyhow::Result;

use crate::excel::cell::CellValue;
use crate::excel::validation::ListSource;

/// Handle to one sheet of a document. Only valid for the document that
/// returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(pub(crate) usize);

/// The document operations the dropdown builders are written against.
///
/// Rows and columns are 1-based, matching how ranges read in the host
/// application.
pub trait SpreadsheetDocument {
    /// Add a sheet and return its handle. Fails if the name is already
    /// taken.
    fn add_sheet(&mut self, name: &str, hidden: bool) -> Result<SheetId>;

    /// Write a value into a cell, replacing whatever was there.
    fn write_cell(&mut self, sheet: SheetId, row: u32, col: u16, value: CellValue) -> Result<()>;

    /// Bind `name` to a rectangular range (e.g. `A2:A9`) on `sheet`. The
    /// name is resolvable from formulas anywhere in the document.
    fn define_named_range(&mut self, sheet: SheetId, name: &str, range: &str) -> Result<()>;

    /// Restrict the cells of `range` on `sheet` to the values of `source`.
    fn attach_list_validation(
        &mut self,
        sheet: SheetId,
        range: &str,
        source: ListSource,
    ) -> Result<()>;
}
