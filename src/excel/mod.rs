mod cell;
mod document;
mod format;
mod sheet;
mod validation;
mod workbook;

pub mod reader;

pub use cell::CellValue;
pub use document::{SheetId, SpreadsheetDocument};
pub use format::{
    CURRENCY_FORMAT, DATE_FORMAT, DECIMAL_FORMAT, INTEGER_FORMAT,
    LARGEST_ALLOWED_NEGATIVE_NUMBER, LARGEST_ALLOWED_POSITIVE_NUMBER, TEXT_FORMAT,
};
pub use sheet::{MAX_COLS, MAX_ROWS, Note, Sheet};
pub use validation::{ListSource, ListValidation};
pub use workbook::{NamedRange, Workbook};
