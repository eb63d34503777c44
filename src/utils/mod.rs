mod columns;

pub use columns::{
    absolute_range, cell_reference, column_index, column_label, column_labels,
    parse_cell_reference, parse_range, quote_sheet_name,
};
