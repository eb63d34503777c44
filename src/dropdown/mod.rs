mod builder;

pub use builder::{
    CATEGORY_SHEET_NAME, CategoryMap, CategoryRanges, MAX_FORMULA_LENGTH, add_dropdown_list,
    add_dropdown_list_on_sheet, create_dependent_dropdowns,
};
