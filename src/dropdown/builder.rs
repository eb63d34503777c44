use anyhow::Result;
use indexmap::IndexMap;

use crate::excel::{CellValue, ListSource, MAX_COLS, SheetId, SpreadsheetDocument};
use crate::utils::{column_index, column_labels, quote_sheet_name};

/// Categories and their values, in the order the columns should appear.
pub type CategoryMap = IndexMap<String, Vec<String>>;

/// Longest list formula the host application accepts. Anything longer has
/// to come from a range on a sheet instead.
pub const MAX_FORMULA_LENGTH: usize = 255;

/// Name of the hidden sheet holding the category columns.
pub const CATEGORY_SHEET_NAME: &str = "data";

/// Restrict `cell<min_row>:cell<max_row>` to the given values.
///
/// Values short enough to fit in a list formula are attached inline. Longer
/// lists fall back to a `<cell>_values` sheet holding the values in column A,
/// referenced from the validation instead.
pub fn add_dropdown_list(
    doc: &mut dyn SpreadsheetDocument,
    sheet: SheetId,
    values: &[String],
    cell: &str,
    min_row: u32,
    max_row: u32,
) -> Result<()> {
    validate_column_letter(cell)?;
    validate_rows(min_row, max_row)?;

    let literal = format!("\"{}\"", values.join(","));

    if literal.len() > MAX_FORMULA_LENGTH {
        let values_sheet_name = format!("{cell}_values");
        return add_dropdown_list_on_sheet(
            doc,
            sheet,
            values,
            cell,
            min_row,
            max_row,
            &values_sheet_name,
        );
    }

    doc.attach_list_validation(
        sheet,
        &format!("{cell}{min_row}:{cell}{max_row}"),
        ListSource::Inline(values.to_vec()),
    )
}

/// Like [`add_dropdown_list`], but always puts the values on a new visible
/// sheet and points the validation at that range.
pub fn add_dropdown_list_on_sheet(
    doc: &mut dyn SpreadsheetDocument,
    sheet: SheetId,
    values: &[String],
    cell: &str,
    min_row: u32,
    max_row: u32,
    values_sheet_name: &str,
) -> Result<()> {
    validate_column_letter(cell)?;
    validate_rows(min_row, max_row)?;

    let values_sheet = doc.add_sheet(values_sheet_name, false)?;

    for (offset, value) in values.iter().enumerate() {
        doc.write_cell(
            values_sheet,
            offset as u32 + 1,
            1,
            CellValue::Text(value.clone()),
        )?;
    }

    doc.attach_list_validation(
        sheet,
        &format!("{cell}{min_row}:{cell}{max_row}"),
        ListSource::Reference(format!(
            "={}!$A$1:$A${}",
            quote_sheet_name(values_sheet_name),
            values.len()
        )),
    )
}

/// The named ranges backing a pair of dependent dropdowns.
///
/// [`CategoryRanges::materialize`] writes the category columns onto the
/// hidden lookup sheet and defines one named range per category. The value
/// it returns is the only way to call [`CategoryRanges::attach`], so the
/// ranges always exist before any dropdown refers to them.
#[derive(Debug, Clone)]
pub struct CategoryRanges {
    categories: Vec<String>,
    source_sheet: SheetId,
}

impl CategoryRanges {
    /// Stage one: build the hidden lookup sheet.
    ///
    /// Each category gets one column, in map order: the category name in
    /// row 1, its values in the rows below, and a named range (named after
    /// the category) covering exactly the value rows.
    pub fn materialize(doc: &mut dyn SpreadsheetDocument, data: &CategoryMap) -> Result<Self> {
        if data.len() > usize::from(MAX_COLS) {
            anyhow::bail!("Too many categories for one sheet: {}", data.len());
        }

        let source_sheet = doc.add_sheet(CATEGORY_SHEET_NAME, true)?;
        let labels = column_labels(data.len() as u32);

        for (index, ((category, values), label)) in data.iter().zip(labels).enumerate() {
            if values.is_empty() {
                anyhow::bail!("Category {category:?} has no values");
            }

            let col = index as u16 + 1;
            doc.write_cell(source_sheet, 1, col, CellValue::Text(category.clone()))?;

            for (offset, value) in values.iter().enumerate() {
                doc.write_cell(
                    source_sheet,
                    offset as u32 + 2,
                    col,
                    CellValue::Text(value.clone()),
                )?;
            }

            doc.define_named_range(
                source_sheet,
                category,
                &format!("{label}2:{label}{}", values.len() + 1),
            )?;
        }

        Ok(Self {
            categories: data.keys().cloned().collect(),
            source_sheet,
        })
    }

    /// Stage two: attach the linked pair of validations.
    ///
    /// The first column is restricted to the category names. The second is
    /// restricted through `INDIRECT` on the first column's cell in
    /// `min_row`, so it only offers the values of whichever category was
    /// picked.
    pub fn attach(
        &self,
        doc: &mut dyn SpreadsheetDocument,
        sheet: SheetId,
        first_cell: &str,
        second_cell: &str,
        min_row: u32,
        max_row: u32,
    ) -> Result<()> {
        validate_column_letter(second_cell)?;

        add_dropdown_list(doc, sheet, &self.categories, first_cell, min_row, max_row)?;

        doc.attach_list_validation(
            sheet,
            &format!("{second_cell}{min_row}:{second_cell}{max_row}"),
            ListSource::Reference(format!("=INDIRECT({first_cell}{min_row})")),
        )
    }

    /// Category names, in the order their columns were laid out.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Handle of the hidden lookup sheet.
    #[must_use]
    pub fn source_sheet(&self) -> SheetId {
        self.source_sheet
    }
}

/// Build the lookup sheet and wire both dropdowns in one call.
///
/// Not idempotent: a second call against the same document fails on the
/// lookup sheet name, and a failure partway through leaves the sheet and
/// ranges written so far in place.
pub fn create_dependent_dropdowns(
    doc: &mut dyn SpreadsheetDocument,
    sheet: SheetId,
    data: &CategoryMap,
    first_cell: &str,
    second_cell: &str,
    min_row: u32,
    max_row: u32,
) -> Result<()> {
    CategoryRanges::materialize(doc, data)?.attach(
        doc,
        sheet,
        first_cell,
        second_cell,
        min_row,
        max_row,
    )
}

fn validate_column_letter(cell: &str) -> Result<()> {
    if column_index(cell).is_none() {
        anyhow::bail!("Invalid column letter: {cell:?}");
    }
    Ok(())
}

fn validate_rows(min_row: u32, max_row: u32) -> Result<()> {
    if min_row < 1 || min_row > max_row {
        anyhow::bail!("Invalid dropdown rows: {min_row}..={max_row}");
    }
    Ok(())
}
