use anyhow::{Context, Result};
use chrono::Datelike;
use rust_xlsxwriter::{
    Color, DataValidation, ExcelDateTime, Format, FormatAlign, Formula, Note as XlsxNote,
    Workbook as XlsxWorkbook,
};
use std::path::Path;

use crate::excel::cell::CellValue;
use crate::excel::document::{SheetId, SpreadsheetDocument};
use crate::excel::format::{
    DATE_FORMAT, LARGEST_ALLOWED_NEGATIVE_NUMBER, LARGEST_ALLOWED_POSITIVE_NUMBER,
};
use crate::excel::sheet::{MAX_COLS, MAX_ROWS, Note, Sheet};
use crate::excel::validation::{ListSource, ListValidation};
use crate::utils::{absolute_range, parse_cell_reference, parse_range};

// Header-row styling applied by apply_default_styling
const HEADER_ROW_HEIGHT: f64 = 20.0;
const DEFAULT_TAB_COLOR: u32 = 0x000000;

/// A workbook-level name bound to a range on one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    pub name: String,
    pub sheet: SheetId,
    pub range: String,
}

/// An in-memory workbook.
///
/// Everything is queued on the document structure and only turned into an
/// actual file by [`Workbook::save`] or [`Workbook::to_bytes`], which hand
/// the queued state to `rust_xlsxwriter`.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    named_ranges: Vec<NamedRange>,
}

impl Workbook {
    /// Create a workbook holding one visible sheet with the given name.
    pub fn new(sheet_name: &str) -> Self {
        Self {
            sheets: vec![Sheet::new(sheet_name, false)],
            named_ranges: Vec::new(),
        }
    }

    /// Handle of the sheet the workbook was created with.
    #[must_use]
    pub fn first_sheet(&self) -> SheetId {
        SheetId(0)
    }

    #[must_use]
    pub fn sheet_id(&self, name: &str) -> Option<SheetId> {
        self.sheets
            .iter()
            .position(|sheet| sheet.name.eq_ignore_ascii_case(name))
            .map(SheetId)
    }

    pub fn sheet(&self, sheet: SheetId) -> Result<&Sheet> {
        self.check_sheet(sheet)?;
        Ok(&self.sheets[sheet.0])
    }

    fn sheet_mut(&mut self, sheet: SheetId) -> Result<&mut Sheet> {
        self.check_sheet(sheet)?;
        Ok(&mut self.sheets[sheet.0])
    }

    fn check_sheet(&self, sheet: SheetId) -> Result<()> {
        if sheet.0 >= self.sheets.len() {
            anyhow::bail!("Sheet index out of range");
        }
        Ok(())
    }

    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            names.push(sheet.name.clone());
        }
        names
    }

    #[must_use]
    pub fn named_ranges(&self) -> &[NamedRange] {
        &self.named_ranges
    }

    /// Write header labels across row 1, starting at column A.
    pub fn add_columns<I, S>(&mut self, sheet: SheetId, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, name) in names.into_iter().enumerate() {
            let col = u16::try_from(index + 1)
                .map_err(|_| anyhow::anyhow!("Too many header columns"))?;
            self.write_cell(sheet, 1, col, CellValue::Text(name.into()))?;
        }
        Ok(())
    }

    pub fn read_cell(&self, sheet: SheetId, row: u32, col: u16) -> Result<Option<&CellValue>> {
        validate_position(row, col)?;
        Ok(self.sheet(sheet)?.cell(row, col))
    }

    pub fn clear_cell(&mut self, sheet: SheetId, row: u32, col: u16) -> Result<()> {
        validate_position(row, col)?;
        self.sheet_mut(sheet)?.remove_cell(row, col);
        Ok(())
    }

    /// Apply a number format (e.g. `#,##0`) to a whole column.
    pub fn set_column_format(&mut self, sheet: SheetId, col: u16, format: &str) -> Result<()> {
        validate_position(1, col)?;
        self.sheet_mut(sheet)?
            .column_formats
            .insert(col, format.to_string());
        Ok(())
    }

    pub fn set_column_width(&mut self, sheet: SheetId, col: u16, width: f64) -> Result<()> {
        validate_position(1, col)?;
        self.sheet_mut(sheet)?.column_widths.insert(col, width);
        Ok(())
    }

    pub fn set_row_height(&mut self, sheet: SheetId, row: u32, height: f64) -> Result<()> {
        validate_position(row, 1)?;
        self.sheet_mut(sheet)?.row_heights.insert(row, height);
        Ok(())
    }

    pub fn set_tab_color(&mut self, sheet: SheetId, rgb: u32) -> Result<()> {
        self.sheet_mut(sheet)?.tab_color = Some(rgb);
        Ok(())
    }

    /// Default sheet styling: black tab and a taller, centered header row.
    pub fn apply_default_styling(&mut self, sheet: SheetId) -> Result<()> {
        let sheet = self.sheet_mut(sheet)?;
        sheet.tab_color = Some(DEFAULT_TAB_COLOR);
        sheet.styled_header = true;
        Ok(())
    }

    pub fn add_comment(
        &mut self,
        sheet: SheetId,
        row: u32,
        col: u16,
        text: &str,
        author: Option<&str>,
    ) -> Result<()> {
        validate_position(row, col)?;
        self.sheet_mut(sheet)?.notes.push(Note {
            row,
            col,
            text: text.to_string(),
            author: author.map(str::to_string),
        });
        Ok(())
    }

    pub fn protect_sheet(&mut self, sheet: SheetId, password: &str) -> Result<()> {
        self.sheet_mut(sheet)?.protection = Some(password.to_string());
        Ok(())
    }

    /// Size columns to their content when the workbook is written out.
    pub fn set_autofit(&mut self, sheet: SheetId) -> Result<()> {
        self.sheet_mut(sheet)?.autofit = true;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = self.build_xlsx()?;
        workbook
            .save(path.as_ref())
            .with_context(|| format!("Unable to write Excel file: {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.build_xlsx()?;
        let buffer = workbook
            .save_to_buffer()
            .context("Unable to serialize workbook")?;
        Ok(buffer)
    }

    // Hand the queued document state to rust_xlsxwriter
    fn build_xlsx(&self) -> Result<XlsxWorkbook> {
        let mut workbook = XlsxWorkbook::new();

        let date_format = Format::new().set_num_format(DATE_FORMAT);
        let header_format = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet().set_name(sheet.name.as_str())?;

            // Write cell data
            for (row, col, value) in sheet.used_cells() {
                let row_idx = row - 1;
                let col_idx = col - 1;

                match value {
                    CellValue::Text(s) => {
                        worksheet.write_string(row_idx, col_idx, s.as_str())?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row_idx, col_idx, *n)?;
                    }
                    CellValue::Boolean(b) => {
                        worksheet.write_boolean(row_idx, col_idx, *b)?;
                    }
                    CellValue::Date(date) => {
                        let year = u16::try_from(date.year()).map_err(|_| {
                            anyhow::anyhow!("Date {date} is outside the xlsx year range")
                        })?;
                        let datetime =
                            ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)?;
                        worksheet.write_datetime_with_format(
                            row_idx,
                            col_idx,
                            &datetime,
                            &date_format,
                        )?;
                    }
                    CellValue::Formula(expression) => {
                        let formula = Formula::new(expression.as_str());
                        worksheet.write_formula(row_idx, col_idx, formula)?;
                    }
                }
            }

            if sheet.styled_header {
                worksheet.set_row_format(0, &header_format)?;
                worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;
            }

            for (&col, format_code) in &sheet.column_formats {
                let format = Format::new().set_num_format(format_code.as_str());
                worksheet.set_column_format(col - 1, &format)?;
            }

            for (&col, &width) in &sheet.column_widths {
                worksheet.set_column_width(col - 1, width)?;
            }

            for (&row, &height) in &sheet.row_heights {
                worksheet.set_row_height(row - 1, height)?;
            }

            for validation in &sheet.validations {
                let ((first_row, first_col), (last_row, last_col)) = parse_range(&validation.range)
                    .ok_or_else(|| {
                        anyhow::anyhow!("Invalid cell range: {}", validation.range)
                    })?;

                let rule = match &validation.source {
                    ListSource::Inline(values) => {
                        let items: Vec<&str> = values.iter().map(String::as_str).collect();
                        DataValidation::new().allow_list_strings(&items)?
                    }
                    ListSource::Reference(expression) => DataValidation::new()
                        .allow_list_formula(Formula::new(expression.as_str())),
                };

                worksheet.add_data_validation(
                    first_row - 1,
                    first_col - 1,
                    last_row - 1,
                    last_col - 1,
                    &rule,
                )?;
            }

            for note in &sheet.notes {
                let mut xlsx_note = XlsxNote::new(note.text.as_str()).add_author_prefix(false);
                if let Some(author) = &note.author {
                    xlsx_note = xlsx_note.set_author(author.as_str());
                }
                worksheet.insert_note(note.row - 1, note.col - 1, &xlsx_note)?;
            }

            if let Some(rgb) = sheet.tab_color {
                worksheet.set_tab_color(Color::RGB(rgb));
            }

            if sheet.hidden {
                worksheet.set_hidden(true);
            }

            if sheet.autofit {
                worksheet.autofit();
            }

            if let Some(password) = &sheet.protection {
                worksheet.protect_with_password(password.as_str());
            }
        }

        // Defined names resolve through workbook scope, so the referred
        // range must be absolute and sheet-qualified
        for named_range in &self.named_ranges {
            let sheet_name = &self.sheets[named_range.sheet.0].name;
            let refers_to = absolute_range(sheet_name, &named_range.range).ok_or_else(|| {
                anyhow::anyhow!("Invalid cell range: {}", named_range.range)
            })?;
            workbook.define_name(named_range.name.as_str(), format!("={refers_to}").as_str())?;
        }

        Ok(workbook)
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Workbook::new("sheet1")
    }
}

impl SpreadsheetDocument for Workbook {
    fn add_sheet(&mut self, name: &str, hidden: bool) -> Result<SheetId> {
        validate_sheet_name(name)?;

        if self
            .sheets
            .iter()
            .any(|sheet| sheet.name.eq_ignore_ascii_case(name))
        {
            anyhow::bail!("Worksheet name {name:?} is already in use");
        }

        self.sheets.push(Sheet::new(name, hidden));
        Ok(SheetId(self.sheets.len() - 1))
    }

    fn write_cell(&mut self, sheet: SheetId, row: u32, col: u16, value: CellValue) -> Result<()> {
        validate_position(row, col)?;

        if let CellValue::Number(n) = &value {
            if !n.is_finite()
                || *n > LARGEST_ALLOWED_POSITIVE_NUMBER
                || *n < LARGEST_ALLOWED_NEGATIVE_NUMBER
            {
                anyhow::bail!("Number {n} cannot be stored in a cell");
            }
        }

        self.sheet_mut(sheet)?.set_cell(row, col, value);
        Ok(())
    }

    fn define_named_range(&mut self, sheet: SheetId, name: &str, range: &str) -> Result<()> {
        self.check_sheet(sheet)?;
        validate_defined_name(name)?;

        if self
            .named_ranges
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
        {
            anyhow::bail!("Defined name {name:?} already exists");
        }

        validate_range(range)?;

        self.named_ranges.push(NamedRange {
            name: name.to_string(),
            sheet,
            range: range.to_string(),
        });
        Ok(())
    }

    fn attach_list_validation(
        &mut self,
        sheet: SheetId,
        range: &str,
        source: ListSource,
    ) -> Result<()> {
        validate_range(range)?;

        self.sheet_mut(sheet)?
            .validations
            .push(ListValidation::new(range, source));
        Ok(())
    }
}

fn validate_position(row: u32, col: u16) -> Result<()> {
    if row < 1 || row > MAX_ROWS || col < 1 || col > MAX_COLS {
        anyhow::bail!("Cell position ({row}, {col}) is outside the sheet grid");
    }
    Ok(())
}

fn validate_range(range: &str) -> Result<()> {
    let Some((_, (last_row, last_col))) = parse_range(range) else {
        anyhow::bail!("Invalid cell range: {range}");
    };
    if last_row > MAX_ROWS || last_col > MAX_COLS {
        anyhow::bail!("Range {range} is outside the sheet grid");
    }
    Ok(())
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Worksheet name cannot be empty");
    }
    if name.chars().count() > 31 {
        anyhow::bail!("Worksheet name {name:?} is longer than 31 characters");
    }
    if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
        anyhow::bail!("Worksheet name {name:?} contains an invalid character");
    }
    Ok(())
}

fn validate_defined_name(name: &str) -> Result<()> {
    let valid_start = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid_rest = name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.');

    if !valid_start || !valid_rest {
        anyhow::bail!("Invalid defined name: {name:?}");
    }

    // A name that reads as a cell reference would be unreachable in formulas
    if parse_cell_reference(name).is_some() {
        anyhow::bail!("Defined name {name:?} collides with a cell reference");
    }

    Ok(())
}
