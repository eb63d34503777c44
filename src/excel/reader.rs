use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader, SheetVisible};
use serde::Serialize;
use std::path::Path;

/// Snapshot of one sheet of an existing file, for inspection output.
#[derive(Debug, Clone, Serialize)]
pub struct SheetDump {
    pub name: String,
    pub hidden: bool,
    pub cells: Vec<CellDump>,
}

/// A non-empty cell, with its value rendered as text.
#[derive(Debug, Clone, Serialize)]
pub struct CellDump {
    pub row: u32,
    pub col: u16,
    pub value: String,
}

/// Read every sheet of an xlsx/xls file into dump form.
pub fn dump_workbook<P: AsRef<Path>>(path: P) -> Result<Vec<SheetDump>> {
    let path_str = path.as_ref().to_string_lossy().to_string();

    let mut workbook = open_workbook_auto(&path)
        .with_context(|| format!("Unable to parse Excel file: {}", path_str))?;

    let sheets: Vec<(String, bool)> = workbook
        .sheets_metadata()
        .iter()
        .map(|sheet| {
            (
                sheet.name.clone(),
                !matches!(sheet.visible, SheetVisible::Visible),
            )
        })
        .collect();

    if sheets.is_empty() {
        anyhow::bail!("No worksheets found in file");
    }

    let mut dumps = Vec::with_capacity(sheets.len());

    for (name, hidden) in sheets {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Unable to read worksheet: {}", name))?;

        let mut cells = Vec::new();

        for (row_idx, col_idx, data) in range.used_cells() {
            let value = data_to_string(data);
            if value.is_empty() {
                continue;
            }

            cells.push(CellDump {
                row: row_idx as u32 + 1,
                col: col_idx as u16 + 1,
                value,
            });
        }

        dumps.push(SheetDump {
            name,
            hidden,
            cells,
        });
    }

    Ok(dumps)
}

fn data_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),

        Data::String(s) => s.clone(),

        Data::Float(f) => {
            // Show whole floats without the trailing .0
            if *f == (*f as i64) as f64 && f.abs() < 1e10 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }

        Data::Int(i) => i.to_string(),

        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }

        Data::Error(e) => format!("Error: {:?}", e),

        Data::DateTime(dt) => dt.to_string(),

        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
