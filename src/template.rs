use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dropdown::{self, CategoryMap};
use crate::excel::{DECIMAL_FORMAT, INTEGER_FORMAT, TEXT_FORMAT, Workbook};

/// Header labels of the personnel template, in column order.
pub const PERSONNEL_COLUMNS: [&str; 8] = [
    "Name",
    "Surname",
    "Age",
    "Country",
    "City",
    "Phone Number",
    "Email",
    "Point",
];

/// Build the personnel entry template: styled headers, country and city
/// dropdowns on columns D and E for rows 2 through `rows`, number formats
/// per column, and optional sheet protection.
pub fn build_personnel_template(
    data: &CategoryMap,
    rows: u32,
    password: Option<&str>,
) -> Result<Workbook> {
    if rows < 2 {
        anyhow::bail!("A template needs at least one data row below the headers");
    }

    let mut workbook = Workbook::new("personnel");
    let sheet = workbook.first_sheet();

    workbook.apply_default_styling(sheet)?;
    workbook.add_columns(sheet, PERSONNEL_COLUMNS)?;

    dropdown::create_dependent_dropdowns(&mut workbook, sheet, data, "D", "E", 2, rows)?;

    workbook.add_comment(
        sheet,
        1,
        5,
        "Pick the country first; the city list depends on it.",
        Some("excel-template"),
    )?;

    for col in [1u16, 2, 4, 5, 6, 7] {
        workbook.set_column_format(sheet, col, TEXT_FORMAT)?;
    }
    workbook.set_column_format(sheet, 3, INTEGER_FORMAT)?;
    workbook.set_column_format(sheet, 8, DECIMAL_FORMAT)?;

    workbook.set_autofit(sheet)?;

    if let Some(password) = password {
        workbook.protect_sheet(sheet, password)?;
    }

    Ok(workbook)
}

/// Countries and their cities used by the demo template.
pub fn sample_data() -> CategoryMap {
    let mut data = CategoryMap::new();
    data.insert(
        "Turkey".to_string(),
        cities(&[
            "Trabzon", "Istanbul", "Ankara", "Izmir", "Bursa", "Antalya", "Adana", "Konya",
        ]),
    );
    data.insert(
        "USA".to_string(),
        cities(&[
            "New York",
            "Los Angeles",
            "Chicago",
            "Houston",
            "Phoenix",
            "Philadelphia",
            "San Antonio",
        ]),
    );
    data.insert(
        "Germany".to_string(),
        cities(&[
            "Berlin",
            "Munich",
            "Frankfurt",
            "Hamburg",
            "Cologne",
            "Stuttgart",
            "Düsseldorf",
        ]),
    );
    data.insert(
        "France".to_string(),
        cities(&[
            "Paris", "Lyon", "Marseille", "Nice", "Toulouse", "Nice", "Nantes",
        ]),
    );
    data.insert(
        "Italy".to_string(),
        cities(&[
            "Rome", "Milan", "Naples", "Turin", "Palermo", "Genoa", "Bologna",
        ]),
    );
    data.insert(
        "Spain".to_string(),
        cities(&[
            "Madrid", "Barcelona", "Valencia", "Seville", "Zaragoza", "Malaga", "Murcia",
        ]),
    );
    data.insert(
        "Canada".to_string(),
        cities(&[
            "Toronto",
            "Vancouver",
            "Montreal",
            "Calgary",
            "Ottawa",
            "Edmonton",
            "Quebec City",
        ]),
    );
    data.insert(
        "Australia".to_string(),
        cities(&[
            "Sydney",
            "Melbourne",
            "Brisbane",
            "Perth",
            "Adelaide",
            "Gold Coast",
            "Canberra",
        ]),
    );
    data
}

fn cities(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Load a category map from a JSON object file. Key order in the file is
/// the column order on the lookup sheet.
pub fn load_category_map<P: AsRef<Path>>(path: P) -> Result<CategoryMap> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Unable to open category file: {}", path.as_ref().display()))?;

    let data: CategoryMap = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Unable to parse category JSON: {}", path.as_ref().display()))?;

    Ok(data)
}
