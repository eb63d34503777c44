use calamine::{open_workbook_auto, Data, Reader, SheetVisible};
use std::path::PathBuf;

use excel_template::excel::reader;
use excel_template::template;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("excel_template_{}_{}.xlsx", name, std::process::id()))
}

#[test]
fn template_survives_a_round_trip() {
    let path = temp_path("roundtrip");

    let data = template::sample_data();
    let workbook = template::build_personnel_template(&data, 100, Some("1234")).unwrap();
    workbook.save(&path).unwrap();

    let mut reopened = open_workbook_auto(&path).unwrap();

    let sheets = reopened.sheets_metadata().to_vec();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].name, "personnel");
    assert_eq!(sheets[0].visible, SheetVisible::Visible);
    assert_eq!(sheets[1].name, "data");
    assert_eq!(sheets[1].visible, SheetVisible::Hidden);

    let personnel = reopened.worksheet_range("personnel").unwrap();
    let headers: Vec<String> = (0..8)
        .map(|col| match personnel.get_value((0, col)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("unexpected header cell: {other:?}"),
        })
        .collect();
    assert_eq!(
        headers,
        ["Name", "Surname", "Age", "Country", "City", "Phone Number", "Email", "Point"]
    );

    // Category columns: header in row 1, values from row 2 down
    let lookup = reopened.worksheet_range("data").unwrap();
    assert_eq!(
        lookup.get_value((0, 0)),
        Some(&Data::String("Turkey".to_string()))
    );
    assert_eq!(
        lookup.get_value((1, 0)),
        Some(&Data::String("Trabzon".to_string()))
    );
    assert_eq!(
        lookup.get_value((8, 0)),
        Some(&Data::String("Konya".to_string()))
    );
    assert_eq!(
        lookup.get_value((0, 7)),
        Some(&Data::String("Australia".to_string()))
    );
    assert_eq!(
        lookup.get_value((7, 7)),
        Some(&Data::String("Canberra".to_string()))
    );

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn dump_reports_sheets_and_visibility() {
    let path = temp_path("dump");

    let workbook = template::build_personnel_template(&template::sample_data(), 10, None).unwrap();
    workbook.save(&path).unwrap();

    let dump = reader::dump_workbook(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(dump.len(), 2);

    assert_eq!(dump[0].name, "personnel");
    assert!(!dump[0].hidden);
    assert_eq!(dump[0].cells.len(), 8);

    assert_eq!(dump[1].name, "data");
    assert!(dump[1].hidden);
    // 8 headers plus 8 Turkish cities plus 7 cities for each other country
    assert_eq!(dump[1].cells.len(), 8 + 8 + 7 * 7);

    let first = &dump[1].cells[0];
    assert_eq!(
        (first.row, first.col, first.value.as_str()),
        (1, 1, "Turkey")
    );
}
