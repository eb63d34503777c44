/// Convert a zero-based column index into its spreadsheet column label.
///
/// The labels follow bijective base-26 over A-Z: 0 -> "A", 25 -> "Z",
/// 26 -> "AA", 701 -> "ZZ", 702 -> "AAA".
#[must_use]
pub fn column_label(index: u32) -> String {
    let mut label = String::new();
    let mut n = index;

    loop {
        let remainder = (n % 26) as u8;
        label.insert(0, (b'A' + remainder) as char);

        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }

    label
}

/// Labels for the first `count` columns, in column order.
///
/// The iterator is lazy and can be restarted by cloning it.
pub fn column_labels(count: u32) -> impl Iterator<Item = String> + Clone {
    (0..count).map(column_label)
}

/// Parse a column label back into its zero-based index.
///
/// Returns `None` for an empty string, a non-alphabetic character, or a
/// label too long to fit in `u32`.
#[must_use]
pub fn column_index(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }

    let mut result: u32 = 0;

    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }

        let val = u32::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
        result = result.checked_mul(26)?.checked_add(val)?;
    }

    Some(result - 1)
}

// Format a 1-based (row, column) pair as a cell reference (e.g. A1, B2)
#[must_use]
pub fn cell_reference(row: u32, col: u16) -> String {
    debug_assert!(row >= 1 && col >= 1);
    format!("{}{}", column_label(u32::from(col) - 1), row)
}

/// Parse a cell reference like `D2` or `$D$2` into 1-based (row, column).
#[must_use]
pub fn parse_cell_reference(cell: &str) -> Option<(u32, u16)> {
    let cell = cell.trim();
    let letters: String = cell
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '$')
        .filter(|c| *c != '$')
        .collect();
    let digit_count = cell.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    let digits = &cell[cell.len() - digit_count..];

    if letters.is_empty() || digits.is_empty() {
        return None;
    }

    // The reference must be exactly letters followed by digits, with `$`
    // allowed before either part
    let rebuilt: String = cell.chars().filter(|c| *c != '$').collect();
    if rebuilt != format!("{letters}{digits}") {
        return None;
    }

    let row: u32 = digits.parse().ok()?;
    let col = column_index(&letters)? + 1;

    if row < 1 || col > u32::from(u16::MAX) {
        return None;
    }

    Some((row, col as u16))
}

/// Parse a rectangular range like `D2:E100` (or a single cell) into its
/// 1-based corner pair. Reversed ranges are rejected.
#[must_use]
pub fn parse_range(range: &str) -> Option<((u32, u16), (u32, u16))> {
    let (first, second) = match range.split_once(':') {
        Some((first, second)) => (first, second),
        None => (range, range),
    };

    let start = parse_cell_reference(first)?;
    let end = parse_cell_reference(second)?;

    if start.0 > end.0 || start.1 > end.1 {
        return None;
    }

    Some((start, end))
}

/// Turn a relative range into an absolute sheet-qualified reference,
/// e.g. (`data`, `A2:A9`) -> `data!$A$2:$A$9`.
#[must_use]
pub fn absolute_range(sheet_name: &str, range: &str) -> Option<String> {
    let ((start_row, start_col), (end_row, end_col)) = parse_range(range)?;

    Some(format!(
        "{}!${}${}:${}${}",
        quote_sheet_name(sheet_name),
        column_label(u32::from(start_col) - 1),
        start_row,
        column_label(u32::from(end_col) - 1),
        end_row,
    ))
}

// Quote a sheet name for use inside a formula when it needs it
#[must_use]
pub fn quote_sheet_name(name: &str) -> String {
    let needs_quoting = name.is_empty()
        || name.chars().next().is_some_and(|c| c.is_ascii_digit())
        || name
            .chars()
            .any(|c| !(c.is_alphanumeric() || c == '_' || c == '.'));

    if needs_quoting {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(1), "B");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("ZZ"), Some(701));
        assert_eq!(column_index("AAA"), Some(702));
        assert_eq!(column_index("a"), Some(0));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
        assert_eq!(column_index("A B"), None);
    }

    #[test]
    fn test_label_round_trip() {
        for index in 0..1000 {
            let label = column_label(index);
            assert_eq!(column_index(&label), Some(index));
        }
    }

    #[test]
    fn test_labels_are_ordered_and_grow() {
        let mut previous = (0, String::new());
        for index in 0..2000 {
            let label = column_label(index);
            assert!(!label.is_empty());
            assert!(label.chars().all(|c| c.is_ascii_uppercase()));

            // Shorter labels sort first, equal lengths sort lexicographically
            let key = (label.len(), label.clone());
            assert!(key > (previous.0, previous.1.clone()));
            previous = (label.len(), label);
        }
    }

    #[test]
    fn test_column_labels_iterator() {
        let labels: Vec<String> = column_labels(4).collect();
        assert_eq!(labels, ["A", "B", "C", "D"]);

        let empty: Vec<String> = column_labels(0).collect();
        assert!(empty.is_empty());

        let many: Vec<String> = column_labels(28).collect();
        assert_eq!(many.len(), 28);
        assert_eq!(many.first().map(String::as_str), Some("A"));
        assert_eq!(many.last().map(String::as_str), Some("AB"));

        let distinct: std::collections::HashSet<String> = column_labels(1000).collect();
        assert_eq!(distinct.len(), 1000);
    }

    #[test]
    fn test_column_labels_restartable() {
        let labels = column_labels(3);
        let first: Vec<String> = labels.clone().collect();
        let second: Vec<String> = labels.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(1, 1), "A1");
        assert_eq!(cell_reference(2, 4), "D2");
        assert_eq!(cell_reference(100, 27), "AA100");
    }

    #[test]
    fn test_parse_cell_reference() {
        assert_eq!(parse_cell_reference("A1"), Some((1, 1)));
        assert_eq!(parse_cell_reference("D2"), Some((2, 4)));
        assert_eq!(parse_cell_reference("$D$2"), Some((2, 4)));
        assert_eq!(parse_cell_reference("AA100"), Some((100, 27)));
        assert_eq!(parse_cell_reference("A0"), None);
        assert_eq!(parse_cell_reference("1A"), None);
        assert_eq!(parse_cell_reference("A1B"), None);
        assert_eq!(parse_cell_reference(""), None);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("D2:E100"), Some(((2, 4), (100, 5))));
        assert_eq!(parse_range("A1"), Some(((1, 1), (1, 1))));
        assert_eq!(parse_range("$A$2:$A$9"), Some(((2, 1), (9, 1))));
        assert_eq!(parse_range("E100:D2"), None);
        assert_eq!(parse_range("D2:"), None);
    }

    #[test]
    fn test_absolute_range() {
        assert_eq!(
            absolute_range("data", "A2:A9").as_deref(),
            Some("data!$A$2:$A$9")
        );
        assert_eq!(
            absolute_range("city list", "B2:B8").as_deref(),
            Some("'city list'!$B$2:$B$8")
        );
        assert_eq!(absolute_range("data", "nope"), None);
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("data"), "data");
        assert_eq!(quote_sheet_name("G_values"), "G_values");
        assert_eq!(quote_sheet_name("my sheet"), "'my sheet'");
        assert_eq!(quote_sheet_name("it's"), "'it''s'");
        assert_eq!(quote_sheet_name("1data"), "'1data'");
    }
}
