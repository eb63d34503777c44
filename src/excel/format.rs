// Default number formats applied to template columns

pub const INTEGER_FORMAT: &str = "#,##0";
pub const DECIMAL_FORMAT: &str = "#,##0.00";
pub const DATE_FORMAT: &str = "dd/mm/yyyy";
pub const TEXT_FORMAT: &str = "@";
pub const CURRENCY_FORMAT: &str = "$#,##0.00";

// Largest magnitudes a cell can hold before Excel rejects the number.
// Reference: https://support.microsoft.com/en-us/office/excel-specifications-and-limits-1672b34d-7043-467e-8e27-269d656771c3
pub const LARGEST_ALLOWED_POSITIVE_NUMBER: f64 = 9.99999999999999E+307;
pub const LARGEST_ALLOWED_NEGATIVE_NUMBER: f64 = -9.99999999999999E+307;
