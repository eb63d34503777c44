/// Where a list validation takes its allowed values from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    /// Literal values, shown in the dropdown as given.
    Inline(Vec<String>),
    /// A formula or range reference resolved by the host application,
    /// e.g. `=G_values!$A$1:$A$12` or `=INDIRECT(D2)`.
    Reference(String),
}

impl ListSource {
    pub fn inline<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ListSource::Inline(values.into_iter().map(Into::into).collect())
    }

    pub fn reference(expression: impl Into<String>) -> Self {
        ListSource::Reference(expression.into())
    }
}

/// A dropdown rule queued on a sheet, applied to `range` when the
/// workbook is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListValidation {
    pub range: String,
    pub source: ListSource,
}

impl ListValidation {
    pub fn new(range: impl Into<String>, source: ListSource) -> Self {
        Self {
            range: range.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_source_builders() {
        assert_eq!(
            ListSource::inline(["Turkey", "USA"]),
            ListSource::Inline(vec!["Turkey".to_string(), "USA".to_string()])
        );
        assert_eq!(
            ListSource::reference("=INDIRECT(D2)"),
            ListSource::Reference("=INDIRECT(D2)".to_string())
        );
    }
}
