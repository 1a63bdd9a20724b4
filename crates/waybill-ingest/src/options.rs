//! Ingestion options.

use waybill_model::CellValue;

/// Text cells equal to one of these are read as missing unless disabled with
/// [`IngestOptions::with_keep_default_na`].
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options controlling how a source file becomes a table.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Sheet to read; the first sheet when `None`. Ignored for CSV.
    pub sheet: Option<String>,
    /// Extra text values to treat as missing.
    pub na_values: Vec<String>,
    /// Whether [`DEFAULT_NA_VALUES`] apply.
    pub keep_default_na: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            na_values: Vec::new(),
            keep_default_na: true,
        }
    }
}

impl IngestOptions {
    /// Read the named sheet instead of the first one.
    #[must_use]
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Add a missing-value marker.
    #[must_use]
    pub fn with_na_value(mut self, value: impl Into<String>) -> Self {
        self.na_values.push(value.into());
        self
    }

    /// Enable or disable the default missing-value markers.
    #[must_use]
    pub fn with_keep_default_na(mut self, enable: bool) -> Self {
        self.keep_default_na = enable;
        self
    }

    /// Every active missing-value marker, defaults first.
    pub fn na_markers(&self) -> impl Iterator<Item = &str> {
        let defaults: &[&str] = if self.keep_default_na {
            DEFAULT_NA_VALUES
        } else {
            &[]
        };
        defaults
            .iter()
            .copied()
            .chain(self.na_values.iter().map(String::as_str))
    }

    pub fn is_na_marker(&self, text: &str) -> bool {
        (self.keep_default_na && DEFAULT_NA_VALUES.contains(&text))
            || self.na_values.iter().any(|marker| marker == text)
    }

    /// Replace marker text with [`CellValue::Missing`]; other cells pass through.
    pub fn apply_na(&self, cell: CellValue) -> CellValue {
        match cell {
            CellValue::Text(text) if self.is_na_marker(&text) => CellValue::Missing,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_markers_become_missing() {
        let options = IngestOptions::default();
        for marker in ["", "NA", "#N/A", "null", "NaN"] {
            assert_eq!(options.apply_na(CellValue::from(marker)), CellValue::Missing);
        }
        assert_eq!(options.apply_na(CellValue::from(" ")), CellValue::from(" "));
        assert_eq!(options.apply_na(CellValue::from(0.0)), CellValue::from(0.0));
    }

    #[test]
    fn defaults_can_be_disabled_and_extended() {
        let options = IngestOptions::default()
            .with_keep_default_na(false)
            .with_na_value("无");
        assert_eq!(options.apply_na(CellValue::from("NA")), CellValue::from("NA"));
        assert_eq!(options.apply_na(CellValue::from("无")), CellValue::Missing);
        assert_eq!(options.na_markers().collect::<Vec<_>>(), ["无"]);
    }
}
