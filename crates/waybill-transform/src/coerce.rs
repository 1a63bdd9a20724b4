//! Coercions shared by the derivation rules.
//!
//! None of these fail. Input that cannot be read as the requested type comes
//! back as `None`, which the rules turn into a missing target value.

use chrono::NaiveDateTime;
use waybill_model::CellValue;

/// Output layout for load and unload timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Read a cell as a number.
///
/// Numbers pass through, numeric text is parsed, booleans count as 1 and 0.
/// Timestamps, unparseable text, `NaN` and missing cells give `None`.
pub fn coerce_numeric(value: &CellValue) -> Option<f64> {
    let number = match value {
        CellValue::Number(v) => Some(*v),
        CellValue::Text(text) => parse_f64(text),
        CellValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        CellValue::Missing | CellValue::DateTime(_) => None,
    };
    number.filter(|v| !v.is_nan())
}

/// Read a cell as a timestamp. Only cells the reader recognised as date/time
/// values qualify; text that merely looks like a date does not.
pub fn coerce_datetime(value: &CellValue) -> Option<NaiveDateTime> {
    value.as_datetime()
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn numeric_coercion() {
        assert_eq!(coerce_numeric(&CellValue::from(12.5)), Some(12.5));
        assert_eq!(coerce_numeric(&CellValue::from(" 40 ")), Some(40.0));
        assert_eq!(coerce_numeric(&CellValue::from("1e3")), Some(1000.0));
        assert_eq!(coerce_numeric(&CellValue::from(true)), Some(1.0));
        assert_eq!(coerce_numeric(&CellValue::from("十二")), None);
        assert_eq!(coerce_numeric(&CellValue::from("1,200")), None);
        assert_eq!(coerce_numeric(&CellValue::from("nan")), None);
        assert_eq!(coerce_numeric(&CellValue::from("")), None);
        assert_eq!(coerce_numeric(&CellValue::Missing), None);
    }

    #[test]
    fn timestamps_are_never_numbers() {
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(coerce_numeric(&CellValue::DateTime(stamp)), None);
        assert_eq!(coerce_datetime(&CellValue::DateTime(stamp)), Some(stamp));
        assert_eq!(coerce_datetime(&CellValue::from("2024-01-01 00:00")), None);
    }

    #[test]
    fn timestamp_format_is_minute_precision() {
        let stamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 59)
            .unwrap();
        assert_eq!(format_timestamp(stamp), "2024/03/09 07:05");
    }
}
