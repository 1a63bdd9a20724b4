//! Polars AnyValue conversion.
//!
//! Turns a Polars `DataFrame` into a [`SourceTable`], mapping each `AnyValue`
//! to the matching [`CellValue`] variant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use polars::prelude::{AnyValue, DataFrame, TimeUnit};
use waybill_model::{CellValue, SourceTable};

use crate::{IngestOptions, Result, unique_headers};

/// Converts a Polars AnyValue to a cell.
///
/// Nulls become missing, numeric types become numbers, dates and datetimes
/// become timestamps. Anything else is kept as its display text.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::number(v),
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        AnyValue::Date(days) => date_from_epoch_days(days)
            .map_or(CellValue::Missing, |date| {
                CellValue::DateTime(date.and_time(NaiveTime::MIN))
            }),
        AnyValue::Datetime(v, unit, _) | AnyValue::DatetimeOwned(v, unit, _) => {
            datetime_from_epoch(v, unit).map_or(CellValue::Missing, CellValue::DateTime)
        }
        other => CellValue::Text(other.to_string()),
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(TimeDelta::try_days(i64::from(days))?)
}

fn datetime_from_epoch(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let utc = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    utc.map(|dt| dt.naive_utc())
}

/// Copy a DataFrame into a [`SourceTable`], applying the missing-value markers.
pub fn dataframe_to_table(df: &DataFrame, options: &IngestOptions) -> Result<SourceTable> {
    let headers = unique_headers(df.get_column_names().iter().map(|name| name.as_str()));
    let mut table = SourceTable::new(headers)?;
    let columns = df.get_columns();
    for row_idx in 0..df.height() {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column.get(row_idx).unwrap_or(AnyValue::Null);
            cells.push(options.apply_na(any_to_cell(value)));
        }
        table.push_row(cells)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn numeric_any_values_become_numbers() {
        assert_eq!(any_to_cell(AnyValue::Int64(12)), CellValue::Number(12.0));
        assert_eq!(any_to_cell(AnyValue::UInt8(3)), CellValue::Number(3.0));
        assert_eq!(any_to_cell(AnyValue::Float64(f64::NAN)), CellValue::Missing);
        assert_eq!(any_to_cell(AnyValue::Null), CellValue::Missing);
        assert_eq!(any_to_cell(AnyValue::Boolean(true)), CellValue::Bool(true));
    }

    #[test]
    fn temporal_any_values_become_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let millis = expected.and_utc().timestamp_millis();
        assert_eq!(
            any_to_cell(AnyValue::Datetime(millis, TimeUnit::Milliseconds, None)),
            CellValue::DateTime(expected)
        );
        let days = (expected.date() - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).num_days();
        assert_eq!(
            any_to_cell(AnyValue::Date(days as i32)),
            CellValue::DateTime(expected.date().and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn dataframe_rows_keep_order_and_apply_markers() {
        let df = DataFrame::new(vec![
            Series::new("区域".into(), vec![Some("A"), Some("NA"), None]).into_column(),
            Series::new("里程".into(), vec![Some(10.0), None, Some(2.5)]).into_column(),
        ])
        .unwrap();
        let table = dataframe_to_table(&df, &IngestOptions::default()).unwrap();
        assert_eq!(table.columns(), ["区域", "里程"]);
        assert_eq!(table.height(), 3);
        let regions: Vec<&CellValue> = table.column_values("区域").collect();
        assert_eq!(
            regions,
            vec![&CellValue::from("A"), &CellValue::Missing, &CellValue::Missing]
        );
        assert_eq!(table.record(2).unwrap().get("里程"), &CellValue::Number(2.5));
    }
}
