//! Workbook sources, read through calamine.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use tracing::debug;
use waybill_model::serial::{datetime_from_serial, time_from_serial};
use waybill_model::{CellValue, SourceTable};

use crate::{IngestError, IngestOptions, Result, unique_headers};

const MEMORY_ORIGIN: &str = "<memory>";

/// Read one sheet of a workbook on disk.
pub fn read_workbook_path(path: &Path, options: &IngestOptions) -> Result<SourceTable> {
    let origin = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Workbook {
        origin: origin.clone(),
        source,
    })?;
    read_sheet(&mut workbook, &origin, options)
}

/// Read one sheet of a workbook already held in memory (an upload, for
/// instance). The format is sniffed from the content.
pub fn read_workbook_bytes(bytes: Vec<u8>, options: &IngestOptions) -> Result<SourceTable> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| IngestError::Workbook {
            origin: MEMORY_ORIGIN.to_string(),
            source,
        })?;
    read_sheet(&mut workbook, MEMORY_ORIGIN, options)
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    origin: &str,
    options: &IngestOptions,
) -> Result<SourceTable> {
    let names = workbook.sheet_names();
    let sheet = match options.sheet.as_deref() {
        Some(wanted) => {
            if !names.iter().any(|name| name == wanted) {
                return Err(IngestError::SheetNotFound {
                    sheet: wanted.to_string(),
                    origin: origin.to_string(),
                    available: names.join(", "),
                });
            }
            wanted.to_string()
        }
        None => names.first().cloned().ok_or_else(|| IngestError::NoSheets {
            origin: origin.to_string(),
        })?,
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|source| IngestError::Workbook {
            origin: origin.to_string(),
            source,
        })?;
    debug!(origin, sheet = %sheet, "reading sheet");
    range_to_table(&range, options)
}

/// The first row of the used range is the header. Trailing rows with only
/// empty cells are dropped; rows of marker text or error cells are kept.
fn range_to_table(range: &Range<Data>, options: &IngestOptions) -> Result<SourceTable> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(SourceTable::default());
    };
    let headers = unique_headers(header_row.iter().map(|cell| data_to_cell(cell).to_string()));
    let width = headers.len();

    let mut raw: Vec<&[Data]> = rows.map(|row| &row[..width.min(row.len())]).collect();
    while raw
        .last()
        .is_some_and(|row| row.iter().all(|cell| matches!(cell, Data::Empty)))
    {
        raw.pop();
    }
    let records: Vec<Vec<CellValue>> = raw
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|cell| options.apply_na(data_to_cell(cell)))
                .collect()
        })
        .collect();
    Ok(SourceTable::with_rows(headers, records)?)
}

/// Converts a calamine cell to a [`CellValue`].
///
/// Date-formatted cells become timestamps. Cells holding only a time of day
/// (serial below one, or a duration format) become `HH:MM:SS` text, since
/// they carry no date. Error cells such as `#N/A` are missing.
pub fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::number(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            if dt.is_duration() || (0.0..1.0).contains(&serial) {
                time_from_serial(serial).map_or(CellValue::number(serial), |time| {
                    CellValue::Text(time.format("%H:%M:%S").to_string())
                })
            } else {
                datetime_from_serial(serial).map_or(CellValue::number(serial), CellValue::DateTime)
            }
        }
        Data::DateTimeIso(s) => parse_iso_datetime(s).map_or_else(
            || CellValue::Text(s.clone()),
            CellValue::DateTime,
        ),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}
