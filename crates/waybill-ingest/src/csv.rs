//! CSV sources, read through Polars.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::{CsvReadOptions, NullValues, PlSmallStr, SerReader};
use tracing::debug;
use waybill_model::SourceTable;

use crate::{IngestError, IngestOptions, Result, dataframe_to_table};

/// Missing-value markers are handed to Polars so they are null during schema
/// inference; a single `NA` must not turn a numeric column into text.
fn base_options(options: &IngestOptions) -> CsvReadOptions {
    let markers: Vec<PlSmallStr> = options.na_markers().map(PlSmallStr::from).collect();
    let null_values = (!markers.is_empty()).then_some(NullValues::AllColumns(markers));
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|parse| {
            parse
                .with_try_parse_dates(true)
                .with_null_values(null_values.clone())
        })
}

/// Read a CSV file. Column types are inferred from every row; date and
/// datetime columns are parsed into timestamps.
pub fn read_csv_path(path: &Path, options: &IngestOptions) -> Result<SourceTable> {
    let origin = path.display().to_string();
    let df = base_options(options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            origin: origin.clone(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
    debug!(origin = %origin, rows = df.height(), columns = df.width(), "csv parsed");
    dataframe_to_table(&df, options)
}

/// Read CSV content already held in memory (an upload, for instance).
pub fn read_csv_bytes(bytes: Vec<u8>, options: &IngestOptions) -> Result<SourceTable> {
    let df = base_options(options)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: "<memory>".to_string(),
            message: e.to_string(),
        })?;
    dataframe_to_table(&df, options)
}
