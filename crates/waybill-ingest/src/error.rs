//! Error types for source ingestion.

use std::path::PathBuf;

use thiserror::Error;
use waybill_model::ModelError;

/// Errors that can occur while reading a source dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The extension is not one of the supported workbook or CSV formats.
    #[error(
        "unsupported source format for {path}: expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv"
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// calamine could not open or decode the workbook.
    #[error("failed to read workbook {origin}: {source}")]
    Workbook {
        origin: String,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {origin} has no sheets")]
    NoSheets { origin: String },

    #[error("sheet '{sheet}' not found in {origin} (available: {available})")]
    SheetNotFound {
        sheet: String,
        origin: String,
        available: String,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// The parsed rows do not form a valid table.
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
