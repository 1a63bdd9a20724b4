//! Source ingestion for the waybill splitter.
//!
//! Reads one sheet of a workbook (calamine) or a CSV file (polars) into a
//! [`SourceTable`]. The first row is the header; every other row becomes a
//! record. Cell typing follows what a spreadsheet user sees: numbers stay
//! numbers, date-formatted cells become timestamps, and the usual missing
//! markers (`NA`, `#N/A`, empty text, ...) become [`CellValue::Missing`].
//!
//! [`CellValue::Missing`]: waybill_model::CellValue::Missing

pub mod csv;
pub mod error;
pub mod headers;
pub mod options;
pub mod polars_utils;
pub mod workbook;

use std::path::Path;

use tracing::{debug, info};
use waybill_model::SourceTable;

pub use csv::{read_csv_bytes, read_csv_path};
pub use error::{IngestError, Result};
pub use headers::{normalize_header, unique_headers};
pub use options::{DEFAULT_NA_VALUES, IngestOptions};
pub use polars_utils::{any_to_cell, dataframe_to_table};
pub use workbook::{data_to_cell, read_workbook_bytes, read_workbook_path};

/// File formats the splitter can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Spreadsheet workbooks: `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`.
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(Self::Workbook),
            Some("csv") => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a source file, choosing the reader from its extension.
pub fn read_source(path: &Path, options: &IngestOptions) -> Result<SourceTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = SourceFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "reading source");
    let table = match format {
        SourceFormat::Workbook => read_workbook_path(path, options)?,
        SourceFormat::Csv => read_csv_path(path, options)?,
    };
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.columns().len(),
        "source loaded"
    );
    Ok(table)
}

/// Read a source held in memory, such as an upload. `file_name` only selects
/// the reader.
pub fn read_source_bytes(
    file_name: &str,
    bytes: Vec<u8>,
    options: &IngestOptions,
) -> Result<SourceTable> {
    let format = SourceFormat::from_path(Path::new(file_name))?;
    let table = match format {
        SourceFormat::Workbook => read_workbook_bytes(bytes, options)?,
        SourceFormat::Csv => read_csv_bytes(bytes, options)?,
    };
    info!(
        file_name,
        rows = table.height(),
        columns = table.columns().len(),
        "source loaded from memory"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(
            SourceFormat::from_path(Path::new("运单.XLSX")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a/b/c.ods")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("export.csv")).unwrap(),
            SourceFormat::Csv
        );
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        for name in ["notes.txt", "archive.zip", "no_extension"] {
            let err = SourceFormat::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
        }
    }

    #[test]
    fn missing_file_is_reported_before_format() {
        let err = read_source(Path::new("/definitely/not/here.xlsx"), &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn in_memory_sources_dispatch_on_name() {
        let table = read_source_bytes(
            "upload.csv",
            "区域,里程\n华东,12\n".as_bytes().to_vec(),
            &IngestOptions::default(),
        )
        .unwrap();
        assert_eq!(table.height(), 1);
        let err = read_source_bytes("upload.pdf", Vec::new(), &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }
}
