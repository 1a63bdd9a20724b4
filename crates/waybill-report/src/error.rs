use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write workbook for {entry}: {source}")]
    Workbook {
        entry: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("{rows} rows do not fit in one worksheet")]
    TooManyRows { rows: usize },
    #[error("failed to add {entry} to the archive: {source}")]
    Archive {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("failed to finish the archive: {0}")]
    Finish(#[source] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
