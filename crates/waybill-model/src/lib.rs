//! Data model for the waybill splitter.
//!
//! - **value**: [`CellValue`], the scalar held by every source and target cell
//! - **table**: [`SourceTable`] and the borrowed [`SourceRecord`] view
//! - **schema**: the fixed 29-column target schema and [`TargetRecord`]
//! - **columns**: source column names the mapping rules read
//! - **serial**: Excel serial date conversions shared by readers and writers
//! - **status**: the [`StatusSink`] seam for operator-facing progress lines

pub mod columns;
pub mod error;
pub mod schema;
pub mod serial;
pub mod status;
pub mod table;
pub mod value;

pub use columns::DEFAULT_GROUP_COLUMN;
pub use error::{ModelError, Result};
pub use schema::{TARGET_COLUMN_COUNT, TARGET_COLUMNS, TargetColumn, TargetRecord};
pub use status::StatusSink;
pub use table::{SourceRecord, SourceTable};
pub use value::{CellValue, format_numeric};
