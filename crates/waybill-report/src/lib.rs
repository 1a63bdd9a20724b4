//! Waybill report generation.
//!
//! - **filename**: file-safe archive entry names, unique within one archive
//! - **xlsx**: one workbook per group, target schema columns only
//! - **archive**: [`ArchiveExporter`], the deflated zip of all group workbooks

mod archive;
mod error;
mod filename;
mod xlsx;

pub use archive::{ArchiveExporter, ArchiveReport, EntrySummary, entry_status_line};
pub use error::{ExportError, Result};
pub use filename::{EntryNamer, UNNAMED_PREFIX, sanitize_file_stem};
pub use xlsx::{TIMESTAMP_NUM_FORMAT, write_group_workbook};
