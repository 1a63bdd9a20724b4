//! Zip archive of per-group workbooks.

use std::io::{Cursor, Write};

use tracing::{debug, info};
use waybill_model::StatusSink;
use waybill_transform::Partition;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::filename::EntryNamer;
use crate::xlsx::write_group_workbook;
use crate::{ExportError, Result};

/// What was written for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    /// 1-based position in the archive.
    pub position: usize,
    pub name: String,
    /// The group value as text.
    pub key: String,
    pub source_rows: usize,
    pub target_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    pub bytes: Vec<u8>,
    pub entries: Vec<EntrySummary>,
}

impl ArchiveReport {
    pub fn source_rows(&self) -> usize {
        self.entries.iter().map(|entry| entry.source_rows).sum()
    }

    pub fn target_rows(&self) -> usize {
        self.entries.iter().map(|entry| entry.target_rows).sum()
    }
}

/// Progress line for one finished entry.
pub fn entry_status_line(entry: &EntrySummary, total: usize) -> String {
    format!(
        "({}/{}) 已生成文件: {} (源表行数: {}, 新表行数: {})",
        entry.position, total, entry.name, entry.source_rows, entry.target_rows
    )
}

/// Writes one workbook per group into an in-memory zip archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveExporter {
    compression: CompressionMethod,
}

impl Default for ArchiveExporter {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ArchiveExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export every group in partition order. Nothing is returned unless all
    /// entries were written.
    pub fn export(
        &self,
        partition: &Partition<'_>,
        sink: &mut dyn StatusSink,
    ) -> Result<ArchiveReport> {
        let total = partition.len();
        let options = FileOptions::<()>::default().compression_method(self.compression);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut namer = EntryNamer::new();
        let mut entries = Vec::with_capacity(total);

        for (idx, group) in partition.groups().iter().enumerate() {
            let position = idx + 1;
            let key = group.key().to_string();
            let name = namer.entry_name(&key, position);
            let bytes = write_group_workbook(&name, group.target_records())?;

            zip.start_file(name.as_str(), options)
                .map_err(|source| ExportError::Archive {
                    entry: name.clone(),
                    source,
                })?;
            zip.write_all(&bytes)?;

            let entry = EntrySummary {
                position,
                name,
                key,
                source_rows: group.source_len(),
                target_rows: group.target_len(),
            };
            debug!(
                entry = %entry.name,
                rows = entry.target_rows,
                bytes = bytes.len(),
                "archive entry written"
            );
            sink.append(&entry_status_line(&entry, total));
            entries.push(entry);
        }

        let bytes = zip.finish().map_err(ExportError::Finish)?.into_inner();
        info!(entries = entries.len(), bytes = bytes.len(), "archive assembled");
        Ok(ArchiveReport { bytes, entries })
    }
}
