//! The split pipeline: read → map → partition → export.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};
use waybill_ingest::{IngestOptions, read_source, read_source_bytes};
use waybill_model::{DEFAULT_GROUP_COLUMN, SourceTable, StatusSink};
use waybill_report::{ArchiveExporter, EntrySummary};
use waybill_transform::{SchemaMapper, partition};

use crate::status;

/// What to split by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    pub group_column: String,
}

impl Default for SplitRequest {
    fn default() -> Self {
        Self {
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
        }
    }
}

impl SplitRequest {
    pub fn new(group_column: impl Into<String>) -> Self {
        Self {
            group_column: group_column.into(),
        }
    }
}

/// Result of a successful run. Nothing is written to disk by the pipeline.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Zip archive with one workbook per group.
    pub archive: Vec<u8>,
    /// Display name of the source, without extension.
    pub base_name: String,
    pub group_column: String,
    pub source_rows: usize,
    /// Records left out because their group value was missing.
    pub skipped_rows: usize,
    pub groups: Vec<EntrySummary>,
    pub status_lines: Vec<String>,
}

impl SplitOutcome {
    /// Suggested download name for the archive.
    pub fn archive_file_name(&self) -> String {
        archive_file_name(&self.base_name, &self.group_column)
    }

    pub fn exported_rows(&self) -> usize {
        self.groups.iter().map(|group| group.target_rows).sum()
    }
}

pub fn archive_file_name(base_name: &str, group_column: &str) -> String {
    format!("{base_name}_按{group_column}拆分.zip")
}

/// Forwards lines to the caller's sink and keeps a copy for the outcome.
struct Tee<'a> {
    inner: &'a mut dyn StatusSink,
    lines: Vec<String>,
}

impl StatusSink for Tee<'_> {
    fn append(&mut self, line: &str) {
        self.inner.append(line);
        self.lines.push(line.to_string());
    }
}

/// Split an already parsed table.
///
/// On failure an `错误详情` line is appended and no archive is produced.
pub fn run_split(
    table: &SourceTable,
    base_name: &str,
    request: &SplitRequest,
    sink: &mut dyn StatusSink,
) -> Result<SplitOutcome> {
    let mut tee = Tee {
        inner: sink,
        lines: Vec::new(),
    };
    match split_stages(table, base_name, request, &mut tee) {
        Ok(mut outcome) => {
            outcome.status_lines = tee.lines;
            Ok(outcome)
        }
        Err(error) => Err(status::report_failure(&mut tee, error)),
    }
}

fn split_stages(
    table: &SourceTable,
    base_name: &str,
    request: &SplitRequest,
    sink: &mut dyn StatusSink,
) -> Result<SplitOutcome> {
    let group_column = request.group_column.as_str();
    let run_span = info_span!("split", base_name, group_column);
    let _run_guard = run_span.enter();

    // =========================================================================
    // Stage 1: Map every record onto the target schema
    // =========================================================================
    sink.append(status::MAPPING_STARTED);
    let map_start = Instant::now();
    let mapper = SchemaMapper::new(group_column);
    let mapped = info_span!("map").in_scope(|| mapper.map(table));
    if mapped.row_count() != table.height() {
        bail!(
            "mapping produced {} records from {} source rows",
            mapped.row_count(),
            table.height()
        );
    }
    info!(
        rows = mapped.row_count(),
        duration_ms = map_start.elapsed().as_millis(),
        "mapping complete"
    );
    sink.append(status::MAPPING_FINISHED);
    sink.append(status::SEPARATOR);

    // =========================================================================
    // Stage 2: Partition by group value
    // =========================================================================
    let partition_start = Instant::now();
    let parts = info_span!("partition")
        .in_scope(|| partition(table, mapped.records(), group_column))
        .context("partition records")?;
    info!(
        groups = parts.len(),
        grouped_rows = parts.grouped(),
        duration_ms = partition_start.elapsed().as_millis(),
        "partition complete"
    );
    if parts.excluded() > 0 {
        warn!(
            skipped = parts.excluded(),
            "records with an empty group value are not exported"
        );
    }
    sink.append(&status::groups_found(group_column, parts.len()));
    if parts.excluded() > 0 {
        sink.append(&status::rows_skipped(group_column, parts.excluded()));
    }

    // =========================================================================
    // Stage 3: Export one workbook per group into the archive
    // =========================================================================
    let export_start = Instant::now();
    let report = info_span!("export")
        .in_scope(|| ArchiveExporter::new().export(&parts, &mut *sink))
        .context("build archive")?;
    if report.target_rows() != parts.grouped() || report.source_rows() != parts.grouped() {
        bail!(
            "archive holds {} rows ({} source rows) but {} records were grouped",
            report.target_rows(),
            report.source_rows(),
            parts.grouped()
        );
    }
    info!(
        entries = report.entries.len(),
        rows = report.target_rows(),
        bytes = report.bytes.len(),
        duration_ms = export_start.elapsed().as_millis(),
        "export complete"
    );
    sink.append(status::SEPARATOR);
    sink.append(status::ALL_DONE);

    Ok(SplitOutcome {
        archive: report.bytes,
        base_name: base_name.to_string(),
        group_column: group_column.to_string(),
        source_rows: table.height(),
        skipped_rows: parts.excluded(),
        groups: report.entries,
        status_lines: Vec::new(),
    })
}

fn base_name_of(file_name: &Path) -> String {
    file_name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a source file from disk and split it.
pub fn split_file(
    path: &Path,
    request: &SplitRequest,
    options: &IngestOptions,
    sink: &mut dyn StatusSink,
) -> Result<SplitOutcome> {
    let display = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    sink.append(&status::preparing(&display));
    let read_start = Instant::now();
    let table = match info_span!("ingest", path = %path.display())
        .in_scope(|| read_source(path, options))
        .with_context(|| format!("read {}", path.display()))
    {
        Ok(table) => table,
        Err(error) => return Err(status::report_failure(sink, error)),
    };
    info!(
        rows = table.height(),
        duration_ms = read_start.elapsed().as_millis(),
        "ingest complete"
    );
    sink.append(&status::source_loaded(table.height()));
    with_leading_lines(
        run_split(&table, &base_name_of(path), request, sink),
        vec![status::preparing(&display), status::source_loaded(table.height())],
    )
}

/// Split a source held in memory. `file_name` picks the reader and the base
/// name.
pub fn split_upload(
    file_name: &str,
    bytes: Vec<u8>,
    request: &SplitRequest,
    options: &IngestOptions,
    sink: &mut dyn StatusSink,
) -> Result<SplitOutcome> {
    sink.append(&status::preparing(file_name));
    let table = match info_span!("ingest", file_name)
        .in_scope(|| read_source_bytes(file_name, bytes, options))
        .with_context(|| format!("read {file_name}"))
    {
        Ok(table) => table,
        Err(error) => return Err(status::report_failure(sink, error)),
    };
    sink.append(&status::source_loaded(table.height()));
    with_leading_lines(
        run_split(&table, &base_name_of(Path::new(file_name)), request, sink),
        vec![status::preparing(file_name), status::source_loaded(table.height())],
    )
}

fn with_leading_lines(
    result: Result<SplitOutcome>,
    mut lines: Vec<String>,
) -> Result<SplitOutcome> {
    result.map(|mut outcome| {
        lines.append(&mut outcome.status_lines);
        outcome.status_lines = lines;
        outcome
    })
}
