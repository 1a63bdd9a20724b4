use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, trace};
use waybill_core::{SplitOutcome, SplitRequest, split_file};
use waybill_ingest::IngestOptions;
use waybill_model::{StatusSink, TargetColumn};
use waybill_transform::{DEFAULT_RULES, MappingRule};

use crate::cli::SplitArgs;
use crate::logging::redact_value;
use crate::summary::{apply_table_style, header_cell};
use crate::types::SplitResult;

/// Prints status lines to stdout as they arrive.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn append(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Prints status lines to stderr, leaving stdout to a machine-readable summary.
#[derive(Debug, Default)]
pub struct StderrSink;

impl StatusSink for StderrSink {
    fn append(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Status lines go to stderr when `--json` owns stdout.
pub fn status_sink(args: &SplitArgs) -> Box<dyn StatusSink> {
    if args.json {
        Box::new(StderrSink)
    } else {
        Box::new(StdoutSink)
    }
}

pub fn ingest_options(args: &SplitArgs) -> IngestOptions {
    args.na_values.iter().fold(
        IngestOptions::default()
            .with_sheet(args.sheet.clone())
            .with_keep_default_na(!args.keep_empty_strings),
        |options, value| options.with_na_value(value.as_str()),
    )
}

/// Where the archive goes: `--output`, else `<dir>/<base>_按<column>拆分.zip`
/// with `<dir>` from `--output-dir` or the input's directory.
pub fn archive_path(args: &SplitArgs, outcome: &SplitOutcome) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    let dir = args.output_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    dir.join(outcome.archive_file_name())
}

pub fn run_split(args: &SplitArgs, sink: &mut dyn StatusSink) -> Result<SplitResult> {
    let split_span = info_span!("split_command", input = %args.input.display());
    let _split_guard = split_span.enter();
    let options = ingest_options(args);
    let request = SplitRequest::new(args.group_column.as_str());

    let outcome = split_file(&args.input, &request, &options, sink)?;
    for group in &outcome.groups {
        trace!(
            position = group.position,
            key = redact_value(&group.key),
            rows = group.target_rows,
            "group exported"
        );
    }

    let archive_path = if args.dry_run {
        info!(bytes = outcome.archive.len(), "dry run; archive not written");
        None
    } else {
        let path = archive_path(args, &outcome);
        write_archive(&path, &outcome.archive)?;
        Some(path)
    };
    Ok(SplitResult::new(args.input.clone(), archive_path, &outcome))
}

fn write_archive(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_start = Instant::now();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        duration_ms = write_start.elapsed().as_millis(),
        "archive written"
    );
    Ok(())
}

/// One row per target column: position, header, rule and source columns.
pub fn column_rows() -> Vec<(usize, &'static str, &'static str, String)> {
    TargetColumn::ALL
        .iter()
        .map(|column| {
            let rule = DEFAULT_RULES
                .iter()
                .find(|rule| rule.targets().contains(column));
            (
                column.index() + 1,
                column.header(),
                rule.map_or("-", MappingRule::display_name),
                rule.map_or_else(|| "-".to_string(), ToString::to_string),
            )
        })
        .collect()
}

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Target column"),
        header_cell("Rule"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    for (position, header, rule, source) in column_rows() {
        table.add_row(vec![position.to_string(), header.to_string(), rule.to_string(), source]);
    }
    println!("{table}");
    Ok(())
}
