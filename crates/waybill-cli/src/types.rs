use std::path::PathBuf;

use serde::Serialize;
use waybill_core::SplitOutcome;

/// What a `split` run produced, for the summary table or `--json`.
#[derive(Debug, Serialize)]
pub struct SplitResult {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub archive_path: Option<PathBuf>,
    pub archive_bytes: usize,
    pub group_column: String,
    pub source_rows: usize,
    pub skipped_rows: usize,
    pub exported_rows: usize,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub position: usize,
    pub key: String,
    pub file: String,
    pub source_rows: usize,
    pub target_rows: usize,
}

impl SplitResult {
    pub fn new(input: PathBuf, archive_path: Option<PathBuf>, outcome: &SplitOutcome) -> Self {
        Self {
            input,
            archive_path,
            archive_bytes: outcome.archive.len(),
            group_column: outcome.group_column.clone(),
            source_rows: outcome.source_rows,
            skipped_rows: outcome.skipped_rows,
            exported_rows: outcome.exported_rows(),
            groups: outcome
                .groups
                .iter()
                .map(|entry| GroupSummary {
                    position: entry.position,
                    key: entry.key.clone(),
                    file: entry.name.clone(),
                    source_rows: entry.source_rows,
                    target_rows: entry.target_rows,
                })
                .collect(),
        }
    }
}
