//! Operator-facing status lines, in the order a run produces them.

use waybill_model::StatusSink;

pub const SEPARATOR: &str = "----------------------------------------";

pub fn preparing(file_name: &str) -> String {
    format!("准备处理文件: {file_name}")
}

pub fn source_loaded(rows: usize) -> String {
    format!("成功读取源文件，共包含 {rows} 条数据。")
}

pub const MAPPING_STARTED: &str = "开始进行数据结构转换...";
pub const MAPPING_FINISHED: &str = "数据结构转换完成！";

pub fn groups_found(group_column: &str, groups: usize) -> String {
    format!("在“{group_column}”列中发现 {groups} 个独立的项目，准备开始拆分...")
}

pub fn rows_skipped(group_column: &str, skipped: usize) -> String {
    format!("有 {skipped} 条数据的“{group_column}”为空，未归入任何文件。")
}

pub const ALL_DONE: &str = "所有表格拆分完成！";

pub fn failure(error: &anyhow::Error) -> String {
    format!("错误详情: {error:#}")
}

/// Append the failure line for `error` and hand the error back.
pub fn report_failure(sink: &mut dyn StatusSink, error: anyhow::Error) -> anyhow::Error {
    sink.append(&failure(&error));
    error
}
