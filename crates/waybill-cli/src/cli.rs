//! CLI argument definitions for the waybill splitter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use waybill_model::DEFAULT_GROUP_COLUMN;

#[derive(Parser)]
#[command(
    name = "waybill",
    version,
    about = "Waybill splitter - remap a waybill export and split it by region",
    long_about = "Remap a waybill export onto the fixed 29-column upload template and\n\
                  split it into one workbook per value of a grouping column.\n\n\
                  Reads .xlsx, .xlsm, .xlsb, .xls, .ods and .csv sources and writes a\n\
                  single zip archive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (names, phone numbers, plates) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Remap a waybill export and write one workbook per group into a zip.
    Split(SplitArgs),

    /// List the target columns and the rules that fill them.
    Columns,
}

#[derive(Parser)]
pub struct SplitArgs {
    /// Source workbook or CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column whose values decide the output files.
    #[arg(long = "group-column", value_name = "NAME", default_value = DEFAULT_GROUP_COLUMN)]
    pub group_column: String,

    /// Sheet to read (default: the first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Directory for the archive (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Explicit archive path; overrides --output-dir and the derived name.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Build the archive in memory and report, without writing it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Additional text treated as a missing value (repeatable).
    #[arg(long = "na-value", value_name = "VALUE")]
    pub na_values: Vec<String>,

    /// Keep empty strings and markers like "NA" as text instead of missing.
    #[arg(long = "keep-empty-strings")]
    pub keep_empty_strings: bool,

    /// Print the run summary as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
