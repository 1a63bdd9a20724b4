//! CLI library components for the waybill splitter.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
