//! Waybill split pipeline.
//!
//! [`run_split`] takes a parsed source table through mapping, partitioning
//! and archive export, narrating each step to a [`StatusSink`].
//! [`split_file`] and [`split_upload`] add the read step in front.
//!
//! [`StatusSink`]: waybill_model::StatusSink

pub mod pipeline;
pub mod status;

pub use pipeline::{
    SplitOutcome, SplitRequest, archive_file_name, run_split, split_file, split_upload,
};
