//! Waybill record transformation.
//!
//! - **coerce**: explicit numeric and timestamp coercions that degrade to missing
//! - **rules**: the declarative source → target derivation table
//! - **mapper**: [`SchemaMapper`], one target record per source record
//! - **partition**: [`partition`], first-seen grouping of both datasets

pub mod coerce;
pub mod error;
pub mod mapper;
pub mod partition;
pub mod rules;

pub use coerce::{TIMESTAMP_FORMAT, coerce_datetime, coerce_numeric, format_timestamp, parse_f64};
pub use error::TransformError;
pub use mapper::{MappedTable, SchemaMapper};
pub use partition::{Group, Partition, partition};
pub use rules::{DEFAULT_RULES, MappingRule};
