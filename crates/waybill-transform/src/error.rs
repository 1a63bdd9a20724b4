use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Source and mapped datasets must be co-indexed.
    #[error("source has {source_rows} rows but the mapped dataset has {mapped_rows}")]
    LengthMismatch {
        source_rows: usize,
        mapped_rows: usize,
    },
}
