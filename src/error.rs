use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading a benchmark table or preparing the report.
///
/// Higher layers wrap these in `anyhow` with file/row context.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("input is missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' holds '{value}', which is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("unknown variant '{0}' (expected 'sorted' or 'legacy')")]
    UnknownVariant(String),

    #[error("could not register font {}", .0.display())]
    Font(PathBuf),
}
