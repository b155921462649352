//! Error types for binmask-region

use binmask_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] binmask_core::Error),

    /// Label outside `1..=count`
    #[error("invalid label {label}: grid has {count} components")]
    InvalidLabel { label: u32, count: usize },

    /// More components than a label can number
    #[error("component count exceeds the label range")]
    LabelOverflow,
}

impl RegionError {
    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegionError::Core(e) => e.kind(),
            RegionError::InvalidLabel { .. } => ErrorKind::IllegalInput,
            RegionError::LabelOverflow => ErrorKind::AccessOutOfRange,
        }
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
