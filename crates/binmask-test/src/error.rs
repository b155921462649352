//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to serialize a mask
    #[error("failed to serialize mask '{path}': {message}")]
    MaskWrite { path: String, message: String },

    /// Mask construction failed
    #[error("mask error: {0}")]
    Core(#[from] binmask_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
