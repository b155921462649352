//! Error types for binmask-morph

use binmask_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] binmask_core::Error),

    /// Kernel dimensions are not both odd, or a pattern is malformed
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Kernel has no ON element
    #[error("kernel has no ON element")]
    EmptyKernel,

    /// Kernel half-extent exceeds the filtered mask
    #[error("kernel half-extents ({hx}, {hy}) exceed the {width}x{height} mask")]
    KernelTooLarge {
        hx: usize,
        hy: usize,
        width: usize,
        height: usize,
    },

    /// Mode or aliasing combination not implemented
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),
}

impl MorphError {
    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MorphError::Core(e) => e.kind(),
            MorphError::InvalidKernel(_) => ErrorKind::IllegalInput,
            MorphError::EmptyKernel => ErrorKind::DataNotFound,
            MorphError::KernelTooLarge { .. } => ErrorKind::AccessOutOfRange,
            MorphError::UnsupportedMode(_) => ErrorKind::UnsupportedMode,
        }
    }
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
