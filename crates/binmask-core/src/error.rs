//! Error types for binmask-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every variant maps onto one [`ErrorKind`], the small taxonomy shared by
//! all binmask crates, so callers can branch on the failure class without
//! matching on crate-specific variants.

use thiserror::Error;

/// Failure class shared by every binmask error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A requested width or height is zero, or a buffer length does not
    /// match the requested dimensions
    IllegalSize,
    /// A required buffer was absent or empty
    NullInput,
    /// An argument is outside its valid domain
    IllegalInput,
    /// Two arguments that must agree in shape do not
    IncompatibleInput,
    /// A kernel or window exceeds the addressable mask area
    AccessOutOfRange,
    /// An operation found no qualifying element
    DataNotFound,
    /// The requested mode or argument combination is not implemented
    UnsupportedMode,
    /// Reading or writing a stream failed
    Io,
}

/// binmask-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid mask dimensions
    #[error("invalid mask dimensions: {width}x{height}")]
    IllegalSize { width: usize, height: usize },

    /// Buffer length does not match the requested dimensions
    #[error("buffer of {len} elements cannot hold a {width}x{height} mask")]
    BufferSize {
        width: usize,
        height: usize,
        len: usize,
    },

    /// Null or empty input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),

    /// Coordinate outside the mask
    #[error("coordinate ({x}, {y}) outside 1..={width} x 1..={height}")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Window outside the mask or inverted
    #[error("illegal window [{llx}, {lly}] - [{urx}, {ury}] for a {width}x{height} mask")]
    IllegalWindow {
        llx: usize,
        lly: usize,
        urx: usize,
        ury: usize,
        width: usize,
        height: usize,
    },

    /// Element value other than OFF or ON
    #[error("illegal element value: {0}")]
    IllegalValue(u8),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Mask dimension mismatch
    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        .expected.0, .expected.1, .actual.0, .actual.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Serialized data is malformed
    #[error("decode error: {0}")]
    DecodeError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IllegalSize { .. } | Error::BufferSize { .. } => ErrorKind::IllegalSize,
            Error::NullInput(_) => ErrorKind::NullInput,
            Error::OutOfBounds { .. }
            | Error::IllegalWindow { .. }
            | Error::IllegalValue(_)
            | Error::InvalidParameter(_)
            | Error::DecodeError(_) => ErrorKind::IllegalInput,
            Error::DimensionMismatch { .. } => ErrorKind::IncompatibleInput,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for binmask operations
pub type Result<T> = std::result::Result<T, Error>;
