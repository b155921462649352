//! binmask core - Binary mask storage and bitwise algebra
//!
//! This crate provides the fundamental data structure shared by the
//! binmask crates:
//!
//! - [`Mask`] - Two-dimensional binary mask, one byte per element
//! - [`Window`] - Inclusive 1-based rectangle over a mask
//!
//! together with the word-parallel helpers ([`word`]) the filters in
//! `binmask-morph` are built on.
//!
//! # Coordinates
//!
//! Public coordinates are 1-based with `(1, 1)` the bottom-left element.
//! Internal helpers that take a `y0` use 0-based row indices.

pub mod error;
pub mod mask;
pub mod word;

pub use error::{Error, ErrorKind, Result};
pub use mask::serial::{BMSK_HEADER_SIZE, BMSK_MAGIC, BmskHeader};
pub use mask::{Mask, Window};

/// Element values of a binary mask.
pub mod binary {
    /// Background element
    pub const OFF: u8 = 0x00;
    /// Foreground element
    pub const ON: u8 = 0x01;

    /// Whether `value` is a legal element value.
    #[inline]
    pub fn is_binary(value: u8) -> bool {
        value == OFF || value == ON
    }
}
