//! Mask - The binary mask container
//!
//! A `Mask` is a two-dimensional array of binary elements, each either
//! [`OFF`] or [`ON`].
//!
//! # Layout
//!
//! - One element per byte, `0x00` for OFF and `0x01` for ON
//! - Rows are stored contiguously, bottom row first
//! - Public accessors use 1-based coordinates with `(1, 1)` at the
//!   bottom-left corner
//!
//! # Ownership model
//!
//! A `Mask` always owns its buffer. [`Mask::wrap`] adopts a caller-supplied
//! `Vec<u8>` without copying and [`Mask::into_data`] hands the very same
//! allocation back, so buffers can move between a mask and foreign code
//! without a copy in either direction. `Clone` is a deep copy.

pub mod geometry;
pub mod logic;
pub mod serial;
pub mod window;

pub use window::Window;

use crate::binary::{OFF, ON, is_binary};
use crate::error::{Error, Result};
use std::ops::Range;

/// Binary mask
///
/// # Examples
///
/// ```
/// use binmask_core::{Mask, binary::ON};
///
/// let mut mask = Mask::new(4, 3).unwrap();
/// mask.set(2, 3, ON).unwrap();
/// assert_eq!(mask.get(2, 3).unwrap(), ON);
/// assert_eq!(mask.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    /// Width in elements
    width: usize,
    /// Height in elements
    height: usize,
    /// Row-major elements, `width * height` of them
    data: Vec<u8>,
}

impl Mask {
    /// Create a new mask with every element OFF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalSize`] if width or height is 0.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Mask {
            width,
            height,
            data: vec![OFF; len],
        })
    }

    /// Create a mask from a predicate on 1-based coordinates.
    ///
    /// Elements for which `f(x, y)` is true are ON.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self> {
        let mut mask = Self::new(width, height)?;
        for y in 1..=height {
            let row = mask.row_mut(y - 1);
            for (i, v) in row.iter_mut().enumerate() {
                if f(i + 1, y) {
                    *v = ON;
                }
            }
        }
        Ok(mask)
    }

    /// Adopt an existing buffer as the element storage of a mask.
    ///
    /// The buffer is not copied; [`Mask::into_data`] returns the same
    /// allocation.
    ///
    /// # Errors
    ///
    /// - [`Error::NullInput`] if `data` is empty
    /// - [`Error::IllegalSize`] if width or height is 0
    /// - [`Error::BufferSize`] if `data.len() != width * height`
    /// - [`Error::IllegalValue`] if an element is neither OFF nor ON
    pub fn wrap(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::NullInput("mask buffer"));
        }
        let len = Self::checked_len(width, height)?;
        if data.len() != len {
            return Err(Error::BufferSize {
                width,
                height,
                len: data.len(),
            });
        }
        if let Some(&bad) = data.iter().find(|&&v| !is_binary(v)) {
            return Err(Error::IllegalValue(bad));
        }
        Ok(Mask {
            width,
            height,
            data,
        })
    }

    /// Release the mask and return its element buffer.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn checked_len(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::IllegalSize { width, height });
        }
        width
            .checked_mul(height)
            .ok_or(Error::IllegalSize { width, height })
    }

    /// Get the mask width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the mask height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the raw element buffer, bottom row first.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the 0-based row `y0`.
    #[inline]
    pub fn row(&self, y0: usize) -> &[u8] {
        &self.data[y0 * self.width..(y0 + 1) * self.width]
    }

    /// Get the 0-based row `y0` for writing.
    #[inline]
    pub(crate) fn row_mut(&mut self, y0: usize) -> &mut [u8] {
        let w = self.width;
        &mut self.data[y0 * w..(y0 + 1) * w]
    }

    /// Buffer offset of the 1-based position `(x, y)`.
    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y - 1) * self.width + (x - 1)
    }

    fn check_coords(&self, x: usize, y: usize) -> Result<()> {
        if x < 1 || x > self.width || y < 1 || y > self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Get the element at 1-based `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside `[1, width] x [1, height]`.
    pub fn get(&self, x: usize, y: usize) -> Result<u8> {
        self.check_coords(x, y)?;
        Ok(self.data[self.offset(x, y)])
    }

    /// Set the element at 1-based `(x, y)`.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] outside `[1, width] x [1, height]`
    /// - [`Error::IllegalValue`] if `value` is neither OFF nor ON
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        self.check_coords(x, y)?;
        check_value(value)?;
        let at = self.offset(x, y);
        self.data[at] = value;
        Ok(())
    }

    /// Whether the element at 1-based `(x, y)` is ON.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the mask.
    #[inline]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.data[self.offset(x, y)] != OFF
    }

    /// Store ON or OFF at a raw buffer index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn put(&mut self, index: usize, on: bool) {
        self.data[index] = if on { ON } else { OFF };
    }

    /// Store ON or OFF over a raw buffer range.
    ///
    /// # Panics
    ///
    /// Panics if `span` reaches past the buffer.
    pub fn fill_span(&mut self, span: Range<usize>, on: bool) {
        self.data[span].fill(if on { ON } else { OFF });
    }

    /// Copy a raw buffer range from a mask of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    ///
    /// # Panics
    ///
    /// Panics if `span` reaches past the buffer.
    pub fn copy_span(&mut self, src: &Mask, span: Range<usize>) -> Result<()> {
        self.check_same_size(src)?;
        self.data[span.clone()].copy_from_slice(&src.data[span]);
        Ok(())
    }

    /// Set every element to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`] if `value` is neither OFF nor ON.
    pub fn fill(&mut self, value: u8) -> Result<()> {
        check_value(value)?;
        self.data.fill(value);
        Ok(())
    }

    /// Check that `other` has the same dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn check_same_size(&self, other: &Mask) -> Result<()> {
        if self.size() != other.size() {
            return Err(Error::DimensionMismatch {
                expected: self.size(),
                actual: other.size(),
            });
        }
        Ok(())
    }

    /// Replace dimensions and storage in one step.
    ///
    /// Used by the reshaping operations (turn, flip) that may swap width
    /// and height.
    pub(crate) fn replace(&mut self, width: usize, height: usize, data: Vec<u8>) {
        debug_assert_eq!(data.len(), width * height);
        self.width = width;
        self.height = height;
        self.data = data;
    }
}

/// Check that `value` is OFF or ON.
pub(crate) fn check_value(value: u8) -> Result<()> {
    if is_binary(value) {
        Ok(())
    } else {
        Err(Error::IllegalValue(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_is_all_off() {
        let mask = Mask::new(7, 3).unwrap();
        assert_eq!(mask.size(), (7, 3));
        assert_eq!(mask.len(), 21);
        assert!(mask.data().iter().all(|&v| v == OFF));
    }

    #[test]
    fn test_new_zero_size() {
        assert_eq!(Mask::new(0, 3).unwrap_err().kind(), ErrorKind::IllegalSize);
        assert_eq!(Mask::new(3, 0).unwrap_err().kind(), ErrorKind::IllegalSize);
    }

    #[test]
    fn test_wrap_into_data_returns_same_buffer() {
        let buf = vec![ON, OFF, OFF, ON, ON, ON];
        let ptr = buf.as_ptr();
        let mask = Mask::wrap(3, 2, buf).unwrap();
        assert_eq!(mask.get(1, 1).unwrap(), ON);
        assert_eq!(mask.get(1, 2).unwrap(), ON);
        assert_eq!(mask.get(2, 1).unwrap(), OFF);
        let back = mask.into_data();
        assert_eq!(back.as_ptr(), ptr);
        assert_eq!(back, vec![ON, OFF, OFF, ON, ON, ON]);
    }

    #[test]
    fn test_wrap_errors() {
        assert_eq!(
            Mask::wrap(2, 2, Vec::new()).unwrap_err().kind(),
            ErrorKind::NullInput
        );
        assert_eq!(
            Mask::wrap(0, 2, vec![OFF; 2]).unwrap_err().kind(),
            ErrorKind::IllegalSize
        );
        assert_eq!(
            Mask::wrap(2, 2, vec![OFF; 3]).unwrap_err().kind(),
            ErrorKind::IllegalSize
        );
        assert_eq!(
            Mask::wrap(2, 1, vec![OFF, 7]).unwrap_err().kind(),
            ErrorKind::IllegalInput
        );
    }

    #[test]
    fn test_get_set_one_based() {
        let mut mask = Mask::new(4, 3).unwrap();
        mask.set(4, 3, ON).unwrap();
        assert_eq!(mask.get(4, 3).unwrap(), ON);
        // Top-right corner is the last byte of the buffer
        assert_eq!(mask.data()[11], ON);
        mask.set(1, 1, ON).unwrap();
        assert_eq!(mask.data()[0], ON);
    }

    #[test]
    fn test_get_set_errors() {
        let mut mask = Mask::new(4, 3).unwrap();
        assert!(mask.get(0, 1).is_err());
        assert!(mask.get(5, 1).is_err());
        assert!(mask.get(1, 4).is_err());
        assert_eq!(mask.set(1, 1, 2).unwrap_err().kind(), ErrorKind::IllegalInput);
        assert_eq!(mask.set(0, 1, ON).unwrap_err().kind(), ErrorKind::IllegalInput);
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut mask = Mask::new(3, 3).unwrap();
        mask.set(2, 2, ON).unwrap();
        let mut copy = mask.clone();
        assert_eq!(copy, mask);
        copy.set(1, 1, ON).unwrap();
        assert_eq!(mask.get(1, 1).unwrap(), OFF);
        assert_ne!(copy, mask);
    }

    #[test]
    fn test_from_fn() {
        let mask = Mask::from_fn(3, 2, |x, y| x == y).unwrap();
        assert!(mask.is_on(1, 1));
        assert!(mask.is_on(2, 2));
        assert!(!mask.is_on(3, 1));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_fill() {
        let mut mask = Mask::new(5, 2).unwrap();
        mask.fill(ON).unwrap();
        assert_eq!(mask.count(), 10);
        assert!(mask.fill(3).is_err());
        assert_eq!(mask.count(), 10);
    }

    #[test]
    fn test_raw_writers_stay_binary() {
        let mut mask = Mask::new(16, 1).unwrap();
        mask.put(3, true);
        mask.fill_span(8..16, true);
        assert!(mask.data().iter().all(|&v| is_binary(v)));
        assert_eq!(mask.count(), 9);
        mask.not();
        assert_eq!(mask.count(), 7);
        mask.put(3, true);
        assert_eq!(mask.count(), 8);

        let src = Mask::from_fn(16, 1, |x, _| x % 2 == 0).unwrap();
        mask.copy_span(&src, 0..8).unwrap();
        assert_eq!(&mask.data()[..8], &src.data()[..8]);
        assert_eq!(mask.count(), 4);
        let small = Mask::new(8, 1).unwrap();
        assert_eq!(
            mask.copy_span(&small, 0..8).unwrap_err().kind(),
            ErrorKind::IncompatibleInput
        );
    }
}
