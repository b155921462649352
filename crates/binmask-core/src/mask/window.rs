//! Rectangular windows of a mask
//!
//! All windows are inclusive and 1-based: `[llx, urx] x [lly, ury]`
//! with `(llx, lly)` the lower-left and `(urx, ury)` the upper-right
//! corner.

use super::{Mask, check_value};
use crate::binary::OFF;
use crate::error::{Error, Result};
use crate::word;
use std::io::Write;

/// Inclusive 1-based rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    /// Lower-left x
    pub llx: usize,
    /// Lower-left y
    pub lly: usize,
    /// Upper-right x
    pub urx: usize,
    /// Upper-right y
    pub ury: usize,
}

impl Window {
    /// Create a window from its corners.
    pub fn new(llx: usize, lly: usize, urx: usize, ury: usize) -> Self {
        Window { llx, lly, urx, ury }
    }

    /// Window covering a whole `width x height` mask.
    pub fn full(width: usize, height: usize) -> Self {
        Window::new(1, 1, width, height)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.urx + 1 - self.llx
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.ury + 1 - self.lly
    }

    /// Number of elements covered.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Whether the 1-based position `(x, y)` lies inside.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.llx && x <= self.urx && y >= self.lly && y <= self.ury
    }

    /// Grow the window to include `(x, y)`.
    pub fn expand_to(&mut self, x: usize, y: usize) {
        self.llx = self.llx.min(x);
        self.lly = self.lly.min(y);
        self.urx = self.urx.max(x);
        self.ury = self.ury.max(y);
    }
}

impl Mask {
    /// Validate a window against the mask bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalWindow`] if the window is inverted or
    /// reaches outside the mask.
    pub fn check_window(&self, llx: usize, lly: usize, urx: usize, ury: usize) -> Result<()> {
        if llx < 1 || lly < 1 || llx > urx || lly > ury || urx > self.width || ury > self.height
        {
            return Err(Error::IllegalWindow {
                llx,
                lly,
                urx,
                ury,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Byte range of the part of 0-based row `y0` inside `[llx, urx]`.
    #[inline]
    fn window_row(&self, y0: usize, llx: usize, urx: usize) -> std::ops::Range<usize> {
        let start = y0 * self.width + llx - 1;
        start..start + (urx + 1 - llx)
    }

    /// Count the ON elements inside a window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalWindow`] for an inverted or out-of-bounds
    /// window.
    pub fn count_window(&self, llx: usize, lly: usize, urx: usize, ury: usize) -> Result<usize> {
        self.check_window(llx, lly, urx, ury)?;
        Ok(self.count_window_unchecked(llx, lly, urx, ury))
    }

    pub(crate) fn count_window_unchecked(
        &self,
        llx: usize,
        lly: usize,
        urx: usize,
        ury: usize,
    ) -> usize {
        if llx == 1 && urx == self.width {
            // Full rows are contiguous: count them as one run
            let start = (lly - 1) * self.width;
            let end = ury * self.width;
            return word::count_on(&self.data[start..end]);
        }
        (lly - 1..ury)
            .map(|y0| word::count_on(&self.data[self.window_row(y0, llx, urx)]))
            .sum()
    }

    /// Count the ON elements of the whole mask.
    pub fn count(&self) -> usize {
        word::count_on(&self.data)
    }

    /// Whether the mask has no ON element.
    ///
    /// Stops at the first ON element instead of counting.
    pub fn is_empty(&self) -> bool {
        word::find_on(&self.data).is_none()
    }

    /// Whether a window has no ON element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalWindow`] for an inverted or out-of-bounds
    /// window.
    pub fn is_empty_window(&self, llx: usize, lly: usize, urx: usize, ury: usize) -> Result<bool> {
        self.check_window(llx, lly, urx, ury)?;
        Ok((lly - 1..ury)
            .all(|y0| word::find_on(&self.data[self.window_row(y0, llx, urx)]).is_none()))
    }

    /// Position of the first ON element in row-major order, if any.
    pub fn first_on(&self) -> Option<(usize, usize)> {
        word::find_on(&self.data).map(|i| (i % self.width + 1, i / self.width + 1))
    }

    /// Set every element of a window to `value`.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalWindow`] for an inverted or out-of-bounds window
    /// - [`Error::IllegalValue`] if `value` is neither OFF nor ON
    pub fn fill_window(
        &mut self,
        llx: usize,
        lly: usize,
        urx: usize,
        ury: usize,
        value: u8,
    ) -> Result<()> {
        self.check_window(llx, lly, urx, ury)?;
        check_value(value)?;
        self.fill_window_unchecked(llx, lly, urx, ury, value);
        Ok(())
    }

    /// Fill a window that is known to be valid.
    pub(crate) fn fill_window_unchecked(
        &mut self,
        llx: usize,
        lly: usize,
        urx: usize,
        ury: usize,
        value: u8,
    ) {
        for y0 in lly - 1..ury {
            let range = self.window_row(y0, llx, urx);
            self.data[range].fill(value);
        }
    }

    /// Copy a window into a new mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalWindow`] for an inverted or out-of-bounds
    /// window.
    pub fn extract(&self, llx: usize, lly: usize, urx: usize, ury: usize) -> Result<Mask> {
        self.check_window(llx, lly, urx, ury)?;
        Ok(self.extract_unchecked(llx, lly, urx, ury))
    }

    pub(crate) fn extract_unchecked(&self, llx: usize, lly: usize, urx: usize, ury: usize) -> Mask {
        let w = urx + 1 - llx;
        let h = ury + 1 - lly;
        let mut data = Vec::with_capacity(w * h);
        for y0 in lly - 1..ury {
            data.extend_from_slice(&self.data[self.window_row(y0, llx, urx)]);
        }
        Mask {
            width: w,
            height: h,
            data,
        }
    }

    /// Write the elements of a window as `x y value` lines.
    ///
    /// # Errors
    ///
    /// - [`Error::IllegalWindow`] for an inverted or out-of-bounds window
    /// - [`Error::Io`] if writing fails
    pub fn dump_window(
        &self,
        out: &mut impl Write,
        llx: usize,
        lly: usize,
        urx: usize,
        ury: usize,
    ) -> Result<()> {
        self.check_window(llx, lly, urx, ury)?;
        writeln!(
            out,
            "#----- mask: {} <= x <= {}, {} <= y <= {} -----",
            llx, urx, lly, ury
        )?;
        writeln!(out, "\tX\tY\tvalue")?;
        for y in lly..=ury {
            for x in llx..=urx {
                let v = self.data[self.offset(x, y)];
                writeln!(out, "\t{}\t{}\t{}", x, y, u8::from(v != OFF))?;
            }
        }
        Ok(())
    }
}
