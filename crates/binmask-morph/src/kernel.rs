//! Structuring kernels
//!
//! A kernel is an ordinary [`Mask`] with odd width and height. Its centre
//! element sits at 1-based `(hx + 1, hy + 1)` where `hx = (width - 1) / 2`
//! and `hy = (height - 1) / 2`; kernel element `(i, j)` looks at the source
//! element offset by `(i - 1 - hx, j - 1 - hy)` from the output position.
//!
//! # Padding
//!
//! The filter sweeps compare whole words of source and kernel. Each kernel
//! row is therefore stored in [`PaddedKernel`] widened to a multiple of
//! [`WORD_BYTES`] with OFF padding. Padding elements can never match, so
//! whatever the sweep reads under them (the next source row, or bytes past
//! the end of the buffer which [`word::load`] reads as OFF) does not affect
//! the result.

use crate::{MorphError, MorphResult};
use binmask_core::Mask;
use binmask_core::binary::{OFF, ON};
use binmask_core::word::{self, WORD_BYTES};

/// Kernel rows widened to whole words
#[derive(Debug, Clone)]
pub struct PaddedKernel {
    /// Half-width
    pub hx: usize,
    /// Half-height
    pub hy: usize,
    /// Words per padded row
    pub words_per_row: usize,
    /// `(2 * hy + 1) * words_per_row` words, bottom row first
    pub words: Vec<u64>,
}

impl PaddedKernel {
    /// Validate a kernel and pad its rows.
    ///
    /// # Errors
    ///
    /// - [`MorphError::InvalidKernel`] if a dimension is even
    /// - [`MorphError::EmptyKernel`] if no element is ON
    pub fn new(kernel: &Mask) -> MorphResult<Self> {
        let (kw, kh) = kernel.size();
        if kw % 2 == 0 || kh % 2 == 0 {
            return Err(MorphError::InvalidKernel(format!(
                "kernel dimensions must be odd, got {}x{}",
                kw, kh
            )));
        }
        if kernel.is_empty() {
            return Err(MorphError::EmptyKernel);
        }

        let words_per_row = kw.div_ceil(WORD_BYTES);
        let mut padded_row = vec![OFF; words_per_row * WORD_BYTES];
        let mut words = Vec::with_capacity(kh * words_per_row);
        for j in 0..kh {
            padded_row[..kw].copy_from_slice(kernel.row(j));
            words.extend(padded_row.chunks_exact(WORD_BYTES).map(word::word));
        }

        log::trace!(
            "padded {}x{} kernel to {} word(s) per row",
            kw,
            kh,
            words_per_row
        );

        Ok(PaddedKernel {
            hx: (kw - 1) / 2,
            hy: (kh - 1) / 2,
            words_per_row,
            words,
        })
    }

    /// Padded row `j` (0-based, bottom first).
    #[inline]
    pub fn row(&self, j: usize) -> &[u64] {
        &self.words[j * self.words_per_row..(j + 1) * self.words_per_row]
    }

    /// Number of kernel rows.
    #[inline]
    pub fn rows(&self) -> usize {
        2 * self.hy + 1
    }

    /// Check that the half-extents fit a `width x height` mask.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::KernelTooLarge`] otherwise.
    pub fn check_fits(&self, width: usize, height: usize) -> MorphResult<()> {
        if self.hx > width || self.hy > height {
            return Err(MorphError::KernelTooLarge {
                hx: self.hx,
                hy: self.hy,
                width,
                height,
            });
        }
        Ok(())
    }
}

/// Create a solid rectangular kernel.
///
/// # Errors
///
/// Returns [`MorphError::Core`] if a dimension is 0.
pub fn brick(width: usize, height: usize) -> MorphResult<Mask> {
    let mut kernel = Mask::new(width, height)?;
    kernel.fill(ON)?;
    Ok(kernel)
}

/// Create a `(2 * half + 1)` square kernel with only the centre row and
/// column ON.
pub fn cross(half: usize) -> MorphResult<Mask> {
    let size = 2 * half + 1;
    Ok(Mask::from_fn(size, size, |x, y| {
        x == half + 1 || y == half + 1
    })?)
}

/// Create a diamond kernel: elements within city-block distance `radius`
/// of the centre.
pub fn diamond(radius: usize) -> MorphResult<Mask> {
    let size = 2 * radius + 1;
    let c = radius + 1;
    Ok(Mask::from_fn(size, size, |x, y| {
        x.abs_diff(c) + y.abs_diff(c) <= radius
    })?)
}

/// Create a disk kernel: elements within Euclidean distance `radius` of
/// the centre.
pub fn disk(radius: usize) -> MorphResult<Mask> {
    let size = 2 * radius + 1;
    let c = radius + 1;
    Ok(Mask::from_fn(size, size, |x, y| {
        let (dx, dy) = (x.abs_diff(c), y.abs_diff(c));
        dx * dx + dy * dy <= radius * radius
    })?)
}

/// Create a kernel from a text picture.
///
/// Each line is one row, written top row first as it appears on screen;
/// `x` marks ON and `.` or `o` marks OFF. Surrounding whitespace and
/// blank lines are ignored.
///
/// ```
/// use binmask_morph::kernel::from_pattern;
///
/// let k = from_pattern(
///     ".x.
///      xxx
///      .x.",
/// )
/// .unwrap();
/// assert_eq!(k.count(), 5);
/// ```
///
/// # Errors
///
/// Returns [`MorphError::InvalidKernel`] for an empty picture, rows of
/// differing length or any other character.
pub fn from_pattern(pattern: &str) -> MorphResult<Mask> {
    let lines: Vec<&str> = pattern
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let Some(first) = lines.first() else {
        return Err(MorphError::InvalidKernel("empty pattern".into()));
    };
    let width = first.chars().count();
    let height = lines.len();

    let mut kernel = Mask::new(width, height)?;
    for (i, line) in lines.iter().enumerate() {
        if line.chars().count() != width {
            return Err(MorphError::InvalidKernel(format!(
                "pattern row {} has length {}, expected {}",
                i + 1,
                line.chars().count(),
                width
            )));
        }
        // First line is the top row
        let y0 = height - 1 - i;
        for (x0, ch) in line.chars().enumerate() {
            let value = match ch {
                'x' | 'X' => ON,
                '.' | 'o' | 'O' => OFF,
                other => {
                    return Err(MorphError::InvalidKernel(format!(
                        "unexpected character {:?} in pattern",
                        other
                    )));
                }
            };
            kernel.set(x0 + 1, y0 + 1, value)?;
        }
    }
    Ok(kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use binmask_core::ErrorKind;

    #[test]
    fn test_padded_kernel_layout() {
        let k = brick(3, 5).unwrap();
        let p = PaddedKernel::new(&k).unwrap();
        assert_eq!((p.hx, p.hy), (1, 2));
        assert_eq!(p.words_per_row, 1);
        assert_eq!(p.rows(), 5);
        // Three ON bytes then OFF padding
        for j in 0..5 {
            assert_eq!(p.row(j)[0].to_ne_bytes(), [1, 1, 1, 0, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_padded_kernel_wide() {
        let k = brick(9, 1).unwrap();
        let p = PaddedKernel::new(&k).unwrap();
        assert_eq!(p.words_per_row, 2);
        assert_eq!(p.row(0)[0], word::ONES);
        assert_eq!(p.row(0)[1].to_ne_bytes(), [1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_padded_kernel_errors() {
        let even = brick(2, 3).unwrap();
        assert_eq!(
            PaddedKernel::new(&even).unwrap_err().kind(),
            ErrorKind::IllegalInput
        );
        let empty = Mask::new(3, 3).unwrap();
        assert_eq!(
            PaddedKernel::new(&empty).unwrap_err().kind(),
            ErrorKind::DataNotFound
        );
        let p = PaddedKernel::new(&brick(7, 7).unwrap()).unwrap();
        assert!(p.check_fits(3, 3).is_ok());
        assert_eq!(
            p.check_fits(2, 3).unwrap_err().kind(),
            ErrorKind::AccessOutOfRange
        );
    }

    #[test]
    fn test_shapes() {
        let c = cross(2).unwrap();
        assert_eq!(c.size(), (5, 5));
        assert_eq!(c.count(), 9);
        assert!(c.is_on(3, 1));
        assert!(!c.is_on(2, 2));

        let d = diamond(2).unwrap();
        assert_eq!(d.count(), 13);
        assert!(!d.is_on(1, 1));
        assert!(d.is_on(2, 2));

        let k = disk(2).unwrap();
        assert_eq!(k.count(), 13);
        let k = disk(3).unwrap();
        // 3-4-5 rim: (0, 3) inside, (2, 3) outside
        assert!(k.is_on(4, 7));
        assert!(!k.is_on(6, 7));

        assert_eq!(brick(3, 1).unwrap().count(), 3);
        assert!(brick(0, 1).is_err());
    }

    #[test]
    fn test_from_pattern_orientation() {
        let k = from_pattern("xx.\n...\n..x").unwrap();
        assert_eq!(k.size(), (3, 3));
        // Top line is row 3
        assert!(k.is_on(1, 3));
        assert!(k.is_on(2, 3));
        assert!(k.is_on(3, 1));
        assert_eq!(k.count(), 3);
    }

    #[test]
    fn test_from_pattern_errors() {
        assert!(matches!(
            from_pattern("  \n"),
            Err(MorphError::InvalidKernel(_))
        ));
        assert!(matches!(
            from_pattern("xx\nx"),
            Err(MorphError::InvalidKernel(_))
        ));
        assert!(matches!(
            from_pattern("x?x"),
            Err(MorphError::InvalidKernel(_))
        ));
    }
}
