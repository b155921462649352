//! Geometric rearrangement of mask elements
//!
//! Shifting, pasting, quarter-turn rotation, mirroring, tile permutation,
//! subsampling and collapsing. The orientation of every operation follows
//! the y-up convention of the 1-based accessors: row 1 is the bottom row.

use super::Mask;
use crate::binary::{OFF, ON};
use crate::error::{Error, Result};
use crate::word;

impl Mask {
    /// Shift the contents by `(dx, dy)` in place.
    ///
    /// Positive `dx` moves elements towards larger x, positive `dy`
    /// towards larger y. Elements shifted out are lost and the vacated
    /// zone is set to ON, marking it as unknown rather than background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `|dx| >= width` or
    /// `|dy| >= height`.
    pub fn shift(&mut self, dx: isize, dy: isize) -> Result<()> {
        if dx.unsigned_abs() >= self.width || dy.unsigned_abs() >= self.height {
            return Err(Error::InvalidParameter(format!(
                "shift ({}, {}) too large for a {}x{} mask",
                dx, dy, self.width, self.height
            )));
        }
        if dx == 0 && dy == 0 {
            return Ok(());
        }

        let w = self.width as isize;
        let h = self.height as isize;
        let mut out = vec![ON; self.data.len()];

        // Destination columns that receive a source element
        let dst_lo = dx.max(0) as usize;
        let dst_hi = (w + dx).min(w) as usize;
        let src_lo = (dst_lo as isize - dx) as usize;
        let run = dst_hi - dst_lo;

        for y0 in 0..h {
            let sy = y0 - dy;
            if sy < 0 || sy >= h {
                continue;
            }
            let d = y0 as usize * self.width + dst_lo;
            let s = sy as usize * self.width + src_lo;
            out[d..d + run].copy_from_slice(&self.data[s..s + run]);
        }

        self.data = out;
        Ok(())
    }

    /// Paste `src` into this mask with its lower-left corner at 1-based
    /// `(x_pos, y_pos)`.
    ///
    /// Parts of `src` reaching beyond this mask are clipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x_pos, y_pos)` lies outside
    /// this mask.
    pub fn copy_from(&mut self, src: &Mask, x_pos: usize, y_pos: usize) -> Result<()> {
        self.check_coords(x_pos, y_pos)?;

        let cols = src.width.min(self.width - x_pos + 1);
        let rows = src.height.min(self.height - y_pos + 1);

        if cols == self.width && cols == src.width {
            // Whole rows: one contiguous copy
            let d = (y_pos - 1) * self.width;
            self.data[d..d + rows * cols].copy_from_slice(&src.data[..rows * cols]);
            return Ok(());
        }

        for j in 0..rows {
            let d = (y_pos - 1 + j) * self.width + x_pos - 1;
            let s = j * src.width;
            self.data[d..d + cols].copy_from_slice(&src.data[s..s + cols]);
        }
        Ok(())
    }

    /// Rotate in place by `rot` quarter turns clockwise.
    ///
    /// Any integer is accepted; only `rot mod 4` matters and a negative
    /// value turns counter-clockwise. Odd turns swap width and height.
    pub fn turn(&mut self, rot: i32) {
        let (w, h) = (self.width, self.height);
        match rot.rem_euclid(4) {
            0 => {}
            2 => self.data.reverse(),
            quarter => {
                let mut out = vec![OFF; self.data.len()];
                for y in 0..h {
                    let row = &self.data[y * w..(y + 1) * w];
                    for (x, &v) in row.iter().enumerate() {
                        // The turned mask is h wide and w high
                        let (nx, ny) = if quarter == 1 {
                            (y, w - 1 - x)
                        } else {
                            (h - 1 - y, x)
                        };
                        out[ny * h + nx] = v;
                    }
                }
                self.replace(h, w, out);
            }
        }
    }

    /// Mirror in place around one of four axes through the centre.
    ///
    /// The axis has polar angle `angle * 45` degrees:
    ///
    /// - `0`: horizontal axis, rows are swapped top to bottom
    /// - `1`: diagonal `y = x`, a transpose
    /// - `2`: vertical axis, columns are swapped left to right
    /// - `3`: anti-diagonal `y = -x`
    ///
    /// Angles 1 and 3 swap width and height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for any other angle.
    pub fn flip(&mut self, angle: i32) -> Result<()> {
        let (w, h) = (self.width, self.height);
        match angle {
            0 => {
                for y0 in 0..h / 2 {
                    let (lower, upper) = self.data.split_at_mut((h - 1 - y0) * w);
                    lower[y0 * w..(y0 + 1) * w].swap_with_slice(&mut upper[..w]);
                }
            }
            2 => {
                for row in self.data.chunks_exact_mut(w) {
                    row.reverse();
                }
            }
            1 | 3 => {
                let mut out = vec![OFF; self.data.len()];
                for y in 0..h {
                    for x in 0..w {
                        let (nx, ny) = if angle == 1 {
                            (y, x)
                        } else {
                            (h - 1 - y, w - 1 - x)
                        };
                        out[ny * h + nx] = self.data[y * w + x];
                    }
                }
                self.replace(h, w, out);
            }
            _ => {
                return Err(Error::InvalidParameter(format!(
                    "flip angle must be 0, 1, 2 or 3, got {}",
                    angle
                )));
            }
        }
        Ok(())
    }

    /// Permute equal tiles of the mask.
    ///
    /// The mask is cut into `nb_cut x nb_cut` tiles, numbered from 1 in
    /// row-major order starting at the bottom-left tile. Tile `k` is moved
    /// to position `new_positions[k - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `nb_cut` is 0 or does not
    /// divide both dimensions, or if `new_positions` is not a permutation
    /// of `1..=nb_cut * nb_cut`.
    pub fn move_tiles(&mut self, nb_cut: usize, new_positions: &[usize]) -> Result<()> {
        if nb_cut == 0 || self.width % nb_cut != 0 || self.height % nb_cut != 0 {
            return Err(Error::InvalidParameter(format!(
                "{} cuts do not divide a {}x{} mask",
                nb_cut, self.width, self.height
            )));
        }
        let ntiles = nb_cut * nb_cut;
        if new_positions.len() != ntiles {
            return Err(Error::InvalidParameter(format!(
                "expected {} tile positions, got {}",
                ntiles,
                new_positions.len()
            )));
        }
        let mut seen = vec![false; ntiles];
        for &pos in new_positions {
            if pos < 1 || pos > ntiles || seen[pos - 1] {
                return Err(Error::InvalidParameter(format!(
                    "tile positions must be a permutation of 1..={}",
                    ntiles
                )));
            }
            seen[pos - 1] = true;
        }
        if nb_cut == 1 {
            return Ok(());
        }

        let tw = self.width / nb_cut;
        let th = self.height / nb_cut;
        log::debug!("move_tiles: {} tiles of {}x{}", ntiles, tw, th);
        let mut out = vec![OFF; self.data.len()];

        for (k, &pos) in new_positions.iter().enumerate() {
            let (si, sj) = (k % nb_cut, k / nb_cut);
            let (di, dj) = ((pos - 1) % nb_cut, (pos - 1) / nb_cut);
            for r in 0..th {
                let s = (sj * th + r) * self.width + si * tw;
                let d = (dj * th + r) * self.width + di * tw;
                out[d..d + tw].copy_from_slice(&self.data[s..s + tw]);
            }
        }

        self.data = out;
        Ok(())
    }

    /// Take every `xstep`-th column and `ystep`-th row, starting at (1, 1).
    ///
    /// The result is `ceil(width / xstep) x ceil(height / ystep)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a step is 0.
    pub fn extract_subsample(&self, xstep: usize, ystep: usize) -> Result<Mask> {
        if xstep == 0 || ystep == 0 {
            return Err(Error::InvalidParameter(format!(
                "subsample steps must be positive, got ({}, {})",
                xstep, ystep
            )));
        }
        let nw = (self.width - 1) / xstep + 1;
        let nh = (self.height - 1) / ystep + 1;
        let mut data = Vec::with_capacity(nw * nh);
        for y0 in (0..self.height).step_by(ystep) {
            let row = self.row(y0);
            data.extend(row.iter().step_by(xstep));
        }
        Ok(Mask {
            width: nw,
            height: nh,
            data,
        })
    }

    /// AND-reduce the mask along one direction.
    ///
    /// - `0`: collapse each column, giving a `width x 1` mask whose element
    ///   is ON only if the whole column is ON
    /// - `1`: collapse each row, giving a `1 x height` mask whose element
    ///   is ON only if the whole row is ON
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for any other direction.
    pub fn collapse(&self, direction: u32) -> Result<Mask> {
        match direction {
            0 => {
                let mut out = self.row(0).to_vec();
                for y0 in 1..self.height {
                    if word::find_on(&out).is_none() {
                        // Every column already has an OFF element
                        break;
                    }
                    word::combine(&mut out, self.row(y0), |a, b| a & b);
                }
                Ok(Mask {
                    width: self.width,
                    height: 1,
                    data: out,
                })
            }
            1 => {
                let data = (0..self.height)
                    .map(|y0| if word::all_on(self.row(y0)) { ON } else { OFF })
                    .collect();
                Ok(Mask {
                    width: 1,
                    height: self.height,
                    data,
                })
            }
            _ => Err(Error::InvalidParameter(format!(
                "collapse direction must be 0 or 1, got {}",
                direction
            ))),
        }
    }
}
