//! Component labelling by scan-line flood fill
//!
//! Every ON element of the source mask starts out as [`UNPROCESSED`] and
//! every OFF element as 0. The grid is scanned in row-major order (bottom
//! row first); each unprocessed element found seeds a fill that paints its
//! whole 4-connected component with the next label, so labels are numbered
//! from 1 in order of first encounter.
//!
//! The fill keeps an explicit stack of horizontal segments. A segment
//! `(y, xl, xr, dy)` says that row `y` was painted over `[xl, xr]` and that
//! row `y + dy` still has to be explored below that span. Popping it
//! extends painted runs on row `y + dy` as far as they go, pushes the runs
//! back in the same direction, and pushes "leak" segments in the opposite
//! direction for the parts of a run that stick out past `[xl, xr]`.

use crate::{RegionError, RegionResult};
use binmask_core::binary::{OFF, ON};
use binmask_core::{Mask, Window};

/// Transient value of an ON element not yet reached by a fill
pub const UNPROCESSED: u32 = u32::MAX;

/// Grid of component labels, same shape as the labelled mask
///
/// 0 is background; `1..=count` identify components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    y: isize,
    xl: isize,
    xr: isize,
    dy: isize,
}

/// Label the 4-connected ON components of `mask`.
///
/// Returns the label grid and the number of components. A mask without
/// ON elements gives an all-zero grid and a count of 0 without running
/// any fill.
///
/// # Errors
///
/// Returns [`RegionError::LabelOverflow`] if the mask has more components
/// than a `u32` label can number.
pub fn labelize(mask: &Mask) -> RegionResult<(LabelGrid, usize)> {
    let (width, height) = mask.size();

    if mask.is_empty() {
        log::debug!("labelize {}x{}: no ON element", width, height);
        let grid = LabelGrid {
            width,
            height,
            labels: vec![0; mask.len()],
            count: 0,
        };
        return Ok((grid, 0));
    }

    let mut labels: Vec<u32> = mask
        .data()
        .iter()
        .map(|&v| if v == OFF { 0 } else { UNPROCESSED })
        .collect();

    let mut stack = Vec::with_capacity(4 * height);
    let mut count = 0usize;
    for i in 0..labels.len() {
        if labels[i] != UNPROCESSED {
            continue;
        }
        count += 1;
        let label = u32::try_from(count)
            .ok()
            .filter(|&l| l != UNPROCESSED)
            .ok_or(RegionError::LabelOverflow)?;
        fill(
            &mut labels,
            width,
            height,
            i % width,
            i / width,
            label,
            &mut stack,
        );
    }

    log::debug!("labelize {}x{}: {} component(s)", width, height, count);

    let grid = LabelGrid {
        width,
        height,
        labels,
        count,
    };
    Ok((grid, count))
}

/// Push a segment if the row it leads to exists.
#[inline]
fn push(stack: &mut Vec<Segment>, height: isize, y: isize, xl: isize, xr: isize, dy: isize) {
    let next = y + dy;
    if next >= 0 && next < height {
        stack.push(Segment { y, xl, xr, dy });
    }
}

#[inline]
fn is_open(row: &[u32], x: isize) -> bool {
    row[x as usize] == UNPROCESSED
}

/// Paint the component containing 0-based `(x0, y0)` with `label`.
fn fill(
    labels: &mut [u32],
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
    label: u32,
    stack: &mut Vec<Segment>,
) {
    let w = width as isize;
    let h = height as isize;
    let (x, y) = (x0 as isize, y0 as isize);

    stack.clear();
    push(stack, h, y, x, x, 1);
    // Seed row itself, popped first
    push(stack, h, y + 1, x, x, -1);

    while let Some(seg) = stack.pop() {
        let (x1, x2, dy) = (seg.xl, seg.xr, seg.dy);
        let y = seg.y + dy;
        let row = &mut labels[y as usize * width..(y as usize + 1) * width];

        // Extend left from x1
        let mut x = x1;
        while x >= 0 && is_open(row, x) {
            row[x as usize] = label;
            x -= 1;
        }

        let mut skip = x >= x1;
        let mut l = x + 1;
        if !skip {
            if l < x1 {
                push(stack, h, y, l, x1 - 1, -dy);
            }
            x = x1 + 1;
        }

        loop {
            if !skip {
                while x < w && is_open(row, x) {
                    row[x as usize] = label;
                    x += 1;
                }
                push(stack, h, y, l, x - 1, dy);
                if x > x2 + 1 {
                    push(stack, h, y, x2 + 1, x - 1, -dy);
                }
            }
            skip = false;

            x += 1;
            while x <= x2 && !is_open(row, x) {
                x += 1;
            }
            l = x;
            if x > x2 {
                break;
            }
        }
    }
}

impl LabelGrid {
    /// Grid width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of components.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Raw labels, bottom row first.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Release the grid and return its labels.
    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }

    /// Label at 1-based `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Core`] for a coordinate outside the grid.
    pub fn get(&self, x: usize, y: usize) -> RegionResult<u32> {
        if x < 1 || x > self.width || y < 1 || y > self.height {
            return Err(binmask_core::Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            }
            .into());
        }
        Ok(self.labels[(y - 1) * self.width + (x - 1)])
    }

    /// Number of elements carrying each label; index `label - 1`.
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.count];
        for &l in self.labels.iter().filter(|&&l| l != 0) {
            sizes[l as usize - 1] += 1;
        }
        sizes
    }

    /// Bounding window of each component; index `label - 1`.
    pub fn component_bounds(&self) -> Vec<Window> {
        let mut bounds: Vec<Option<Window>> = vec![None; self.count];
        for (i, &l) in self.labels.iter().enumerate() {
            if l == 0 {
                continue;
            }
            let (x, y) = (i % self.width + 1, i / self.width + 1);
            bounds[l as usize - 1]
                .get_or_insert(Window::new(x, y, x, y))
                .expand_to(x, y);
        }
        // Every label in 1..=count owns at least its seed element
        bounds.into_iter().flatten().collect()
    }

    /// Mask of the elements carrying `label`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidLabel`] unless `1 <= label <= count`.
    pub fn extract(&self, label: u32) -> RegionResult<Mask> {
        if label == 0 || label as usize > self.count {
            return Err(RegionError::InvalidLabel {
                label,
                count: self.count,
            });
        }
        let data = self
            .labels
            .iter()
            .map(|&l| if l == label { ON } else { OFF })
            .collect();
        Ok(Mask::wrap(self.width, self.height, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binmask_core::ErrorKind;
    use std::collections::VecDeque;

    fn mask_from(rows: &[&str]) -> Mask {
        // Rows are written top first
        let h = rows.len();
        let w = rows[0].len();
        Mask::from_fn(w, h, |x, y| rows[h - y].as_bytes()[x - 1] == b'#').unwrap()
    }

    /// Breadth-first labelling in the same first-encounter order.
    fn reference(mask: &Mask) -> (Vec<u32>, usize) {
        let (w, h) = mask.size();
        let mut labels = vec![0u32; w * h];
        let mut count = 0;
        for start in 0..w * h {
            if mask.data()[start] == OFF || labels[start] != 0 {
                continue;
            }
            count += 1;
            labels[start] = count as u32;
            let mut queue = VecDeque::from([start]);
            while let Some(i) = queue.pop_front() {
                let (x, y) = (i % w, i / w);
                let mut next = Vec::new();
                if x > 0 {
                    next.push(i - 1);
                }
                if x + 1 < w {
                    next.push(i + 1);
                }
                if y > 0 {
                    next.push(i - w);
                }
                if y + 1 < h {
                    next.push(i + w);
                }
                for n in next {
                    if mask.data()[n] == ON && labels[n] == 0 {
                        labels[n] = count as u32;
                        queue.push_back(n);
                    }
                }
            }
        }
        (labels, count)
    }

    #[test]
    fn test_two_blobs() {
        let mut mask = Mask::new(4, 4).unwrap();
        for (x, y) in [(1, 1), (1, 2), (2, 1), (4, 4)] {
            mask.set(x, y, ON).unwrap();
        }
        let (grid, count) = labelize(&mask).unwrap();
        assert_eq!(count, 2);
        assert_eq!(grid.get(1, 1).unwrap(), 1);
        assert_eq!(grid.get(1, 2).unwrap(), 1);
        assert_eq!(grid.get(2, 1).unwrap(), 1);
        assert_eq!(grid.get(4, 4).unwrap(), 2);
        assert_eq!(grid.labels().iter().filter(|&&l| l == 0).count(), 12);
    }

    #[test]
    fn test_empty_mask() {
        let mask = Mask::new(6, 3).unwrap();
        let (grid, count) = labelize(&mask).unwrap();
        assert_eq!(count, 0);
        assert!(grid.labels().iter().all(|&l| l == 0));
        assert!(grid.component_sizes().is_empty());
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        let mask = mask_from(&["#.#", ".#.", "#.#"]);
        let (_, count) = labelize(&mask).unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_u_and_spiral_shapes() {
        // Fills that must turn back through leak segments
        let shapes: [&[&str]; 3] = [
            &["#...#", "#...#", "#.#.#", "#####"],
            &["#######", "#.....#", "#.###.#", "#.#.#.#", "#.#...#", "#.#####"],
            &["##.##", "#...#", "#.#.#", "#...#", "#####"],
        ];
        for rows in shapes {
            let mask = mask_from(rows);
            let (grid, count) = labelize(&mask).unwrap();
            let (expected, expected_count) = reference(&mask);
            assert_eq!(count, expected_count, "{:?}", rows);
            assert_eq!(grid.labels(), expected.as_slice(), "{:?}", rows);
        }
    }

    #[test]
    fn test_matches_reference_on_patterns() {
        for seed in 0..6usize {
            let mask = Mask::from_fn(23, 17, |x, y| {
                (x * 7 + y * 13 + seed * 5) % 9 < 4 || (x + seed) % 6 == 0
            })
            .unwrap();
            let (grid, count) = labelize(&mask).unwrap();
            let (expected, expected_count) = reference(&mask);
            assert_eq!(count, expected_count);
            assert_eq!(grid.labels(), expected.as_slice());
        }
    }

    #[test]
    fn test_statistics() {
        let mask = mask_from(&["##..#", "#...#", "....#", "##..."]);
        let (grid, count) = labelize(&mask).unwrap();
        assert_eq!(count, 3);
        // Bottom row blob is seen first
        assert_eq!(grid.component_sizes(), vec![2, 3, 3]);
        let bounds = grid.component_bounds();
        assert_eq!(bounds[0], Window::new(1, 1, 2, 1));
        assert_eq!(bounds[1], Window::new(5, 2, 5, 4));
        assert_eq!(bounds[2], Window::new(1, 3, 2, 4));

        let blob = grid.extract(2).unwrap();
        assert_eq!(blob.count(), 3);
        assert!(blob.is_on(5, 3));
        assert!(!blob.is_on(1, 1));
    }

    #[test]
    fn test_errors() {
        let mask = mask_from(&["#.", ".#"]);
        let (grid, _) = labelize(&mask).unwrap();
        assert_eq!(grid.extract(0).unwrap_err().kind(), ErrorKind::IllegalInput);
        assert_eq!(grid.extract(3).unwrap_err().kind(), ErrorKind::IllegalInput);
        assert_eq!(grid.get(3, 1).unwrap_err().kind(), ErrorKind::IllegalInput);
        assert_eq!(grid.get(0, 1).unwrap_err().kind(), ErrorKind::IllegalInput);
    }
}
