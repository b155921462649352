//! binmask-region - Connected components of binary masks
//!
//! This crate provides:
//!
//! - **Labelling** - numbering the 4-connected ON components of a mask
//!   with a non-recursive scan-line flood fill
//! - **Component statistics** - sizes, bounding windows and per-label
//!   masks read from the resulting [`LabelGrid`]
//!
//! # Examples
//!
//! ```
//! use binmask_core::{Mask, binary::ON};
//! use binmask_region::labelize;
//!
//! let mut mask = Mask::new(4, 4).unwrap();
//! for (x, y) in [(1, 1), (1, 2), (2, 1), (4, 4)] {
//!     mask.set(x, y, ON).unwrap();
//! }
//! let (grid, count) = labelize(&mask).unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(grid.get(1, 2).unwrap(), 1);
//! assert_eq!(grid.get(4, 4).unwrap(), 2);
//! ```

mod error;
pub mod label;

pub use error::{RegionError, RegionResult};
pub use label::{LabelGrid, labelize};
