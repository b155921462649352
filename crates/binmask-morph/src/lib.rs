//! binmask-morph - Morphological filtering of binary masks
//!
//! This crate provides:
//!
//! - Structuring kernels: validation, word padding and common shapes
//! - Erosion, dilation, opening and closing with a choice of border policy
//! - In-place opening and closing through a single scratch mask
//!
//! # Examples
//!
//! ```
//! use binmask_core::{Mask, binary::ON};
//! use binmask_morph::{BorderMode, dilate, kernel};
//!
//! let mut mask = Mask::new(5, 5).unwrap();
//! mask.set(3, 3, ON).unwrap();
//! let grown = dilate(&mask, &kernel::cross(1).unwrap(), BorderMode::Zero).unwrap();
//! assert_eq!(grown.count(), 5);
//! ```

mod error;
pub mod filter;
pub mod kernel;

pub use error::{MorphError, MorphResult};
pub use filter::{
    BorderMode, FilterKind, Overlap, close, dilate, erode, filter, filter_in_place, open,
};
pub use kernel::PaddedKernel;
