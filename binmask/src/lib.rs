//! binmask - Binary mask engine for Rust
//!
//! Two-dimensional boolean masks with FITS-style 1-based coordinates,
//! together with the operations typically run on bad-pixel and object
//! masks in data reduction:
//!
//! - Storage, window queries and geometric rearrangement
//! - Word-parallel AND/OR/XOR/NOT
//! - Erosion, dilation, opening and closing by a structuring kernel
//! - Labelling of 4-connected components
//!
//! # Example
//!
//! ```
//! use binmask::morph::{BorderMode, kernel, open};
//! use binmask::region::labelize;
//! use binmask::{Mask, binary::ON};
//!
//! let mut mask = Mask::new(20, 10).unwrap();
//! mask.fill_window(2, 2, 8, 8, ON).unwrap();
//! mask.fill_window(12, 3, 18, 9, ON).unwrap();
//! // An isolated speck that opening removes
//! mask.set(10, 5, ON).unwrap();
//!
//! let cleaned = open(&mask, &kernel::brick(3, 3).unwrap(), BorderMode::Zero).unwrap();
//! let (_, count) = labelize(&cleaned).unwrap();
//! assert_eq!(count, 2);
//! ```

// Re-export core types (used everywhere)
pub use binmask_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use binmask_morph as morph;
pub use binmask_region as region;
