//! binmask-test - Regression test framework for binmask
//!
//! This crate provides a small regression test harness supporting three
//! modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run checks without golden comparison
//!
//! plus deterministic random masks for property-style checks.
//!
//! # Usage
//!
//! ```ignore
//! use binmask_test::{RegParams, random_mask};
//!
//! let mut rp = RegParams::new("filter");
//! let mask = random_mask(40, 30, 0.5, 7).unwrap();
//! rp.compare_values(mask.len() as f64, 1200.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//! - `RUST_LOG`: Log filter for the test run (see `env_logger`)

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use binmask_core::Mask;

/// Install the test logger once per process.
///
/// Safe to call from every test; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic generator for test data
///
/// Linear congruential generator with the MMIX constants.
/// Not suitable for anything but reproducible fixtures.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Next value uniformly distributed in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        // Top 53 bits: the low bits of an LCG are weak
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Next value in `0..bound`
    pub fn below(&mut self, bound: usize) -> usize {
        ((self.next_u64() >> 33) as usize) % bound.max(1)
    }
}

/// Build a `width x height` mask whose elements are ON with probability
/// `density`, reproducibly for a given `seed`.
///
/// # Errors
///
/// Returns [`TestError::Core`] if width or height is 0.
pub fn random_mask(width: usize, height: usize, density: f64, seed: u64) -> TestResult<Mask> {
    let mut rng = SimpleRng::new(seed);
    Ok(Mask::from_fn(width, height, |_, _| rng.next_f64() < density)?)
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // binmask-test is at crates/binmask-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
