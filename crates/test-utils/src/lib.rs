//! Shared test utilities for the flag generator workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample valid and invalid names
//! - Raster helpers for checking rendered flags
//! - Temporary cache/output directories
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, raster};
//! ```

pub mod fixtures;
pub mod raster;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use raster::*;

/// Create a fresh temporary directory, removed when the guard drops.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("flag-test-")
        .tempdir()
        .expect("failed to create temp dir")
}

/// Macro for per-channel approximate color equality.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_color_near;
///
/// assert_color_near!(Rgb([254, 153, 52]), Rgb([255, 153, 51]), 1); // passes
/// assert_color_near!(Rgb([0, 0, 0]), Rgb([255, 153, 51]), 1);      // fails
/// ```
#[macro_export]
macro_rules! assert_color_near {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: [u8; 3] = $left.0;
        let right: [u8; 3] = $right.0;
        let tolerance: i32 = $tolerance as i32;
        let diff = left
            .iter()
            .zip(right.iter())
            .map(|(a, b)| (*a as i32 - *b as i32).abs())
            .max()
            .unwrap_or(0);
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > tolerance `{:?}`",
                left, right, diff, tolerance
            );
        }
    }};
}
