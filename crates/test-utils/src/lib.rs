//! Shared test utilities for the ISG geoid-grid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample ISG documents for every supported version
//! - Synthetic grid generators
//! - Temporary file helpers
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
//! use test_utils::{fixtures, assert_approx_eq};
//! ```

pub mod files;
pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use files::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f64, 1.0_f64, 0.001_f64);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of two grids, cell by cell.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_grid_approx_eq;
///
/// assert_grid_approx_eq!(&parsed, &expected, 1e-4);
/// ```
#[macro_export]
macro_rules! assert_grid_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[Vec<f64>] = $left;
        let right: &[Vec<f64>] = $right;
        assert_eq!(left.len(), right.len(), "row count differs");
        for (row, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            assert_eq!(l.len(), r.len(), "column count differs in row {}", row);
            for (a, b) in l.iter().zip(r.iter()) {
                $crate::assert_approx_eq!(*a, *b, $epsilon);
            }
        }
    }};
}
