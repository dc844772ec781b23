//! Element type abstraction for generic single/double precision.
//!
//! Every matrix routine in this crate is written once, generic over
//! [`Element`], and instantiates identically for `f32` and `f64`. The trait
//! is a thin extension of [`num_traits::Float`]: the `num-traits` bounds
//! supply the arithmetic, comparisons and IEEE queries, and the two lossy
//! constructors cover the places where indices or literals have to become
//! elements (random fills, linspace steps, mean denominators).

use core::fmt;
use core::iter::Sum;

use num_traits::{Float, NumAssign};

/// A real floating-point matrix element (`f32` or `f64`).
pub trait Element:
    Float + NumAssign + Sum + fmt::Debug + fmt::Display + Default + Send + Sync + 'static
{
    /// Convert an `f64` literal, rounding to the target precision.
    fn from_f64(v: f64) -> Self;

    /// Convert a `usize` count (used for means and evenly spaced fills).
    fn from_usize(v: usize) -> Self;
}

impl Element for f32 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as f32
    }
}

impl Element for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn from_usize(v: usize) -> Self {
        v as f64
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64() {
        assert_eq!(f32::from_f64(1.5), 1.5_f32);
        assert_eq!(f64::from_f64(1.5), 1.5_f64);
    }

    #[test]
    fn test_from_usize() {
        assert_eq!(f32::from_usize(42), 42.0_f32);
        assert_eq!(f64::from_usize(42), 42.0_f64);
    }

    #[test]
    fn test_float_bounds_available() {
        // The num-traits supertrait carries the IEEE queries we rely on.
        assert!(f64::nan().is_nan());
        assert!(!f64::infinity().is_finite());
        assert_eq!(<f64 as Float>::abs(-3.0), 3.0);
    }
}
