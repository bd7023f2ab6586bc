//! Numeric abstraction for path counts.
//!
//! The path-counting recurrence is written once against [`PathCount`] and
//! instantiated twice:
//! - [`BigUint`] for exact counts (no overflow, digit length grows with the
//!   counts),
//! - `f64` for approximate counts (bounded memory per entry, subject to
//!   rounding and to saturation at `+inf` for astronomically large counts).
//!
//! Neither flavour ever divides: all certificate arithmetic happens in the
//! log domain through [`PathCount::natural_log`].

use std::f64::consts::LN_2;
use std::fmt;
use std::ops::AddAssign;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// A non-negative count of paths.
///
/// Requirements:
/// - `zero()`/`one()` are the additive and multiplicative identities,
/// - `+=` by reference accumulates without consuming the right-hand side,
/// - ordering is total on every value the engine produces (for `f64` the
///   engine never produces NaN from finite inputs).
pub trait PathCount: Clone + PartialOrd + fmt::Debug + Zero + One + for<'a> AddAssign<&'a Self> {
    /// Whether arithmetic on this type is exact.
    const EXACT: bool;

    /// `self * other` without consuming either operand.
    fn product(&self, other: &Self) -> Self;

    /// Natural logarithm; `-inf` for zero.
    fn natural_log(&self) -> f64;

    /// Nearest `f64`, saturating to `+inf`.
    fn approx_f64(&self) -> f64;

    /// Lift a small integer into the count domain.
    fn from_count(n: usize) -> Self;
}

impl PathCount for f64 {
    const EXACT: bool = false;

    #[inline]
    fn product(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn natural_log(&self) -> f64 {
        self.ln()
    }

    #[inline]
    fn approx_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn from_count(n: usize) -> Self {
        n as f64
    }
}

impl PathCount for BigUint {
    const EXACT: bool = true;

    #[inline]
    fn product(&self, other: &Self) -> Self {
        self * other
    }

    fn natural_log(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        // Keep the top 64 bits as the mantissa and account for the rest in base 2.
        let shift = self.bits().saturating_sub(64);
        let top = if shift == 0 {
            self.to_f64()
        } else {
            (self >> shift).to_f64()
        };
        top.unwrap_or(f64::INFINITY).ln() + shift as f64 * LN_2
    }

    #[inline]
    fn approx_f64(&self) -> f64 {
        self.to_f64().unwrap_or(f64::INFINITY)
    }

    #[inline]
    fn from_count(n: usize) -> Self {
        BigUint::from(n)
    }
}
