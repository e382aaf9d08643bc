//! Scalar abstraction shared by the numeric and symbolic simulation modes
//!
//! The whole linear-algebra layer is generic over one scalar type: the gate
//! expansion and measurement algorithms are identical whether amplitudes are
//! concrete complex numbers or symbolic polynomials. Choosing a mode means
//! choosing a scalar type at construction time, nothing else.

use num_complex::Complex64;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Amplitude scalar for the simulator's linear algebra
///
/// Implementors form a commutative ring with complex conjugation. The two
/// provided implementations are [`Complex64`] (numeric mode) and
/// [`crate::Expr`] (symbolic mode).
pub trait Scalar:
    Clone
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Lift a concrete complex value into this scalar type
    fn from_complex(value: Complex64) -> Self;

    /// Complex conjugate
    fn conj(&self) -> Self;

    /// Whether the value is exactly zero in its normal form
    fn is_zero(&self) -> bool;

    /// Closed-form numeric value, if one exists
    ///
    /// Returns `None` when the value still contains free symbols.
    fn eval(&self) -> Option<Complex64>;
}

impl Scalar for Complex64 {
    #[inline]
    fn zero() -> Self {
        Complex64::new(0.0, 0.0)
    }

    #[inline]
    fn one() -> Self {
        Complex64::new(1.0, 0.0)
    }

    #[inline]
    fn from_complex(value: Complex64) -> Self {
        value
    }

    #[inline]
    fn conj(&self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    #[inline]
    fn eval(&self) -> Option<Complex64> {
        Some(*self)
    }
}
