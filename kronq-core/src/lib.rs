//! Core types for the kronq quantum state simulator
//!
//! This crate provides the foundation the rest of the workspace builds on:
//! - [`QubitId`]: type-safe, 1-based qubit addressing
//! - [`Scalar`]: the amplitude abstraction shared by numeric and symbolic modes
//! - [`Expr`]: symbolic amplitudes as normalized polynomials
//! - [`Matrix`]: dense row-major matrices generic over the scalar type
//!
//! Everything here scales as 2^N in the qubit count N: states are dense
//! 2^N-vectors and expanded operators are dense 2^N×2^N matrices. That is a
//! property of full-system simulation, not an implementation shortcut.
//!
//! # Example
//! ```
//! use kronq_core::{Complex64, Matrix, QubitId};
//!
//! let q1 = QubitId::new(1);
//! let eye: Matrix<Complex64> = Matrix::identity(2);
//! assert_eq!(eye.trace(), Complex64::new(2.0, 0.0));
//! ```

pub mod matrix;
pub mod qubit;
pub mod scalar;
pub mod symbolic;

// Re-exports for convenience
pub use matrix::Matrix;
pub use num_complex::Complex64;
pub use qubit::QubitId;
pub use scalar::Scalar;
pub use symbolic::{Expr, Symbol};
