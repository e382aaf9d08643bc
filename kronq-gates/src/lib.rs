//! Single-qubit gate catalog for the kronq simulator
//!
//! The catalog is pure and stateless: fixed 2×2 unitaries as compile-time
//! constants, the parameterized phase rotation as a runtime constructor, and
//! the two rank-1 basis projectors used by measurement and by the
//! projector-sum decomposition of controlled gates.
//!
//! # Example
//! ```
//! use kronq_core::{Complex64, Matrix};
//! use kronq_gates::StandardGate;
//!
//! let x: Matrix<Complex64> = StandardGate::PauliX.matrix();
//! assert_eq!(x.matmul(&x), Matrix::identity(2));
//! ```

pub mod catalog;
pub mod matrices;

pub use catalog::{Projector, StandardGate};
