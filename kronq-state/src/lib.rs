//! State engine primitives for the kronq simulator
//!
//! This crate owns the algorithmic middle of the system:
//! - [`expand`]: lifting 2×2 operators to full system dimension by ordered
//!   Kronecker products, including the projector-sum decomposition of
//!   controlled gates
//! - [`StateVector`]: the dense 2^N amplitude vector
//! - [`DensityMatrix`]: |ψ⟩⟨ψ|, derived on demand
//! - [`measurement`]: projector-trace probabilities over arbitrary qubit
//!   subsets, with no state collapse
//!
//! Expanded operators are 2^N×2^N and the density matrix is the same size,
//! so memory grows as 4^N with the qubit count. That scaling is inherent to
//! full-system operator expansion; construction refuses qubit counts beyond
//! [`MAX_QUBITS`].
//!
//! # Example
//! ```
//! use kronq_core::{Complex64, QubitId};
//! use kronq_gates::StandardGate;
//! use kronq_state::{expand, StateVector};
//!
//! let mut state = StateVector::<Complex64>::new(2).unwrap();
//! let h = StandardGate::Hadamard.matrix();
//! let op = expand::single(2, QubitId::new(1), &h);
//! state.apply(&op).unwrap();
//! ```

pub mod density_matrix;
pub mod error;
pub mod expand;
pub mod measurement;
pub mod state_vector;

pub use density_matrix::DensityMatrix;
pub use error::{Result, StateError};
pub use measurement::MeasurementRecord;
pub use state_vector::StateVector;

/// Largest supported qubit count
///
/// Full-operator expansion allocates 4^N scalars per operator; past a dozen
/// qubits a single expanded operator no longer fits in ordinary memory.
pub const MAX_QUBITS: usize = 12;
