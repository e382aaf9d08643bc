//! kronq simulator engine
//!
//! A small multi-qubit state simulator: per-qubit gates are expanded to the
//! full 2^N dimension by ordered Kronecker products and applied to a dense
//! state vector; measurement statistics and purity come from the density
//! matrix, with no state collapse. State and operators are dense, so memory
//! and time scale exponentially in the qubit count; that is the cost of
//! full-system simulation and is not hidden anywhere.
//!
//! The simulation mode is the scalar type: [`NumericSimulator`] runs on
//! concrete complex amplitudes, [`SymbolicSimulator`] on polynomial
//! amplitudes over per-qubit symbols. The algorithms are identical.
//!
//! # Example
//! ```
//! use kronq_sim::NumericSimulator;
//!
//! // Bell state
//! let mut sim = NumericSimulator::new(2).unwrap();
//! sim.h(1).unwrap();
//! sim.cx(1, 2).unwrap();
//!
//! let probs = sim.measure(&[1, 2]).unwrap().evaluated().unwrap();
//! assert!((probs[0] - 0.5).abs() < 1e-10);
//! assert!((probs[1]).abs() < 1e-10);
//! ```

pub mod error;
pub mod history;
pub mod simulator;

// Re-exports for convenience
pub use error::{Result, SimulatorError};
pub use history::OpRecord;
pub use kronq_core::{Complex64, Expr, Matrix, QubitId, Scalar, Symbol};
pub use kronq_gates::{Projector, StandardGate};
pub use kronq_state::{DensityMatrix, MeasurementRecord, StateVector};
pub use simulator::{NumericSimulator, Simulator, SymbolicSimulator};
