//! Gate and projector descriptors
//!
//! A [`StandardGate`] names a 2×2 unitary from the catalog and lifts it into
//! whichever scalar type the simulation runs on. [`Projector`] does the same
//! for the two non-unitary basis projectors, which only ever appear inside
//! measurement lifts and the controlled-gate decomposition.

use crate::matrices;
use kronq_core::{Matrix, Scalar};
use serde::{Deserialize, Serialize};

/// A single-qubit gate from the catalog
///
/// Descriptors are plain values: the matrix is produced on demand, never
/// cached, and carries no state.
///
/// # Example
/// ```
/// use kronq_core::{Complex64, Matrix};
/// use kronq_gates::StandardGate;
///
/// assert_eq!(StandardGate::PauliX.name(), "X");
/// let m: Matrix<Complex64> = StandardGate::Phase(0.0).matrix();
/// assert_eq!(m, Matrix::identity(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity
    Identity,
    /// Pauli-X (bit flip)
    PauliX,
    /// Pauli-Y
    PauliY,
    /// Pauli-Z (phase flip)
    PauliZ,
    /// Hadamard
    Hadamard,
    /// Phase rotation U1(λ) = diag(1, e^(iλ))
    Phase(f64),
}

impl StandardGate {
    /// Short name used in operation history records
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "ID",
            Self::PauliX => "X",
            Self::PauliY => "Y",
            Self::PauliZ => "Z",
            Self::Hadamard => "H",
            Self::Phase(_) => "U1",
        }
    }

    /// The 2×2 matrix, lifted into the scalar type `S`
    pub fn matrix<S: Scalar>(&self) -> Matrix<S> {
        let m = match self {
            Self::Identity => matrices::IDENTITY,
            Self::PauliX => matrices::PAULI_X,
            Self::PauliY => matrices::PAULI_Y,
            Self::PauliZ => matrices::PAULI_Z,
            Self::Hadamard => matrices::HADAMARD,
            Self::Phase(lambda) => matrices::phase(*lambda),
        };
        Matrix::from_complex_2x2(&m)
    }

    /// Whether the gate is its own inverse
    pub fn is_hermitian(&self) -> bool {
        !matches!(self, Self::Phase(_))
    }
}

/// Rank-1 projector onto a basis state
///
/// Not unitary; used to build measurement lifts and the projector-sum
/// decomposition of controlled gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projector {
    /// |0⟩⟨0| = diag(1, 0)
    Zero,
    /// |1⟩⟨1| = diag(0, 1)
    One,
}

impl Projector {
    /// The 2×2 matrix, lifted into the scalar type `S`
    pub fn matrix<S: Scalar>(&self) -> Matrix<S> {
        let m = match self {
            Self::Zero => matrices::PROJECTOR_ZERO,
            Self::One => matrices::PROJECTOR_ONE,
        };
        Matrix::from_complex_2x2(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kronq_core::Complex64;

    #[test]
    fn test_gate_names() {
        assert_eq!(StandardGate::Identity.name(), "ID");
        assert_eq!(StandardGate::PauliY.name(), "Y");
        assert_eq!(StandardGate::Hadamard.name(), "H");
        assert_eq!(StandardGate::Phase(1.5).name(), "U1");
    }

    #[test]
    fn test_projectors_are_idempotent() {
        for p in [Projector::Zero, Projector::One] {
            let m: Matrix<Complex64> = p.matrix();
            assert_eq!(m.matmul(&m), m);
        }
    }
}
