//! Density matrix derived from the state vector

use crate::error::{Result, StateError};
use crate::state_vector::StateVector;
use kronq_core::{Matrix, Scalar};

/// Density matrix ρ = |ψ⟩⟨ψ| of the current (pure) state
///
/// Derived on demand and never stored by the engine: every measurement and
/// purity query recomputes it from the state vector, so it can never drift
/// out of sync. Since this core never produces mixed states, Tr(ρ²) is 1 up
/// to numerical error.
///
/// # Example
/// ```
/// use kronq_core::Complex64;
/// use kronq_state::{DensityMatrix, StateVector};
///
/// let state = StateVector::<Complex64>::new(2).unwrap();
/// let density = DensityMatrix::from_state(&state);
/// assert_eq!(density.trace(), Complex64::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix<S> {
    num_qubits: usize,
    matrix: Matrix<S>,
}

impl<S: Scalar> DensityMatrix<S> {
    /// Outer product of the state with its own conjugate transpose
    pub fn from_state(state: &StateVector<S>) -> Self {
        let dimension = state.dimension();
        let mut matrix = Matrix::zeros(dimension, dimension);
        for i in 0..dimension {
            let amp = state.amplitude(i);
            if amp.is_zero() {
                continue;
            }
            for j in 0..dimension {
                matrix.set(i, j, amp.clone() * state.amplitude(j).conj());
            }
        }
        Self {
            num_qubits: state.num_qubits(),
            matrix,
        }
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension (2^N)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.matrix.rows()
    }

    /// The underlying matrix
    pub fn matrix(&self) -> &Matrix<S> {
        &self.matrix
    }

    /// Tr(ρ), 1 for a normalized state
    pub fn trace(&self) -> S {
        self.matrix.trace()
    }

    /// Tr(ρ²): 1 for a pure state, below 1 for a mixed one
    pub fn purity(&self) -> S {
        self.matrix.matmul(&self.matrix).trace()
    }

    /// Tr(ρ·op) for a full-system operator
    ///
    /// With a basis projector as the operator this is the probability of the
    /// projected outcome.
    pub fn expectation(&self, operator: &Matrix<S>) -> Result<S> {
        if operator.rows() != self.dimension() || operator.cols() != self.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: self.dimension(),
                actual: operator.rows(),
            });
        }
        Ok(self.matrix.matmul(operator).trace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kronq_core::Complex64;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_outer_product_of_basis_state() {
        let state = StateVector::<Complex64>::new(1).unwrap();
        let density = DensityMatrix::from_state(&state);
        assert_eq!(density.num_qubits(), 1);
        assert_eq!(density.dimension(), 2);
        assert_eq!(*density.matrix().get(0, 0), c(1.0));
        assert_eq!(*density.matrix().get(1, 1), c(0.0));
    }

    #[test]
    fn test_superposition_density() {
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        let state = StateVector::from_amplitudes(
            1,
            vec![c(inv_sqrt2), c(inv_sqrt2)],
        )
        .unwrap();
        let density = DensityMatrix::from_state(&state);

        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(density.matrix().get(i, j).re, 0.5, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(density.trace().re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_purity_of_pure_state_is_one() {
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        let state = StateVector::from_amplitudes(
            1,
            vec![c(inv_sqrt2), Complex64::new(0.0, inv_sqrt2)],
        )
        .unwrap();
        let purity = DensityMatrix::from_state(&state).purity();
        assert_relative_eq!(purity.re, 1.0, epsilon = 1e-10);
        assert_relative_eq!(purity.im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_expectation_dimension_check() {
        let state = StateVector::<Complex64>::new(2).unwrap();
        let density = DensityMatrix::from_state(&state);
        let wrong = Matrix::identity(2);
        assert!(density.expectation(&wrong).is_err());
    }
}
