//! Projector-trace measurement over arbitrary qubit subsets
//!
//! Probabilities are extracted as Tr(ρ·P) with P a full-system basis
//! projector; the state vector itself is never collapsed. The outcome
//! indexing convention is fixed here and nowhere else: targets are sorted
//! ascending, and bit b of an outcome index addresses the b-th smallest
//! target qubit (least-significant bit ↔ smallest index).

use crate::density_matrix::DensityMatrix;
use crate::error::{Result, StateError};
use crate::expand;
use crate::state_vector::StateVector;
use kronq_core::{QubitId, Scalar};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Probability of one qubit reading 0 and 1, as `(p0, p1)`
///
/// For a normalized state the two sum to 1 up to numerical or symbolic
/// simplification.
pub fn measure_single<S: Scalar>(state: &StateVector<S>, target: QubitId) -> Result<(S, S)> {
    expand::check_operands(state.num_qubits(), &[target])?;
    let density = DensityMatrix::from_state(state);
    let p0 = density.expectation(&expand::basis_projector(
        state.num_qubits(),
        &[(target, false)],
    ))?;
    let p1 = density.expectation(&expand::basis_projector(
        state.num_qubits(),
        &[(target, true)],
    ))?;
    Ok((p0, p1))
}

/// Joint outcome probabilities for a subset of qubits
///
/// Targets are sorted ascending before enumeration; for each outcome index
/// i in [0, 2^k), bit b of i fixes the b-th smallest target to |0⟩ or |1⟩
/// and the corresponding projector trace becomes entry i of the record.
/// The entries of a normalized state's record sum to 1.
pub fn measure<S: Scalar>(
    state: &StateVector<S>,
    targets: &[QubitId],
) -> Result<MeasurementRecord<S>> {
    if targets.is_empty() {
        return Err(StateError::EmptyMeasurement);
    }
    expand::check_operands(state.num_qubits(), targets)?;

    let mut sorted: SmallVec<[QubitId; 4]> = SmallVec::from_slice(targets);
    sorted.sort();

    let density = DensityMatrix::from_state(state);
    let num_outcomes = 1usize << sorted.len();
    let mut probabilities = Vec::with_capacity(num_outcomes);
    for outcome in 0..num_outcomes {
        let assignment: SmallVec<[(QubitId, bool); 4]> = sorted
            .iter()
            .enumerate()
            .map(|(bit, &qubit)| (qubit, (outcome >> bit) & 1 == 1))
            .collect();
        let projector = expand::basis_projector(state.num_qubits(), &assignment);
        probabilities.push(density.expectation(&projector)?);
    }
    Ok(MeasurementRecord::new(sorted.to_vec(), probabilities))
}

/// Result of the last measurement: measured qubits and their joint outcome
/// probabilities
///
/// This is the data external display collaborators consume; it is
/// serializable and carries its own outcome labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord<S> {
    qubits: Vec<QubitId>,
    probabilities: Vec<S>,
}

impl<S: Scalar> MeasurementRecord<S> {
    /// Build a record; probabilities must cover every joint outcome
    pub fn new(qubits: Vec<QubitId>, probabilities: Vec<S>) -> Self {
        debug_assert_eq!(probabilities.len(), 1usize << qubits.len());
        Self {
            qubits,
            probabilities,
        }
    }

    /// Measured qubits in ascending order
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Probabilities indexed by outcome (LSB ↔ smallest measured qubit)
    pub fn probabilities(&self) -> &[S] {
        &self.probabilities
    }

    /// Probability of one outcome index
    pub fn probability(&self, outcome: usize) -> &S {
        &self.probabilities[outcome]
    }

    /// Number of joint outcomes (2^k)
    pub fn num_outcomes(&self) -> usize {
        self.probabilities.len()
    }

    /// Ket label for an outcome index, e.g. `|01⟩`
    ///
    /// The index is rendered MSB-first, so the label's rightmost character
    /// corresponds to the smallest measured qubit.
    pub fn label(&self, outcome: usize) -> String {
        format!("|{:0width$b}⟩", outcome, width = self.qubits.len())
    }

    /// Labels for all outcomes, in record order
    pub fn labels(&self) -> Vec<String> {
        (0..self.num_outcomes()).map(|i| self.label(i)).collect()
    }

    /// Probabilities as plain floats
    ///
    /// Fails if any entry still contains free symbols.
    pub fn evaluated(&self) -> Result<Vec<f64>> {
        self.probabilities
            .iter()
            .map(|p| {
                p.eval()
                    .map(|value| value.re)
                    .ok_or(StateError::UnresolvedSymbolic)
            })
            .collect()
    }

    /// Draw classical outcomes from the record's distribution
    ///
    /// Returns one count per outcome index. Sampling reads the recorded
    /// probabilities only; the quantum state is untouched.
    pub fn sample<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Result<Vec<usize>> {
        let probabilities = self.evaluated()?;
        let mut counts = vec![0usize; probabilities.len()];
        for _ in 0..shots {
            let mut draw: f64 = rng.gen();
            // inverse-CDF walk; the final bucket absorbs rounding slack
            let mut chosen = probabilities.len() - 1;
            for (outcome, p) in probabilities.iter().enumerate() {
                if draw < *p {
                    chosen = outcome;
                    break;
                }
                draw -= p;
            }
            counts[chosen] += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kronq_core::Complex64;
    use kronq_gates::StandardGate;

    const EPSILON: f64 = 1e-10;

    fn apply_gate(state: &mut StateVector<Complex64>, gate: StandardGate, target: usize) {
        let op = expand::single(state.num_qubits(), QubitId::new(target), &gate.matrix());
        state.apply(&op).unwrap();
    }

    #[test]
    fn test_measure_single_on_basis_state() {
        let state = StateVector::<Complex64>::new(2).unwrap();
        let (p0, p1) = measure_single(&state, QubitId::new(1)).unwrap();
        assert_relative_eq!(p0.re, 1.0, epsilon = EPSILON);
        assert_relative_eq!(p1.re, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_measure_single_rejects_bad_target() {
        let state = StateVector::<Complex64>::new(2).unwrap();
        assert!(measure_single(&state, QubitId::new(3)).is_err());
    }

    #[test]
    fn test_measure_empty_subset_is_an_error() {
        let state = StateVector::<Complex64>::new(2).unwrap();
        assert_eq!(
            measure(&state, &[]).unwrap_err(),
            StateError::EmptyMeasurement
        );
    }

    #[test]
    fn test_outcome_index_bit_mapping() {
        // prepare |010⟩ (q2 flipped) and measure different subsets
        let mut state = StateVector::<Complex64>::new(3).unwrap();
        apply_gate(&mut state, StandardGate::PauliX, 2);

        let record = measure(&state, &[QubitId::new(2)]).unwrap();
        let probs = record.evaluated().unwrap();
        assert_relative_eq!(probs[1], 1.0, epsilon = EPSILON);

        // q2 is the smallest measured target, so it owns bit 0: outcome 1
        let record = measure(&state, &[QubitId::new(3), QubitId::new(2)]).unwrap();
        let probs = record.evaluated().unwrap();
        assert_relative_eq!(probs[1], 1.0, epsilon = EPSILON);

        // over all three qubits, q2 owns bit 1: outcome 2
        let record = measure(
            &state,
            &[QubitId::new(1), QubitId::new(2), QubitId::new(3)],
        )
        .unwrap();
        let probs = record.evaluated().unwrap();
        assert_relative_eq!(probs[2], 1.0, epsilon = EPSILON);

        // q2 not measured at all: everything sits at outcome 0
        let record = measure(&state, &[QubitId::new(1), QubitId::new(3)]).unwrap();
        let probs = record.evaluated().unwrap();
        assert_relative_eq!(probs[0], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_targets_are_sorted_before_enumeration() {
        let mut state = StateVector::<Complex64>::new(2).unwrap();
        apply_gate(&mut state, StandardGate::PauliX, 1);

        let forward = measure(&state, &[QubitId::new(1), QubitId::new(2)]).unwrap();
        let reversed = measure(&state, &[QubitId::new(2), QubitId::new(1)]).unwrap();
        assert_eq!(forward, reversed);
        assert_eq!(forward.qubits(), &[QubitId::new(1), QubitId::new(2)]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut state = StateVector::<Complex64>::new(3).unwrap();
        apply_gate(&mut state, StandardGate::Hadamard, 1);
        apply_gate(&mut state, StandardGate::Hadamard, 3);

        for targets in [
            vec![QubitId::new(1)],
            vec![QubitId::new(1), QubitId::new(2)],
            vec![QubitId::new(1), QubitId::new(2), QubitId::new(3)],
        ] {
            let record = measure(&state, &targets).unwrap();
            let total: f64 = record.evaluated().unwrap().iter().sum();
            assert_relative_eq!(total, 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_labels_and_outcome_access() {
        let state = StateVector::<Complex64>::new(2).unwrap();
        let record = measure(&state, &[QubitId::new(1), QubitId::new(2)]).unwrap();
        assert_eq!(record.labels(), vec!["|00⟩", "|01⟩", "|10⟩", "|11⟩"]);
        assert_eq!(record.num_outcomes(), 4);
        assert_relative_eq!(record.probability(0).re, 1.0, epsilon = EPSILON);
        assert_relative_eq!(record.probability(3).re, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sampling_respects_support() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut state = StateVector::<Complex64>::new(1).unwrap();
        apply_gate(&mut state, StandardGate::PauliX, 1);
        let record = measure(&state, &[QubitId::new(1)]).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let counts = record.sample(200, &mut rng).unwrap();
        assert_eq!(counts, vec![0, 200]);
    }

    #[test]
    fn test_measure_single_does_not_collapse() {
        let mut state = StateVector::<Complex64>::new(1).unwrap();
        apply_gate(&mut state, StandardGate::Hadamard, 1);
        let before = state.clone();
        let _ = measure_single(&state, QubitId::new(1)).unwrap();
        assert_eq!(state, before);
    }
}
