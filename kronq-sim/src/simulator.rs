//! The simulator engine
//!
//! One `Simulator` owns the state vector, the operation history, and the
//! last measurement record. Gate calls go through the operator expander and
//! replace the state; measurement and purity queries derive everything they
//! need from the current state without mutating it.

use crate::error::{Result, SimulatorError};
use crate::history::OpRecord;
use kronq_core::{Expr, QubitId, Scalar};
use kronq_gates::StandardGate;
use kronq_state::{expand, measurement, DensityMatrix, MeasurementRecord, StateError, StateVector};
use smallvec::SmallVec;
use std::fmt;

/// Multi-qubit state simulator, generic over the amplitude scalar
///
/// The scalar type is the simulation mode: [`NumericSimulator`] for concrete
/// complex amplitudes, [`SymbolicSimulator`] for polynomial amplitudes over
/// per-qubit symbols. Qubits are numbered 1..=N and qubit 1 is the leftmost
/// tensor factor.
///
/// # Example
/// ```
/// use kronq_sim::NumericSimulator;
///
/// let mut sim = NumericSimulator::new(2).unwrap();
/// sim.h(1).unwrap();
/// sim.cx(1, 2).unwrap();
///
/// let record = sim.measure(&[1, 2]).unwrap();
/// let probs = record.evaluated().unwrap();
/// assert!((probs[0] - 0.5).abs() < 1e-10);
/// assert!((probs[3] - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<S: Scalar> {
    num_qubits: usize,
    state: StateVector<S>,
    history: Vec<OpRecord>,
    last_measurement: Option<MeasurementRecord<S>>,
}

/// Numeric-mode simulator (concrete complex amplitudes)
pub type NumericSimulator = Simulator<kronq_core::Complex64>;

/// Symbolic-mode simulator (polynomial amplitudes)
pub type SymbolicSimulator = Simulator<Expr>;

impl<S: Scalar> Simulator<S> {
    /// Create a simulator with all qubits in |0⟩
    pub fn new(num_qubits: usize) -> Result<Self> {
        let state = StateVector::new(num_qubits)?;
        Ok(Self {
            num_qubits,
            state,
            history: Vec::new(),
            last_measurement: None,
        })
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The current state vector
    pub fn state(&self) -> &StateVector<S> {
        &self.state
    }

    /// All operations applied so far, oldest first
    pub fn history(&self) -> &[OpRecord] {
        &self.history
    }

    /// The most recent measurement record, if any
    pub fn last_measurement(&self) -> Option<&MeasurementRecord<S>> {
        self.last_measurement.as_ref()
    }

    /// One history line per operation
    pub fn format_history(&self) -> String {
        self.history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply any single-qubit catalog gate to `target`
    ///
    /// Validates the operand, expands the gate to full system dimension,
    /// replaces the state, and appends a history record. The named gate
    /// methods all route through here.
    pub fn apply_gate(&mut self, gate: StandardGate, target: impl Into<QubitId>) -> Result<()> {
        let target = target.into();
        self.check(gate.name(), &[target])?;
        let op = expand::single(self.num_qubits, target, &gate.matrix());
        self.state.apply(&op)?;

        let mut operands = vec![target.index().to_string()];
        if let StandardGate::Phase(lambda) = gate {
            operands.push(lambda.to_string());
        }
        self.push_record(gate.name(), operands);
        Ok(())
    }

    /// Pauli-X (NOT) on `target`
    pub fn x(&mut self, target: impl Into<QubitId>) -> Result<()> {
        self.apply_gate(StandardGate::PauliX, target)
    }

    /// Pauli-Y on `target`
    pub fn y(&mut self, target: impl Into<QubitId>) -> Result<()> {
        self.apply_gate(StandardGate::PauliY, target)
    }

    /// Pauli-Z on `target`
    pub fn z(&mut self, target: impl Into<QubitId>) -> Result<()> {
        self.apply_gate(StandardGate::PauliZ, target)
    }

    /// Hadamard on `target`
    pub fn h(&mut self, target: impl Into<QubitId>) -> Result<()> {
        self.apply_gate(StandardGate::Hadamard, target)
    }

    /// Phase rotation U1(λ) on `target`
    pub fn u1(&mut self, target: impl Into<QubitId>, lambda: f64) -> Result<()> {
        self.apply_gate(StandardGate::Phase(lambda), target)
    }

    /// Controlled-X: flip `target` iff `control` is |1⟩
    pub fn cx(
        &mut self,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> Result<()> {
        let (control, target) = (control.into(), target.into());
        self.check("CX", &[control, target])?;
        let (op0, op1) = expand::controlled(
            self.num_qubits,
            control,
            target,
            &StandardGate::PauliX.matrix(),
        );
        self.state.apply(&(&op0 + &op1))?;
        self.push_record(
            "CX",
            [control.index().to_string(), target.index().to_string()],
        );
        Ok(())
    }

    /// Alias for [`Simulator::cx`]
    pub fn cnot(
        &mut self,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> Result<()> {
        self.cx(control, target)
    }

    /// Controlled phase rotation: U1(λ) on `target` iff `control` is |1⟩
    pub fn cu1(
        &mut self,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
        lambda: f64,
    ) -> Result<()> {
        let (control, target) = (control.into(), target.into());
        self.check("CU1", &[control, target])?;
        let (op0, op1) = expand::controlled(
            self.num_qubits,
            control,
            target,
            &StandardGate::Phase(lambda).matrix(),
        );
        self.state.apply(&(&op0 + &op1))?;
        self.push_record(
            "CU1",
            [
                control.index().to_string(),
                target.index().to_string(),
                lambda.to_string(),
            ],
        );
        Ok(())
    }

    /// Doubly controlled X: flip `target` iff both controls are |1⟩
    pub fn ccx(
        &mut self,
        control1: impl Into<QubitId>,
        control2: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> Result<()> {
        let (control1, control2, target) = (control1.into(), control2.into(), target.into());
        self.check("CCX", &[control1, control2, target])?;
        let (op0, op1) = expand::doubly_controlled(
            self.num_qubits,
            control1,
            control2,
            target,
            &StandardGate::PauliX.matrix(),
        );
        self.state.apply(&(&op0 + &op1))?;
        self.push_record(
            "CCX",
            [
                control1.index().to_string(),
                control2.index().to_string(),
                target.index().to_string(),
            ],
        );
        Ok(())
    }

    /// Alias for [`Simulator::ccx`]
    pub fn toffoli(
        &mut self,
        control1: impl Into<QubitId>,
        control2: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> Result<()> {
        self.ccx(control1, control2, target)
    }

    /// Density matrix of the current state
    pub fn density_matrix(&self) -> DensityMatrix<S> {
        DensityMatrix::from_state(&self.state)
    }

    /// Tr(ρ²) of the current state; 1 for any pure state
    pub fn purity(&self) -> S {
        self.density_matrix().purity()
    }

    /// Probability of `target` reading 0 and 1
    ///
    /// Overwrites the last-measurement record; the state is not collapsed.
    pub fn measure_single(&mut self, target: impl Into<QubitId>) -> Result<(S, S)> {
        let target = target.into();
        let (p0, p1) = measurement::measure_single(&self.state, target)
            .map_err(|source| operand_error("Measure", source))?;
        self.push_record("Measure", [target.index().to_string()]);
        self.last_measurement = Some(MeasurementRecord::new(
            vec![target],
            vec![p0.clone(), p1.clone()],
        ));
        Ok((p0, p1))
    }

    /// Joint outcome probabilities for a subset of qubits
    ///
    /// Targets are sorted ascending; bit b of an outcome index addresses the
    /// b-th smallest target. Overwrites the last-measurement record; the
    /// state is not collapsed.
    pub fn measure<Q: Into<QubitId> + Copy>(
        &mut self,
        targets: &[Q],
    ) -> Result<MeasurementRecord<S>> {
        let operands: SmallVec<[QubitId; 4]> = targets.iter().map(|&q| q.into()).collect();
        let record = measurement::measure(&self.state, &operands)
            .map_err(|source| operand_error("Measure", source))?;
        self.push_record(
            "Measure",
            record.qubits().iter().map(|q| q.index().to_string()),
        );
        self.last_measurement = Some(record.clone());
        Ok(record)
    }

    fn check(&self, gate: &'static str, operands: &[QubitId]) -> Result<()> {
        expand::check_operands(self.num_qubits, operands)
            .map_err(|source| SimulatorError::invalid_operand(gate, source))
    }

    fn push_record(&mut self, name: &str, operands: impl IntoIterator<Item = String>) {
        self.history.push(OpRecord::new(name, operands));
    }
}

impl Simulator<Expr> {
    /// Create a symbolic simulator with qubit i initialized to
    /// `a{i}|0⟩ + b{i}|1⟩` over fresh symbols
    pub fn symbolic(num_qubits: usize) -> Result<Self> {
        let mut qubit_states = Vec::with_capacity(num_qubits);
        for i in 1..=num_qubits {
            qubit_states.push([
                Expr::symbol(format!("a{i}")),
                Expr::symbol(format!("b{i}")),
            ]);
        }
        let state = StateVector::from_qubit_states(&qubit_states)?;
        Ok(Self {
            num_qubits,
            state,
            history: Vec::new(),
            last_measurement: None,
        })
    }
}

impl<S: Scalar> fmt::Display for Simulator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

fn operand_error(gate: &'static str, source: StateError) -> SimulatorError {
    match source {
        StateError::InvalidQubitIndex { .. }
        | StateError::DuplicateQubit(_)
        | StateError::EmptyMeasurement => SimulatorError::invalid_operand(gate, source),
        other => SimulatorError::State(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kronq_core::Complex64;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_creation_bounds() {
        assert!(NumericSimulator::new(0).is_err());
        assert!(NumericSimulator::new(3).is_ok());
    }

    #[test]
    fn test_invalid_operand_is_rejected_before_expansion() {
        let mut sim = NumericSimulator::new(2).unwrap();
        let before = sim.state().clone();

        assert!(matches!(
            sim.x(3),
            Err(SimulatorError::InvalidOperand { gate: "X", .. })
        ));
        assert!(matches!(
            sim.cx(1, 1),
            Err(SimulatorError::InvalidOperand { gate: "CX", .. })
        ));
        assert!(matches!(
            sim.ccx(1, 2, 2),
            Err(SimulatorError::InvalidOperand { gate: "CCX", .. })
        ));

        // failed calls leave the state and history untouched
        assert_eq!(sim.state(), &before);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn test_apply_gate_by_descriptor() {
        let mut sim = NumericSimulator::new(1).unwrap();
        sim.apply_gate(StandardGate::Identity, 1).unwrap();
        assert_relative_eq!(sim.state().amplitude(0).re, 1.0, epsilon = EPSILON);
        assert_eq!(sim.format_history(), "ID(1)");
    }

    #[test]
    fn test_history_records_operations() {
        let mut sim = NumericSimulator::new(2).unwrap();
        sim.h(1).unwrap();
        sim.cnot(1, 2).unwrap();
        sim.u1(2, 0.5).unwrap();
        sim.measure(&[1, 2]).unwrap();

        assert_eq!(
            sim.format_history(),
            "H(1)\nCX(1,2)\nU1(2,0.5)\nMeasure(1,2)"
        );
    }

    #[test]
    fn test_cu1_applies_phase_only_when_control_set() {
        // |11⟩ picks up e^{iπ} = -1; |01⟩ does not
        let mut sim = NumericSimulator::new(2).unwrap();
        sim.x(1).unwrap();
        sim.x(2).unwrap();
        sim.cu1(1, 2, PI).unwrap();
        let amp = sim.state().amplitude(3);
        assert_relative_eq!(amp.re, -1.0, epsilon = EPSILON);

        let mut sim = NumericSimulator::new(2).unwrap();
        sim.x(2).unwrap();
        sim.cu1(1, 2, PI).unwrap();
        let amp = sim.state().amplitude(1);
        assert_relative_eq!(amp.re, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_last_measurement_is_overwritten() {
        let mut sim = NumericSimulator::new(2).unwrap();
        sim.measure(&[1, 2]).unwrap();
        assert_eq!(sim.last_measurement().unwrap().num_outcomes(), 4);

        sim.measure_single(1).unwrap();
        assert_eq!(sim.last_measurement().unwrap().num_outcomes(), 2);
    }

    #[test]
    fn test_measure_single_probabilities() {
        let mut sim = NumericSimulator::new(1).unwrap();
        sim.h(1).unwrap();
        let (p0, p1) = sim.measure_single(1).unwrap();
        assert_relative_eq!(p0.re, 0.5, epsilon = EPSILON);
        assert_relative_eq!(p1.re, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_display_renders_current_state() {
        let mut sim = NumericSimulator::new(2).unwrap();
        sim.x(2).unwrap();
        assert_eq!(sim.to_string(), "(1+0i)|01⟩");
    }

    #[test]
    fn test_purity_scalar_type() {
        let sim = NumericSimulator::new(2).unwrap();
        let purity: Complex64 = sim.purity();
        assert_relative_eq!(purity.re, 1.0, epsilon = EPSILON);
    }
}
