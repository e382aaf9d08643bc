//! Operator expansion to full system dimension
//!
//! Every function here walks the tensor slots in qubit order (qubit 1 first,
//! therefore leftmost in the Kronecker fold) and places a factor by
//! comparing the slot against the operand ids. The qubit-to-slot mapping is
//! this explicit comparison, never an implicit loop position, so the
//! ordering contract is auditable on its own.
//!
//! Callers validate operands with [`check_operands`] before expanding;
//! expansion itself assumes valid input. An out-of-range or colliding index
//! would silently double-assign a tensor slot, which is exactly the failure
//! the validation step exists to rule out.

use crate::error::{Result, StateError};
use kronq_core::{Matrix, QubitId, Scalar};
use kronq_gates::Projector;

/// Validate gate/measurement operands: each in [1, N], pairwise distinct
pub fn check_operands(num_qubits: usize, operands: &[QubitId]) -> Result<()> {
    for q in operands {
        if q.index() < 1 || q.index() > num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: q.index(),
                num_qubits,
            });
        }
    }
    for i in 0..operands.len() {
        for j in (i + 1)..operands.len() {
            if operands[i] == operands[j] {
                return Err(StateError::DuplicateQubit(operands[i]));
            }
        }
    }
    Ok(())
}

/// Lift a single-qubit gate to the full 2^N dimension
///
/// Identity at every slot except `target`. The result acts directly as a
/// state-transforming operator.
pub fn single<S: Scalar>(num_qubits: usize, target: QubitId, gate: &Matrix<S>) -> Matrix<S> {
    debug_assert!(check_operands(num_qubits, &[target]).is_ok());
    let eye = Matrix::identity(2);
    let mut acc = Matrix::identity(1);
    for slot in 1..=num_qubits {
        let factor = if slot == target.index() { gate } else { &eye };
        acc = acc.kron(factor);
    }
    acc
}

/// Projector-sum decomposition of a controlled gate
///
/// Returns `(op0, op1)` where `op0` places |0⟩⟨0| at the control and
/// identity at the target, and `op1` places |1⟩⟨1| at the control and the
/// gate at the target. Their sum applies the gate iff the control is |1⟩
/// and acts as identity otherwise, with no conditional dispatch at
/// simulation time.
pub fn controlled<S: Scalar>(
    num_qubits: usize,
    control: QubitId,
    target: QubitId,
    gate: &Matrix<S>,
) -> (Matrix<S>, Matrix<S>) {
    debug_assert!(check_operands(num_qubits, &[control, target]).is_ok());
    let eye = Matrix::identity(2);
    let p0 = Projector::Zero.matrix::<S>();
    let p1 = Projector::One.matrix::<S>();

    let mut acc0 = Matrix::identity(1);
    let mut acc1 = Matrix::identity(1);
    for slot in 1..=num_qubits {
        let (f0, f1): (&Matrix<S>, &Matrix<S>) = if slot == control.index() {
            (&p0, &p1)
        } else if slot == target.index() {
            (&eye, gate)
        } else {
            (&eye, &eye)
        };
        acc0 = acc0.kron(f0);
        acc1 = acc1.kron(f1);
    }
    (acc0, acc1)
}

/// Projector-sum decomposition of a doubly controlled gate
///
/// Returns `(op0, op1)` where `op0` is the full identity and `op1` places
/// |1⟩⟨1| at both controls and `(gate − I)` at the target. Summed, the net
/// operator equals the gate exactly when both controls are |1⟩ and the
/// identity otherwise: the correction term vanishes unless both control
/// projectors select their |1⟩ component.
pub fn doubly_controlled<S: Scalar>(
    num_qubits: usize,
    control1: QubitId,
    control2: QubitId,
    target: QubitId,
    gate: &Matrix<S>,
) -> (Matrix<S>, Matrix<S>) {
    debug_assert!(check_operands(num_qubits, &[control1, control2, target]).is_ok());
    let eye = Matrix::identity(2);
    let p1 = Projector::One.matrix::<S>();
    let delta = gate.sub_matrix(&eye);

    let op0 = Matrix::identity(1 << num_qubits);
    let mut acc1 = Matrix::identity(1);
    for slot in 1..=num_qubits {
        let factor = if slot == control1.index() || slot == control2.index() {
            &p1
        } else if slot == target.index() {
            &delta
        } else {
            &eye
        };
        acc1 = acc1.kron(factor);
    }
    (op0, acc1)
}

/// Full-system projector for a joint classical outcome
///
/// Places |0⟩⟨0| or |1⟩⟨1| at each assigned qubit according to its bit and
/// identity everywhere else. Used by measurement to extract the probability
/// of that outcome from the density matrix.
pub fn basis_projector<S: Scalar>(
    num_qubits: usize,
    assignment: &[(QubitId, bool)],
) -> Matrix<S> {
    let eye = Matrix::identity(2);
    let p0 = Projector::Zero.matrix::<S>();
    let p1 = Projector::One.matrix::<S>();

    let mut acc = Matrix::identity(1);
    for slot in 1..=num_qubits {
        let assigned = assignment.iter().find(|(q, _)| q.index() == slot);
        let factor = match assigned {
            Some((_, true)) => &p1,
            Some((_, false)) => &p0,
            None => &eye,
        };
        acc = acc.kron(factor);
    }
    acc
}
