//! Error types for the simulator engine

use kronq_state::StateError;
use thiserror::Error;

/// Errors surfaced by the simulator's public API
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// A gate or measurement call received invalid qubit operands
    ///
    /// Raised at the offending call, before any operator is expanded; an
    /// invalid operand must never reach the tensor expansion.
    #[error("invalid operand for {gate}: {source}")]
    InvalidOperand {
        gate: &'static str,
        #[source]
        source: StateError,
    },

    /// A state-layer failure (construction bounds, internal dimension checks)
    #[error(transparent)]
    State(#[from] StateError),
}

impl SimulatorError {
    pub(crate) fn invalid_operand(gate: &'static str, source: StateError) -> Self {
        Self::InvalidOperand { gate, source }
    }
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kronq_core::QubitId;

    #[test]
    fn test_invalid_operand_names_gate() {
        let err = SimulatorError::invalid_operand(
            "CX",
            StateError::DuplicateQubit(QubitId::new(1)),
        );
        let msg = err.to_string();
        assert!(msg.contains("CX"));
        assert!(msg.contains("q1"));
    }
}
