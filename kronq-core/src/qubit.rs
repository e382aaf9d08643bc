//! Qubit addressing and identification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe identifier for a qubit
///
/// Qubits are numbered from 1; qubit 1 is the leftmost (most significant)
/// factor in every tensor product the simulator builds. The ordering is a
/// global invariant, so the id is kept as an explicit value rather than a
/// loop position.
///
/// # Example
/// ```
/// use kronq_core::QubitId;
///
/// let q1 = QubitId::new(1);
/// let q2 = QubitId::new(2);
/// assert!(q1 < q2);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit identifier
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying 1-based index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}
