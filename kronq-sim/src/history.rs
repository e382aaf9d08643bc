//! Operation history records
//!
//! The history is diagnostic only: an append-only list of human-readable
//! descriptors, never consulted by the simulation itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded operation: gate name plus rendered operand list
///
/// # Example
/// ```
/// use kronq_sim::OpRecord;
///
/// let op = OpRecord::new("CX", ["1".to_string(), "2".to_string()]);
/// assert_eq!(op.to_string(), "CX(1,2)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpRecord {
    name: String,
    operands: Vec<String>,
}

impl OpRecord {
    /// Create a record from a name and already-rendered operands
    pub fn new(name: impl Into<String>, operands: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            operands: operands.into_iter().collect(),
        }
    }

    /// The operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendered operands
    pub fn operands(&self) -> &[String] {
        &self.operands
    }
}

impl fmt::Display for OpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", operand)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let op = OpRecord::new("U1", ["2".to_string(), "0.5".to_string()]);
        assert_eq!(op.to_string(), "U1(2,0.5)");
        assert_eq!(op.name(), "U1");
        assert_eq!(op.operands()[0], "2");
        assert_eq!(op.operands()[1], "0.5");
    }

    #[test]
    fn test_single_operand() {
        let op = OpRecord::new("H", ["1".to_string()]);
        assert_eq!(op.to_string(), "H(1)");
    }
}
