//! Error types for maze encoding and assignment decoding

use thiserror::Error;

/// Errors raised while building a formula or decoding a solver assignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The grid is not square, a row is short, or a cell is not `0`/`1`
    #[error("invalid maze: {reason}")]
    InvalidMaze { reason: String },

    /// Maze side of zero, so no bit width can be derived
    #[error("cannot derive a bit width for a maze of side {size}")]
    DegenerateBitWidth { size: usize },

    /// A cell index does not fit in the derived number of bits
    #[error("cell index {index} does not fit in {num_bits} bits")]
    EncodingOverflow { index: usize, num_bits: usize },

    /// Assignment length does not line up with the variable layout
    #[error("malformed assignment: {reason}")]
    MalformedAssignment { reason: String },

    /// A decoded bit pattern names a cell outside the maze
    #[error("decoded index {index} is outside the maze ({cells} cells)")]
    UnknownLiteral { index: usize, cells: usize },

    /// The formula needs more variables than a DIMACS literal can name
    #[error("formula needs variable {required}, beyond the i32 literal range")]
    TooManyVariables { required: usize },

    /// A transition template clause does not hold two positions' worth of slots
    #[error("template clause {clause} has {found} slots, expected {expected}")]
    MalformedTemplate {
        clause: usize,
        expected: usize,
        found: usize,
    },

    /// A solver output line could not be understood
    #[error("malformed solver output at line {line}: {reason}")]
    MalformedSolverOutput { line: usize, reason: String },
}

impl EncodingError {
    pub(crate) fn invalid_maze(reason: impl Into<String>) -> Self {
        Self::InvalidMaze { reason: reason.into() }
    }

    pub(crate) fn malformed_assignment(reason: impl Into<String>) -> Self {
        Self::MalformedAssignment { reason: reason.into() }
    }
}

pub type EncodingResult<T> = Result<T, EncodingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EncodingError::malformed_assignment("3 values for 2-bit blocks");
        assert_eq!(err.to_string(), "malformed assignment: 3 values for 2-bit blocks");

        let err = EncodingError::UnknownLiteral { index: 9, cells: 9 };
        assert!(err.to_string().contains("outside the maze"));
    }
}
