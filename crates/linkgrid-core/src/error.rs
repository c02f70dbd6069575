//! Error types for linkgrid-core

use std::fmt;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Which dimension of the mesh an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Errors that can occur in linkgrid-core
///
/// Every validation error is raised before the mesh is touched, so a caller
/// that receives one can keep using the mesh exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Row or column index outside the range accepted by an insert or remove
    #[error("Invalid {axis} index {index} (count: {count})")]
    InvalidIndex {
        axis: Axis,
        index: usize,
        count: usize,
    },

    /// Cell coordinate outside the current mesh
    #[error("Invalid coordinate ({row}, {col}) for a {rows}x{cols} mesh")]
    InvalidCoordinate {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Requested dimensions cannot describe a mesh
    #[error("Invalid mesh dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },

    /// Input rows passed to a constructor differ in length
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The cell arena could not grow
    #[error("Failed to allocate {cells} cells")]
    AllocationFailure { cells: usize },

    /// Linked structure does not form a consistent rectangle
    #[error("Mesh topology is inconsistent: {0}")]
    Topology(String),
}

impl Error {
    pub(crate) fn invalid_index(axis: Axis, index: usize, count: usize) -> Self {
        Error::InvalidIndex { axis, index, count }
    }

    pub(crate) fn invalid_dimensions(rows: usize, cols: usize) -> Self {
        Error::InvalidDimensions {
            rows: i64::try_from(rows).unwrap_or(i64::MAX),
            cols: i64::try_from(cols).unwrap_or(i64::MAX),
        }
    }

    /// Create a topology error with a message
    pub fn topology<S: Into<String>>(msg: S) -> Self {
        Error::Topology(msg.into())
    }

    /// Whether the error was raised by argument validation (the mesh is untouched)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidIndex { .. }
                | Error::InvalidCoordinate { .. }
                | Error::InvalidDimensions { .. }
                | Error::RaggedRow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_index(Axis::Row, 7, 3);
        assert_eq!(err.to_string(), "Invalid row index 7 (count: 3)");

        let err = Error::InvalidCoordinate {
            row: 2,
            col: 9,
            rows: 3,
            cols: 3,
        };
        assert_eq!(err.to_string(), "Invalid coordinate (2, 9) for a 3x3 mesh");

        let err = Error::InvalidDimensions { rows: -1, cols: 4 };
        assert_eq!(err.to_string(), "Invalid mesh dimensions: -1x4");

        let err = Error::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "Row 1 has 2 values, expected 3");
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::invalid_index(Axis::Column, 1, 0).is_validation());
        assert!(Error::invalid_dimensions(usize::MAX, 2).is_validation());
        assert!(!Error::AllocationFailure { cells: 10 }.is_validation());
        assert!(!Error::topology("broken").is_validation());
    }
}
