//! Error types for the storage engine.

use thiserror::Error;

/// Result type alias using the engine's [`StorageError`].
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur in storage operations.
///
/// Everything except [`StorageError::StorageCorruption`] is recoverable:
/// the matrix is left exactly as it was before the failed call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Backing storage for anchors or nodes could not be reserved.
    #[error("Allocation failed: could not reserve {requested} {storage}")]
    AllocationFailure {
        /// What was being grown (e.g. "row anchors").
        storage: &'static str,
        /// Requested number of slots.
        requested: usize,
    },

    /// Coordinate is zero or lies outside the current extent.
    #[error("Row or column out of bound: ({row}, {column}) is outside {rows}x{columns}")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// Value cannot be stored (zero or NaN).
    #[error("Invalid value {value}: only non-zero numbers can be stored")]
    InvalidValue { value: f64 },

    /// Matrix created with a zero extent.
    #[error("Invalid extent {rows}x{columns}: both dimensions must be positive")]
    InvalidExtent { rows: usize, columns: usize },

    /// Row chains and column chains disagree.
    #[error("Storage corruption: {detail}")]
    StorageCorruption { detail: String },
}

impl StorageError {
    /// Whether the caller may keep using the matrix after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StorageError::StorageCorruption { .. })
    }

    pub(crate) fn corruption(detail: impl Into<String>) -> Self {
        StorageError::StorageCorruption {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability() {
        let oob = StorageError::OutOfBounds {
            row: 4,
            column: 1,
            rows: 3,
            columns: 3,
        };
        assert!(oob.is_recoverable());
        assert!(StorageError::InvalidValue { value: 0.0 }.is_recoverable());
        assert!(!StorageError::corruption("row chain 2 is cyclic").is_recoverable());
    }

    #[test]
    fn test_messages() {
        let err = StorageError::OutOfBounds {
            row: 4,
            column: 1,
            rows: 3,
            columns: 3,
        };
        assert_eq!(
            err.to_string(),
            "Row or column out of bound: (4, 1) is outside 3x3"
        );
        let err = StorageError::AllocationFailure {
            storage: "row anchors",
            requested: 8,
        };
        assert_eq!(
            err.to_string(),
            "Allocation failed: could not reserve 8 row anchors"
        );
    }
}
