//! Error types for grid operations.

use thiserror::Error;

/// Errors that can occur when reading or (re)initializing a grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside the current dimensions
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Current grid width
        width: usize,
        /// Current grid height
        height: usize,
    },

    /// Rows of a supplied matrix differ in length
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },

    /// Integer that does not map to a cell state
    #[error("invalid cell state value {0}, expected -1, 0 or 1")]
    InvalidState(i32),
}

/// Type alias for grid results.
pub type Result<T> = core::result::Result<T, GridError>;
