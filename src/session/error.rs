//! Error types for session operations.

use thiserror::Error;

use crate::data::ProbeError;
use crate::format::FormatError;
use crate::state::ScanError;

/// Errors that can occur while opening, navigating or saving images.
///
/// None of these are fatal; the session stays usable after any of them.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Image dimensions could not be read
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Image folder could not be enumerated
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Selection or mask file could not be written
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Image would need more cells than a grid may hold
    #[error("Grid of {width}x{height} cells is too large, lower the cell size")]
    GridTooLarge {
        /// Width in cells
        width: usize,
        /// Height in cells
        height: usize,
    },

    /// Cell size of zero pixels requested
    #[error("Cell size must be a positive number of pixels, got {0}")]
    InvalidCellSize(u32),
}

/// Type alias for session results.
pub type Result<T> = std::result::Result<T, SessionError>;
