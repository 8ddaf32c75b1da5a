//! Error types for selection-file and mask operations.

use thiserror::Error;

/// Errors that can occur while reading or writing selection data.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster encoding error while writing a mask
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Mask raster would not fit in `u32` pixel dimensions
    #[error("Mask for a {width}x{height} grid at {cell_size}px per cell is too large")]
    MaskTooLarge {
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
        /// Cell edge length in pixels
        cell_size: u32,
    },

    /// File contained no header line
    #[error("Selection file is empty")]
    EmptyFile,

    /// Header line is not `<cell size>,<width>,<height>`
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header problem
        message: String,
    },

    /// Data line without exactly three fields, or with a non-numeric field
    #[error("Malformed line {line}: {message}")]
    MalformedLine {
        /// 1-based line number in the file
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// State value outside {-1, 0, 1}
    #[error("Invalid cell state {value} on line {line}")]
    InvalidState {
        /// 1-based line number in the file
        line: usize,
        /// The offending value
        value: i32,
    },

    /// Cell coordinate outside the dimensions declared in the header
    #[error("Cell ({x}, {y}) on line {line} is outside the {width}x{height} grid")]
    CellOutOfRange {
        /// 1-based line number in the file
        line: usize,
        /// Column read from the line
        x: usize,
        /// Row read from the line
        y: usize,
        /// Width declared in the header
        width: usize,
        /// Height declared in the header
        height: usize,
    },
}

impl FormatError {
    /// Create an invalid header error with a message.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a malformed line error.
    pub fn malformed_line(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            message: message.into(),
        }
    }

    /// Whether the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
