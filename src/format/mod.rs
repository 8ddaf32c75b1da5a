//! Persistence of grid selections.
//!
//! ## Formats
//!
//! - **Selection file** (`.txt`): canonical per-image record of the cell
//!   size, grid dimensions and every cell state. Read and written.
//! - **Mask raster** (`masks/<stem>.png`): grayscale rendering of the
//!   selection at image resolution. Export only.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridmask::format::{SelectionFile, save_selection, selection_path_for};
//!
//! let path = selection_path_for(image);
//! save_selection(&path, 100, &grid)?;
//! let loaded = SelectionFile::load(&path)?;
//! ```

mod error;
mod mask;
mod selection;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use mask::{MASKS_SUBDIR, export_mask, mask_path_for, mask_value, render_mask};
pub use selection::{
    SELECTION_EXTENSION, SelectionFile, SelectionHeader, save_selection, selection_path_for,
    to_selection_string, write_selection,
};
