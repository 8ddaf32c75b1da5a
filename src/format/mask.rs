//! Grayscale mask raster export.
//!
//! The mask is derived from the selection and written on request only. It is
//! never read back; the selection file stays the source of truth.

use std::path::{Path, PathBuf};

use gridmask_model::{CellState, Grid};
use image::{GrayImage, Luma};

use crate::format::error::FormatError;

/// Subdirectory (next to the images) that receives exported masks.
pub const MASKS_SUBDIR: &str = "masks";

/// Gray level written for a cell state.
pub fn mask_value(state: CellState) -> u8 {
    match state {
        CellState::Selected => 255,
        CellState::Forbidden => 128,
        CellState::Default => 0,
    }
}

/// Path of the mask belonging to `image`: `<dir>/masks/<stem>.png`.
pub fn mask_path_for(image: &Path) -> PathBuf {
    let dir = image.parent().unwrap_or_else(|| Path::new(""));
    let mut name = image
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(".png");
    dir.join(MASKS_SUBDIR).join(name)
}

fn scaled(cells: usize, cell_size: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(cell_size)
}

/// Render `grid` with `cell_size` pixels per cell edge.
///
/// Fails when the raster size does not fit in `u32`.
pub fn render_mask(grid: &Grid, cell_size: u32) -> Result<GrayImage, FormatError> {
    let too_large = || FormatError::MaskTooLarge {
        width: grid.width(),
        height: grid.height(),
        cell_size,
    };
    let width = scaled(grid.width(), cell_size).ok_or_else(too_large)?;
    let height = scaled(grid.height(), cell_size).ok_or_else(too_large)?;

    Ok(GrayImage::from_fn(width, height, |px, py| {
        let x = (px / cell_size) as usize;
        let y = (py / cell_size) as usize;
        Luma([mask_value(grid.get_or_default(x, y))])
    }))
}

/// Render and write the mask PNG to `path`, creating the parent directory.
pub fn export_mask(path: &Path, grid: &Grid, cell_size: u32) -> Result<(), FormatError> {
    let mask = render_mask(grid, cell_size)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    mask.save(path)?;
    log::info!(
        "🖼️ Exported mask {:?} ({}x{} px)",
        path,
        mask.width(),
        mask.height()
    );
    Ok(())
}
