//! Image dimension probing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Error type for probe operations.
#[derive(Debug, thiserror::Error)]
#[error("Failed to read dimensions of {path:?}: {message}")]
pub struct ProbeError {
    /// Image that could not be probed.
    pub path: PathBuf,
    /// Human-readable error message.
    pub message: String,
}

impl ProbeError {
    /// Create a new probe error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Source of image pixel dimensions.
///
/// Only the size of an image is ever needed; nothing is decoded for display.
pub trait ImageProbe {
    /// Pixel `(width, height)` of the image at `path`.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError>;
}

/// Probe backed by the `image` crate (reads headers only).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateProbe;

impl ImageProbe for ImageCrateProbe {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        image::image_dimensions(path).map_err(|e| ProbeError::new(path, e.to_string()))
    }
}

/// Probe answering from a fixed table, for callers that already know sizes.
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    sizes: HashMap<PathBuf, (u32, u32)>,
}

impl FixedProbe {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the size of `path`.
    pub fn with(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.sizes.insert(path.into(), (width, height));
        self
    }
}

impl ImageProbe for FixedProbe {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        self.sizes
            .get(path)
            .copied()
            .ok_or_else(|| ProbeError::new(path, "unknown image"))
    }
}

/// Grid size for an image: `round(pixels / cell_size)` on each axis.
///
/// `cell_size` must be positive.
pub fn grid_size_for(pixel_width: u32, pixel_height: u32, cell_size: u32) -> (usize, usize) {
    let cell = f64::from(cell_size.max(1));
    let width = (f64::from(pixel_width) / cell).round() as usize;
    let height = (f64::from(pixel_height) / cell).round() as usize;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_rounds() {
        assert_eq!(grid_size_for(1000, 600, 100), (10, 6));
        assert_eq!(grid_size_for(1049, 650, 100), (10, 7));
        assert_eq!(grid_size_for(1050, 649, 100), (11, 6));
        assert_eq!(grid_size_for(40, 40, 100), (0, 0));
        assert_eq!(grid_size_for(0, 0, 100), (0, 0));
    }

    #[test]
    fn test_fixed_probe() {
        let probe = FixedProbe::new().with("a.png", 640, 480);
        assert_eq!(probe.dimensions(Path::new("a.png")).unwrap(), (640, 480));
        assert!(probe.dimensions(Path::new("b.png")).is_err());
    }

    #[test]
    fn test_image_crate_probe_reads_png_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        image::GrayImage::new(12, 7).save(&path).unwrap();

        assert_eq!(ImageCrateProbe.dimensions(&path).unwrap(), (12, 7));
        assert!(ImageCrateProbe.dimensions(&dir.path().join("nope.png")).is_err());
    }
}
