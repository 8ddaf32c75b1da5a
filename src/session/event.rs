use std::path::PathBuf;

use gridmask_model::GridEvent;

/// Notification dispatched to session observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The owned grid changed.
    Grid(GridEvent),
    /// A new image is current.
    ImageChanged {
        /// Path of the opened image
        path: PathBuf,
        /// 1-based position in the folder list, 0 when the list is empty
        number: usize,
        /// Number of images in the folder list
        total: usize,
    },
    /// No image is current anymore.
    ImageClosed,
    /// Cell edge length in pixels changed.
    CellSizeChanged(u32),
    /// A folder was opened but contained no images.
    NoImages {
        /// The scanned folder
        dir: PathBuf,
    },
    /// The selection file of the current image was written.
    SelectionSaved {
        /// Path of the written file
        path: PathBuf,
    },
    /// A mask raster was exported.
    MaskExported {
        /// Path of the written PNG
        path: PathBuf,
    },
}
