//! External image collaborators.
//!
//! The session never decodes pixels; it only asks an [`ImageProbe`] for the
//! pixel size of an image to derive the grid dimensions.

mod probe;

pub use probe::{FixedProbe, ImageCrateProbe, ImageProbe, ProbeError, grid_size_for};
