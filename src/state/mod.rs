//! Application state management modules.

mod project;

pub use project::{IMAGE_EXTENSIONS, ProjectState, ScanError, is_image_file};
