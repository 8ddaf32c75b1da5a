//! GridMask - grid-based image region annotation
//!
//! Overlays a grid of square cells on each image of a folder, lets cells be
//! selected or marked forbidden, and stores the selection in a text file
//! next to the image.

pub mod config;
pub mod constants;
pub mod data;
pub mod format;
pub mod message;
pub mod session;
pub mod shell;
pub mod state;

pub use gridmask_model::{CellState, Grid, GridError, GridEvent};
pub use session::{Session, SessionError, SessionEvent};
