//! Grid selection model for GridMask.
//!
//! A [`Grid`] is a dense, row-major matrix of [`CellState`]s addressed by
//! `(x, y)` = (column, row). Every mutating operation returns the
//! [`GridEvent`]s it produced so the owner can forward them to observers.
//!
//! ```
//! use gridmask_model::{CellState, Grid, GridEvent};
//!
//! let mut grid = Grid::new();
//! grid.init_uniform(3, 2);
//! let events = grid.set(1, 0, CellState::Selected);
//! assert_eq!(events[0], GridEvent::CellChanged { x: 1, y: 0, state: CellState::Selected });
//! assert_eq!(grid.get(1, 0), Ok(CellState::Selected));
//! ```

mod cell;
mod error;
mod event;
mod grid;

pub use cell::CellState;
pub use error::{GridError, Result};
pub use event::GridEvent;
pub use grid::{Cells, Grid};
