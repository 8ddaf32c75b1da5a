//! Dense cell-state matrix.

use std::fmt;

use ndarray::{iter::IndexedIter, Array2, Ix2};

use crate::cell::CellState;
use crate::error::{GridError, Result};
use crate::event::GridEvent;

/// Rectangular matrix of cell states.
///
/// Backed by an `Array2` of shape `(height, width)`; cell `(x, y)` lives at
/// `[y, x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<CellState>,
}

impl Grid {
    /// Create an empty 0x0 grid.
    pub fn new() -> Self {
        Self {
            cells: Array2::default((0, 0)),
        }
    }

    /// Create a `width x height` grid with every cell `Default`.
    pub fn uniform(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), CellState::Default),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Whether the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Replace the whole grid with a `width x height` matrix of `Default` cells.
    pub fn init_uniform(&mut self, width: usize, height: usize) -> Vec<GridEvent> {
        log::debug!("Grid: uniform init {}x{}", width, height);
        self.replace(Array2::from_elem((height, width), CellState::Default))
    }

    /// Replace the whole grid with caller-supplied rows.
    ///
    /// Fails without touching the grid if the rows differ in length.
    pub fn init_from_matrix(&mut self, rows: Vec<Vec<CellState>>) -> Result<Vec<GridEvent>> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridError::RaggedMatrix {
                row,
                expected: width,
                found,
            });
        }

        let cells = Array2::from_shape_fn((height, width), |(y, x)| rows[y][x]);
        Ok(self.replace(cells))
    }

    /// Replace the whole grid with an already-shaped array.
    pub fn init_from_array(&mut self, cells: Array2<CellState>) -> Vec<GridEvent> {
        self.replace(cells)
    }

    fn replace(&mut self, cells: Array2<CellState>) -> Vec<GridEvent> {
        self.cells = cells;
        vec![
            GridEvent::DimensionsChanged {
                width: self.width(),
                height: self.height(),
            },
            GridEvent::Reset,
        ]
    }

    /// State of cell `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        self.cells
            .get([y, x])
            .copied()
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
    }

    /// State of cell `(x, y)`, or `Default` when out of bounds.
    pub fn get_or_default(&self, x: usize, y: usize) -> CellState {
        self.get(x, y).unwrap_or_default()
    }

    /// Write `state` into cell `(x, y)`.
    ///
    /// Returns no events when the coordinate is out of bounds or the cell
    /// already holds `state`. An actual change yields `CellChanged` followed
    /// by `Reset`, so views refresh as a whole after every single-cell edit.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Vec<GridEvent> {
        let (width, height) = (self.width(), self.height());
        let Some(cell) = self.cells.get_mut([y, x]) else {
            log::warn!(
                "Grid: ignoring write to ({}, {}) outside {}x{}",
                x,
                y,
                width,
                height
            );
            return Vec::new();
        };

        if *cell == state {
            return Vec::new();
        }

        *cell = state;
        vec![GridEvent::CellChanged { x, y, state }, GridEvent::Reset]
    }

    /// Flip cell `(x, y)` between `Default` and `Selected`.
    ///
    /// `Forbidden` cells stay as they are.
    pub fn toggle(&mut self, x: usize, y: usize) -> Vec<GridEvent> {
        match self.get(x, y) {
            Ok(current) => match current.toggled() {
                Some(next) => self.set(x, y, next),
                None => {
                    log::debug!("Grid: cell ({}, {}) is forbidden, not toggling", x, y);
                    Vec::new()
                }
            },
            Err(e) => {
                log::warn!("Grid: {}", e);
                Vec::new()
            }
        }
    }

    /// Set every cell to `state`.
    pub fn fill(&mut self, state: CellState) -> Vec<GridEvent> {
        if self.cells.iter().all(|&cell| cell == state) {
            return Vec::new();
        }
        self.cells.fill(state);
        vec![GridEvent::Reset]
    }

    /// Number of cells holding `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Iterate over `(x, y, state)` in row-major order (x varies fastest).
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            inner: self.cells.indexed_iter(),
        }
    }

    /// Copy the grid out as a vector of rows.
    pub fn to_matrix(&self) -> Vec<Vec<CellState>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Underlying `(height, width)` array.
    pub fn as_array(&self) -> &Array2<CellState> {
        &self.cells
    }

    /// Take the underlying array.
    pub fn into_array(self) -> Array2<CellState> {
        self.cells
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Array2<CellState>> for Grid {
    fn from(cells: Array2<CellState>) -> Self {
        Self { cells }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Row-major iterator over the cells of a [`Grid`].
pub struct Cells<'a> {
    inner: IndexedIter<'a, CellState, Ix2>,
}

impl Iterator for Cells<'_> {
    type Item = (usize, usize, CellState);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|((y, x), &state)| (x, y, state))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
