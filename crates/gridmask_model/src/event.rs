use crate::cell::CellState;

/// Change notification produced by a grid mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// Grid was re-created with new dimensions.
    DimensionsChanged {
        /// New width in cells
        width: usize,
        /// New height in cells
        height: usize,
    },
    /// A single cell took a new state.
    CellChanged {
        /// Column of the changed cell
        x: usize,
        /// Row of the changed cell
        y: usize,
        /// The state now stored in the cell
        state: CellState,
    },
    /// All cell contents should be considered changed.
    Reset,
}
