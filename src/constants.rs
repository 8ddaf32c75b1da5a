//! Global constants for GridMask

/// Default cell edge length in pixels
pub const DEFAULT_CELL_SIZE: u32 = 100;

/// Largest grid, in cells, that a selection file or image may describe
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Prompt printed by the command shell
pub const SHELL_PROMPT: &str = "gridmask> ";
