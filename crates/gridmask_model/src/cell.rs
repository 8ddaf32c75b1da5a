//! Per-cell selection state.

use std::fmt;

use crate::error::GridError;

/// State of a single grid cell.
///
/// The integer values are part of the selection-file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum CellState {
    /// Cell may not be selected.
    Forbidden = -1,
    /// Unselected cell.
    #[default]
    Default = 0,
    /// Selected cell.
    Selected = 1,
}

impl CellState {
    /// All states in ascending order of their integer value.
    pub const ALL: [CellState; 3] = [CellState::Forbidden, CellState::Default, CellState::Selected];

    /// Integer value as written to selection files.
    pub fn value(self) -> i32 {
        self as i32
    }

    /// The opposite selection state. `Forbidden` has no opposite.
    pub fn toggled(self) -> Option<CellState> {
        match self {
            CellState::Default => Some(CellState::Selected),
            CellState::Selected => Some(CellState::Default),
            CellState::Forbidden => None,
        }
    }

    /// Single character used by the ASCII rendering.
    pub fn symbol(self) -> char {
        match self {
            CellState::Forbidden => 'x',
            CellState::Default => '.',
            CellState::Selected => '#',
        }
    }
}

impl TryFrom<i32> for CellState {
    type Error = GridError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(CellState::Forbidden),
            0 => Ok(CellState::Default),
            1 => Ok(CellState::Selected),
            other => Err(GridError::InvalidState(other)),
        }
    }
}

impl From<CellState> for i32 {
    fn from(state: CellState) -> Self {
        state.value()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Forbidden => "forbidden",
            CellState::Default => "default",
            CellState::Selected => "selected",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_values() {
        assert_eq!(CellState::Forbidden.value(), -1);
        assert_eq!(CellState::Default.value(), 0);
        assert_eq!(CellState::Selected.value(), 1);
    }

    #[test]
    fn test_try_from_rejects_unknown_values() {
        for state in CellState::ALL {
            assert_eq!(CellState::try_from(state.value()), Ok(state));
        }
        assert_eq!(CellState::try_from(2), Err(GridError::InvalidState(2)));
        assert_eq!(CellState::try_from(-2), Err(GridError::InvalidState(-2)));
    }

    #[test]
    fn test_toggled() {
        assert_eq!(CellState::Default.toggled(), Some(CellState::Selected));
        assert_eq!(CellState::Selected.toggled(), Some(CellState::Default));
        assert_eq!(CellState::Forbidden.toggled(), None);
    }
}
