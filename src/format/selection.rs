//! Plain-text selection file.
//!
//! One file per image, next to it, with the image extension replaced by
//! `.txt`:
//!
//! ```text
//! <cell size>,<width>,<height>
//! <x>,<y>,<state>
//! ...
//! ```
//!
//! Data lines are written for every cell in row-major order (x varies
//! fastest). `state` is the integer value of a [`CellState`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use gridmask_model::{CellState, Grid};
use ndarray::Array2;

use crate::constants::MAX_GRID_CELLS;
use crate::format::error::FormatError;

/// Extension of selection files, without the dot.
pub const SELECTION_EXTENSION: &str = "txt";

/// Path of the selection file belonging to `image`.
///
/// The extension after the last `.` of the file name is replaced by `.txt`,
/// or `.txt` is appended if there is none.
pub fn selection_path_for(image: &Path) -> PathBuf {
    image.with_extension(SELECTION_EXTENSION)
}

/// First line of a selection file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionHeader {
    /// Edge length of one cell in image pixels
    pub cell_size: u32,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl SelectionHeader {
    /// Parse a `<cell size>,<width>,<height>` line.
    ///
    /// The grid may hold at most [`MAX_GRID_CELLS`] cells.
    pub fn parse(line: &str) -> Result<Self, FormatError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(FormatError::invalid_header(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        }

        let cell_size: u32 = parse_header_field(fields[0], "cell size")?;
        let width: usize = parse_header_field(fields[1], "width")?;
        let height: usize = parse_header_field(fields[2], "height")?;

        if cell_size == 0 {
            return Err(FormatError::invalid_header("cell size must be positive"));
        }

        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(FormatError::invalid_header(format!(
                    "grid {}x{} exceeds {} cells",
                    width, height, MAX_GRID_CELLS
                )));
            }
        }

        Ok(Self {
            cell_size,
            width,
            height,
        })
    }
}

impl fmt::Display for SelectionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.cell_size, self.width, self.height)
    }
}

fn parse_header_field<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, FormatError> {
    value
        .parse()
        .map_err(|_| FormatError::invalid_header(format!("{} '{}' is not an unsigned integer", name, value)))
}

/// Contents of a selection file: the cell size and the grid it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFile {
    /// Edge length of one cell in image pixels
    pub cell_size: u32,
    /// Cell states
    pub grid: Grid,
}

impl SelectionFile {
    /// Parse selection text.
    ///
    /// Blank lines are skipped. Any malformed data line fails the whole
    /// parse. Cells without a line stay `Default`; a repeated cell keeps the
    /// last value.
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        let mut lines = content.lines().enumerate();
        let (_, header_line) = lines.next().ok_or(FormatError::EmptyFile)?;
        let header = SelectionHeader::parse(header_line)?;

        let mut cells = Array2::from_elem((header.height, header.width), CellState::Default);

        for (index, raw) in lines {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
            if fields.len() != 3 {
                return Err(FormatError::malformed_line(
                    line,
                    format!("expected 3 fields, found {}", fields.len()),
                ));
            }

            let x: usize = parse_data_field(fields[0], line, "x")?;
            let y: usize = parse_data_field(fields[1], line, "y")?;
            let value: i32 = parse_data_field(fields[2], line, "state")?;

            let state = CellState::try_from(value)
                .map_err(|_| FormatError::InvalidState { line, value })?;

            let Some(cell) = cells.get_mut([y, x]) else {
                return Err(FormatError::CellOutOfRange {
                    line,
                    x,
                    y,
                    width: header.width,
                    height: header.height,
                });
            };
            *cell = state;
        }

        Ok(Self {
            cell_size: header.cell_size,
            grid: Grid::from(cells),
        })
    }

    /// Read and parse a selection file.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let content = std::fs::read_to_string(path)?;
        let selection = Self::parse(&content)?;
        log::debug!(
            "Loaded selection {:?}: {}x{} cells of {}px",
            path,
            selection.grid.width(),
            selection.grid.height(),
            selection.cell_size
        );
        Ok(selection)
    }

    /// Header describing this selection.
    pub fn header(&self) -> SelectionHeader {
        SelectionHeader {
            cell_size: self.cell_size,
            width: self.grid.width(),
            height: self.grid.height(),
        }
    }
}

fn parse_data_field<T: std::str::FromStr>(
    value: &str,
    line: usize,
    name: &str,
) -> Result<T, FormatError> {
    value
        .parse()
        .map_err(|_| FormatError::malformed_line(line, format!("{} '{}' is not a valid integer", name, value)))
}

/// Write `grid` in selection format.
///
/// Every cell is written, including `Default` ones.
pub fn write_selection<W: Write>(writer: &mut W, cell_size: u32, grid: &Grid) -> io::Result<()> {
    let header = SelectionHeader {
        cell_size,
        width: grid.width(),
        height: grid.height(),
    };
    writeln!(writer, "{}", header)?;

    for (x, y, state) in grid.cells() {
        writeln!(writer, "{},{},{}", x, y, state.value())?;
    }
    Ok(())
}

/// Render `grid` as selection text.
pub fn to_selection_string(cell_size: u32, grid: &Grid) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_selection(&mut buffer, cell_size, grid);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Write `grid` to the selection file at `path`, replacing it.
pub fn save_selection(path: &Path, cell_size: u32, grid: &Grid) -> Result<(), FormatError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_selection(&mut writer, cell_size, grid)?;
    writer.flush()?;
    log::info!(
        "💾 Saved selection {:?} ({}x{}, {} selected)",
        path,
        grid.width(),
        grid.height(),
        grid.count(CellState::Selected)
    );
    Ok(())
}
