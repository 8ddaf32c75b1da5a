//! Session management: the open image, its grid, and folder navigation.
//!
//! A [`Session`] owns the [`Grid`] of the current image and the
//! [`ProjectState`] of the opened folder. Every change is reported to
//! subscribed observers as a [`SessionEvent`], synchronously and after the
//! session state is consistent again. Observers only see shared references
//! and cannot call back into the session.

mod error;
mod event;

use std::path::{Path, PathBuf};

use gridmask_model::{CellState, Grid, GridEvent};

use crate::constants::{DEFAULT_CELL_SIZE, MAX_GRID_CELLS};
use crate::data::{ImageCrateProbe, ImageProbe, grid_size_for};
use crate::format::{self, SelectionFile};
use crate::state::{IMAGE_EXTENSIONS, ProjectState};

pub use error::{Result, SessionError};
pub use event::SessionEvent;

/// Where the grid of a newly opened image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    /// Saved selection file if readable, uniform grid otherwise.
    PreferSaved,
    /// Always a uniform grid at the current cell size.
    Fresh,
}

type Observer = Box<dyn FnMut(&SessionEvent)>;

/// Annotation session over one image at a time.
pub struct Session {
    grid: Grid,
    project: ProjectState,
    cell_size: u32,
    current_image: Option<PathBuf>,
    dirty: bool,
    probe: Box<dyn ImageProbe>,
    observers: Vec<Observer>,
}

impl Session {
    /// Create a session with the default cell size and the `image` crate probe.
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            project: ProjectState::default(),
            cell_size: DEFAULT_CELL_SIZE,
            current_image: None,
            dirty: false,
            probe: Box::new(ImageCrateProbe),
            observers: Vec::new(),
        }
    }

    /// Set the initial cell size. Zero falls back to the default.
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        if cell_size == 0 {
            log::warn!(
                "Ignoring cell size 0, using default {}px",
                DEFAULT_CELL_SIZE
            );
            self.cell_size = DEFAULT_CELL_SIZE;
        } else {
            self.cell_size = cell_size;
        }
        self
    }

    /// Replace the image dimension probe.
    pub fn with_probe(mut self, probe: impl ImageProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Register an observer for all future events.
    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    fn emit_grid(&mut self, events: Vec<GridEvent>) {
        for event in events {
            self.emit(SessionEvent::Grid(event));
        }
    }

    // ------------------------------------------------------------------
    // Opening
    // ------------------------------------------------------------------

    /// Open a single image.
    ///
    /// The grid comes from the image's selection file when one can be read,
    /// otherwise it is a uniform grid sized from the image dimensions. An
    /// empty path is ignored.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        self.open_image(path, LoadMode::PreferSaved)
    }

    fn open_image(&mut self, path: &Path, mode: LoadMode) -> Result<()> {
        let (pixel_width, pixel_height) = self.probe.dimensions(path)?;
        log::info!(
            "📂 Opened image {:?} with size {}x{}",
            path,
            pixel_width,
            pixel_height
        );

        let saved = match mode {
            LoadMode::PreferSaved => self.read_saved_selection(path),
            LoadMode::Fresh => None,
        };

        let mut size_changed = false;
        let grid_events = match saved {
            Some(selection) => {
                if selection.cell_size != self.cell_size {
                    self.cell_size = selection.cell_size;
                    size_changed = true;
                }
                self.grid.init_from_array(selection.grid.into_array())
            }
            None => {
                let (width, height) = grid_size_for(pixel_width, pixel_height, self.cell_size);
                if width.checked_mul(height).is_none_or(|cells| cells > MAX_GRID_CELLS) {
                    return Err(SessionError::GridTooLarge { width, height });
                }
                self.grid.init_uniform(width, height)
            }
        };

        self.current_image = Some(path.to_path_buf());
        if let Some(index) = self.project.index_of(path) {
            self.project.current_index = index;
        }
        self.dirty = false;

        if size_changed {
            self.emit(SessionEvent::CellSizeChanged(self.cell_size));
        }
        self.emit_grid(grid_events);
        self.emit(SessionEvent::ImageChanged {
            path: path.to_path_buf(),
            number: self.current_image_number(),
            total: self.total_images(),
        });
        Ok(())
    }

    fn read_saved_selection(&self, image: &Path) -> Option<SelectionFile> {
        let path = format::selection_path_for(image);
        match SelectionFile::load(&path) {
            Ok(selection) => Some(selection),
            Err(e) if e.is_not_found() => {
                log::debug!("No selection file at {:?}, starting blank", path);
                None
            }
            Err(e) => {
                log::warn!("Failed to read selection file {:?}: {}", path, e);
                None
            }
        }
    }

    fn close_image(&mut self) {
        if self.current_image.take().is_none() {
            return;
        }
        let events = self.grid.init_uniform(0, 0);
        self.dirty = false;
        self.emit_grid(events);
        self.emit(SessionEvent::ImageClosed);
    }

    /// Open every image in a folder and show the first one.
    ///
    /// Returns `Ok(false)` and leaves the session untouched when the folder
    /// has no images. An empty path is ignored.
    pub fn open_directory(&mut self, dir: &Path) -> Result<bool> {
        if dir.as_os_str().is_empty() {
            return Ok(false);
        }

        let project = ProjectState::from_folder(dir.to_path_buf())?;
        if project.is_empty() {
            log::warn!("No {:?} found in {:?}", IMAGE_EXTENSIONS, dir);
            self.emit(SessionEvent::NoImages {
                dir: dir.to_path_buf(),
            });
            return Ok(false);
        }

        log::info!("📁 Opened folder {:?} with {} images", dir, project.len());
        let first = project.images[0].clone();
        self.project = project;

        if let Err(e) = self.open_image(&first, LoadMode::PreferSaved) {
            self.close_image();
            return Err(e);
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Save the current image, then open the next one. Stops at the last image.
    pub fn load_next(&mut self) -> Result<bool> {
        self.navigate(ProjectState::next_index)
    }

    /// Save the current image, then open the previous one. Stops at the first image.
    pub fn load_previous(&mut self) -> Result<bool> {
        self.navigate(ProjectState::prev_index)
    }

    /// Save the current image, then open image number `number` (1-based, clamped).
    pub fn load_by_index(&mut self, number: i64) -> Result<bool> {
        self.navigate(|project| project.index_for_number(number))
    }

    /// Returns whether a different image was opened.
    fn navigate(&mut self, target: impl FnOnce(&ProjectState) -> Option<usize>) -> Result<bool> {
        if self.project.is_empty() {
            return Ok(false);
        }

        if self.current_image.is_some() {
            self.save_selection_file()?;
        }

        let Some(index) = target(&self.project) else {
            return Ok(false);
        };
        let path = self.project.images[index].clone();
        if self.current_image.as_deref() == Some(path.as_path()) {
            log::debug!("Already at image {}/{}", index + 1, self.project.len());
            return Ok(false);
        }

        let previous_index = self.project.current_index;
        self.project.current_index = index;
        if let Err(e) = self.open_image(&path, LoadMode::PreferSaved) {
            self.project.current_index = previous_index;
            return Err(e);
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Grid settings and editing
    // ------------------------------------------------------------------

    /// Change the cell edge length and re-grid the current image.
    ///
    /// The current image is re-opened with a blank grid at the new size; a
    /// selection recorded at the old size is not reloaded and unsaved edits
    /// are dropped.
    pub fn set_pixel_grid_size(&mut self, cell_size: u32) -> Result<()> {
        if cell_size == 0 {
            return Err(SessionError::InvalidCellSize(cell_size));
        }
        if cell_size == self.cell_size {
            return Ok(());
        }

        log::info!("📐 Cell size {}px -> {}px", self.cell_size, cell_size);
        self.cell_size = cell_size;
        self.emit(SessionEvent::CellSizeChanged(cell_size));

        if let Some(path) = self.current_image.clone() {
            self.open_image(&path, LoadMode::Fresh)?;
        }
        Ok(())
    }

    fn apply_grid_events(&mut self, events: Vec<GridEvent>) -> bool {
        if events.is_empty() {
            return false;
        }
        self.dirty = true;
        self.emit_grid(events);
        true
    }

    /// Set one cell. Returns whether it changed.
    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) -> bool {
        let events = self.grid.set(x, y, state);
        self.apply_grid_events(events)
    }

    /// Flip one cell between default and selected. Returns whether it changed.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        let events = self.grid.toggle(x, y);
        self.apply_grid_events(events)
    }

    /// Reset every cell to default. Returns whether anything changed.
    pub fn clear_selection(&mut self) -> bool {
        let events = self.grid.fill(CellState::Default);
        self.apply_grid_events(events)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the selection file of the current image.
    ///
    /// Returns the written path, or `None` when no image is open.
    pub fn save_selection_file(&mut self) -> Result<Option<PathBuf>> {
        let Some(image) = &self.current_image else {
            return Ok(None);
        };
        let path = format::selection_path_for(image);
        format::save_selection(&path, self.cell_size, &self.grid)?;
        self.dirty = false;
        self.emit(SessionEvent::SelectionSaved { path: path.clone() });
        Ok(Some(path))
    }

    /// Export the selection of the current image as a grayscale mask PNG.
    ///
    /// Returns the written path, or `None` when no image is open.
    pub fn export_mask(&mut self) -> Result<Option<PathBuf>> {
        let Some(image) = &self.current_image else {
            return Ok(None);
        };
        let path = format::mask_path_for(image);
        format::export_mask(&path, &self.grid, self.cell_size)?;
        self.emit(SessionEvent::MaskExported { path: path.clone() });
        Ok(Some(path))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Grid of the current image.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell edge length in pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Path of the current image.
    pub fn current_image(&self) -> Option<&Path> {
        self.current_image.as_deref()
    }

    /// Selection file path of the current image.
    pub fn selection_path(&self) -> Option<PathBuf> {
        self.current_image
            .as_deref()
            .map(format::selection_path_for)
    }

    /// Images of the opened folder, in navigation order.
    pub fn images(&self) -> &[PathBuf] {
        &self.project.images
    }

    /// Number of images in the opened folder.
    pub fn total_images(&self) -> usize {
        self.project.len()
    }

    /// 1-based number of the current image for display, 0 without a folder.
    pub fn current_image_number(&self) -> usize {
        if self.project.is_empty() {
            0
        } else {
            self.project.current_index + 1
        }
    }

    /// 0-based index of the current image in the folder list.
    pub fn current_index(&self) -> Option<usize> {
        if self.project.is_empty() {
            None
        } else {
            Some(self.project.current_index)
        }
    }

    /// Folder navigation state.
    pub fn project(&self) -> &ProjectState {
        &self.project
    }

    /// Whether the grid has edits that were not saved yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
