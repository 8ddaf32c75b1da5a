//! Navigation state for an opened image folder.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Image extensions picked up by a folder scan (matched exactly, lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check if a path has a supported image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Error raised when a folder cannot be enumerated.
#[derive(Error, Debug)]
#[error("Failed to read folder {folder:?}: {source}")]
pub struct ScanError {
    /// The folder that was being scanned
    pub folder: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

/// Ordered image list of a folder plus the current position in it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectState {
    /// Path to the scanned folder
    pub folder: PathBuf,
    /// Image files in the folder, sorted by path
    pub images: Vec<PathBuf>,
    /// Current image index, kept in `0..images.len()` when `images` is non-empty
    pub current_index: usize,
}

impl ProjectState {
    /// Discover image files in a folder, non-recursively.
    ///
    /// An empty result is not an error; callers decide what "no images" means.
    pub fn from_folder(folder: PathBuf) -> Result<Self, ScanError> {
        let entries = std::fs::read_dir(&folder).map_err(|source| ScanError {
            folder: folder.clone(),
            source,
        })?;

        let mut images: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image_file(path))
            .collect();

        // Sort by filename for consistent ordering
        images.sort();

        log::debug!("Scanned folder {:?}: found {} images", folder, images.len());

        Ok(Self {
            folder,
            images,
            current_index: 0,
        })
    }

    /// Build a project from an explicit, already ordered image list.
    pub fn from_images(folder: PathBuf, images: Vec<PathBuf>) -> Self {
        Self {
            folder,
            images,
            current_index: 0,
        }
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the folder had no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get the current image path.
    pub fn current_image(&self) -> Option<&PathBuf> {
        self.images.get(self.current_index)
    }

    /// Position of `path` in the list.
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.images.iter().position(|p| p == path)
    }

    /// Clamp an arbitrary index into the valid range.
    pub fn clamp_index(&self, index: i64) -> Option<usize> {
        if self.images.is_empty() {
            return None;
        }
        let last = self.images.len() - 1;
        Some(index.clamp(0, last as i64) as usize)
    }

    /// Index the next image would have, clamped at the end.
    pub fn next_index(&self) -> Option<usize> {
        self.clamp_index(self.current_index as i64 + 1)
    }

    /// Index the previous image would have, clamped at the start.
    pub fn prev_index(&self) -> Option<usize> {
        self.clamp_index(self.current_index as i64 - 1)
    }

    /// Index for a 1-based display number, clamped.
    pub fn index_for_number(&self, number: i64) -> Option<usize> {
        self.clamp_index(number.saturating_sub(1))
    }

    /// Move to the next image without wrapping.
    pub fn next(&mut self) {
        if let Some(index) = self.next_index() {
            self.current_index = index;
        }
    }

    /// Move to the previous image without wrapping.
    pub fn prev(&mut self) {
        if let Some(index) = self.prev_index() {
            self.current_index = index;
        }
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        if self.images.is_empty() {
            return "0/0".to_string();
        }
        format!("{}/{}", self.current_index + 1, self.images.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with(count: usize) -> ProjectState {
        let images = (0..count)
            .map(|i| PathBuf::from(format!("img{}.png", i)))
            .collect();
        ProjectState::from_images(PathBuf::from("."), images)
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.png")));
        assert!(is_image_file(Path::new("dir/b.jpg")));
        assert!(is_image_file(Path::new("c.jpeg")));
        assert!(!is_image_file(Path::new("notes.pdf")));
        assert!(!is_image_file(Path::new("scan.bmp")));
        assert!(!is_image_file(Path::new("upper.PNG")));
        assert!(!is_image_file(Path::new("png")));
    }

    #[test]
    fn test_next_clamps_at_end() {
        let mut project = project_with(3);
        project.next();
        project.next();
        assert_eq!(project.current_index, 2);
        project.next();
        assert_eq!(project.current_index, 2);
    }

    #[test]
    fn test_prev_clamps_at_start() {
        let mut project = project_with(3);
        project.prev();
        assert_eq!(project.current_index, 0);
        project.current_index = 2;
        project.prev();
        assert_eq!(project.current_index, 1);
    }

    #[test]
    fn test_index_for_number_is_one_based() {
        let project = project_with(4);
        assert_eq!(project.index_for_number(1), Some(0));
        assert_eq!(project.index_for_number(3), Some(2));
        assert_eq!(project.index_for_number(0), Some(0));
        assert_eq!(project.index_for_number(-7), Some(0));
        assert_eq!(project.index_for_number(99), Some(3));
        assert_eq!(project.index_for_number(i64::MIN), Some(0));
    }

    #[test]
    fn test_empty_project_has_no_indices() {
        let mut project = project_with(0);
        assert_eq!(project.next_index(), None);
        assert_eq!(project.index_for_number(1), None);
        project.next();
        project.prev();
        assert_eq!(project.current_index, 0);
        assert!(project.current_image().is_none());
        assert_eq!(project.progress(), "0/0");
    }

    #[test]
    fn test_progress() {
        let mut project = project_with(15);
        project.current_index = 2;
        assert_eq!(project.progress(), "3/15");
    }

    #[test]
    fn test_from_folder_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.jpg", "notes.pdf", "c.jpeg", "d.PNG"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let project = ProjectState::from_folder(dir.path().to_path_buf()).unwrap();
        let names: Vec<String> = project
            .images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(project.len(), 3);
        assert!(names.contains(&"a.png".to_string()));
        assert!(names.contains(&"b.jpg".to_string()));
        assert!(names.contains(&"c.jpeg".to_string()));
        assert_eq!(project.current_index, 0);
    }

    #[test]
    fn test_from_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectState::from_folder(dir.path().join("missing")).unwrap_err();
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }
}
