use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tga", "gif"];

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read directory {}: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no image files found in {}", .0.display())]
    EmptyDirectory(PathBuf),
    #[error("cannot delete {}: {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no images left")]
    Emptied,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The images of one directory and the position of the one on screen.
///
/// Entries are ordered by file name, case-insensitively, with the exact name
/// breaking ties. `current` is always a valid index while the catalog is
/// non-empty; an emptied catalog only answers accessors.
#[derive(Debug)]
pub struct Catalog {
    dir: PathBuf,
    files: Vec<PathBuf>,
    current: usize,
}

impl Catalog {
    /// List `dir` and select `initial` if it is one of the images found there.
    pub fn scan(dir: &Path, initial: Option<&Path>) -> Result<Self, CatalogError> {
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::ReadDir {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && is_image_file(&p) {
                files.push(p);
            }
        }

        if files.is_empty() {
            return Err(CatalogError::EmptyDirectory(dir.to_path_buf()));
        }

        files.sort_by(|a, b| compare_names(a, b));

        let current = initial
            .and_then(|target| files.iter().position(|p| p == target))
            .unwrap_or(0);

        log::info!(
            "Scanned {:?}: {} images, starting at {}",
            dir,
            files.len(),
            files[current].display()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            files,
            current,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.files.get(self.current).map(PathBuf::as_path)
    }

    pub fn next(&mut self) -> usize {
        if !self.files.is_empty() {
            self.current = (self.current + 1) % self.files.len();
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        if !self.files.is_empty() {
            let len = self.files.len();
            self.current = (self.current + len - 1) % len;
        }
        self.current
    }

    /// Delete the current file from disk and drop it from the list.
    ///
    /// On success the current index names the image that followed the
    /// deleted one, wrapping to the first when the last entry was removed.
    /// If the file cannot be deleted nothing changes.
    pub fn remove_current(&mut self) -> Result<usize, CatalogError> {
        let Some(path) = self.files.get(self.current) else {
            return Err(CatalogError::Emptied);
        };

        fs::remove_file(path).map_err(|source| CatalogError::DeleteFailed {
            path: path.clone(),
            source,
        })?;

        let removed = self.files.remove(self.current);
        log::info!("Deleted {}", removed.display());

        if self.files.is_empty() {
            self.current = 0;
            return Err(CatalogError::Emptied);
        }
        if self.current == self.files.len() {
            self.current = 0;
        }
        Ok(self.current)
    }
}

fn compare_names(a: &Path, b: &Path) -> Ordering {
    let an = a.file_name().unwrap_or_default();
    let bn = b.file_name().unwrap_or_default();
    an.to_string_lossy()
        .to_lowercase()
        .cmp(&bn.to_string_lossy().to_lowercase())
        .then_with(|| an.cmp(bn))
}
