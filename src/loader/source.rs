//! Content source abstraction for reading block manifests.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Trait for abstracting manifest I/O (filesystem vs. in-memory).
pub trait ContentSource {
    /// Read a file at the given logical path and return its content as a string.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
    /// List files below a directory path, recursively, returning full paths.
    fn list_dir(&mut self, path: &Utf8Path) -> Result<Vec<Utf8PathBuf>>;
}

/// Reads files directly from the local filesystem.
pub struct FsSource;

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path.as_std_path()).with_context(|| format!("Failed to read {}", path))
    }

    fn list_dir(&mut self, path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(path.as_std_path()).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Read dir {}", path))?;
            if entry.file_type().is_file() {
                let p = Utf8PathBuf::from_path_buf(entry.into_path())
                    .map_err(|p| anyhow::anyhow!("Non-UTF8 path {} in {}", p.display(), path))?;
                files.push(p);
            }
        }
        Ok(files)
    }
}
