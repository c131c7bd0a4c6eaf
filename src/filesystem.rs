//! Filesystem access for the migration
//!
//! Every read, write, copy and removal made by a migration run goes through
//! the [`FileSystem`] trait. [`DiskFS`] is the real implementation used by the
//! command-line tool; [`MemoryFS`] keeps files in memory so the engine can be
//! exercised in tests without touching the disk.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Primitive file operations needed by a migration run.
///
/// Directories are created implicitly: `write` and `copy_file` create any
/// missing parent directory of the target.
pub trait FileSystem {
    /// Check whether a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check whether the path is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create or overwrite a file with the given content
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;

    /// Copy a single file, overwriting the target
    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()>;

    /// Recursively copy every file below `from` to the same relative location
    /// below `to`
    fn mirror(&mut self, from: &Path, to: &Path) -> Result<()>;

    /// Remove a file or a whole directory tree. Missing paths are ignored.
    fn remove(&mut self, path: &Path) -> Result<()>;

    /// List every file below `dir`, recursively, in sorted order
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Represents an in-memory file
#[derive(Debug, Clone)]
pub struct File {
    /// File content as bytes
    pub content: Vec<u8>,
}

impl File {
    /// Create a new file with content
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Create a new file from string content
    pub fn from_string(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec())
    }
}

/// In-memory filesystem, mostly used by tests
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    /// Files stored as path -> content mapping
    files: HashMap<PathBuf, File>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a file with string content
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) -> Result<()> {
        self.files
            .insert(path.as_ref().to_path_buf(), File::from_string(content));
        Ok(())
    }

    /// Get a file by path
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&File> {
        self.files.get(path.as_ref())
    }

    /// Read a file as text, if present and valid UTF-8
    pub fn get_string<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        self.get_file(path)
            .and_then(|file| String::from_utf8(file.content.clone()).ok())
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files as (path, file) pairs
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &File)> {
        self.files.iter()
    }

    fn files_below(&self, dir: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|path| path.starts_with(dir) && path.as_path() != dir)
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl FileSystem for MemoryFS {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file.starts_with(path) && file.as_path() != path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let file = self.files.get(path).ok_or_else(|| Error::MissingSource {
            path: path.display().to_string(),
        })?;
        String::from_utf8(file.content.clone()).map_err(|_| Error::Filesystem {
            message: format!("File content is not valid UTF-8: {}", path.display()),
        })
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        self.add_file_string(path, content)
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        if let Some(file) = self.files.get(from) {
            let file = file.clone();
            self.files.insert(to.to_path_buf(), file);
            Ok(())
        } else {
            Err(Error::MissingSource {
                path: from.display().to_string(),
            })
        }
    }

    fn mirror(&mut self, from: &Path, to: &Path) -> Result<()> {
        for path in self.files_below(from) {
            let relative = path.strip_prefix(from).map_err(|e| Error::Path {
                message: format!("Failed to relativize '{}': {}", path.display(), e),
            })?;
            let target = to.join(relative);
            self.copy_file(&path, &target)?;
        }
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        self.files.remove(path);
        self.files.retain(|file, _| !file.starts_with(path));
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.files_below(dir))
    }
}

/// The host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFS;

impl DiskFS {
    /// Create a handle on the host filesystem
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }
        Ok(())
    }
}

impl FileSystem for DiskFS {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::MissingSource {
                path: path.display().to_string(),
            });
        }
        fs::read_to_string(path).map_err(Error::Io)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        Self::ensure_parent(path)?;
        fs::write(path, content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", path.display(), e),
        })
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        if !from.is_file() {
            return Err(Error::MissingSource {
                path: from.display().to_string(),
            });
        }
        Self::ensure_parent(to)?;
        fs::copy(from, to).map_err(|e| Error::Filesystem {
            message: format!(
                "Failed to copy '{}' to '{}': {}",
                from.display(),
                to.display(),
                e
            ),
        })?;
        Ok(())
    }

    fn mirror(&mut self, from: &Path, to: &Path) -> Result<()> {
        for path in self.list_files(from)? {
            let relative = path.strip_prefix(from).map_err(|e| Error::Path {
                message: format!("Failed to relativize '{}': {}", path.display(), e),
            })?;
            self.copy_file(&path, &to.join(relative))?;
        }
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else if path.exists() {
            fs::remove_file(path)
        } else {
            return Ok(());
        };
        result.map_err(|e| Error::Filesystem {
            message: format!("Failed to remove '{}': {}", path.display(), e),
        })
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Filesystem {
                message: format!("Failed to walk '{}': {}", dir.display(), e),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}
