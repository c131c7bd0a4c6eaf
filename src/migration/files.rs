//! A [`FileSystem`] wrapper that reports every copy and removal

use std::path::Path;

use log::{debug, info, warn};

use super::action_log::ActionLog;
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::path::{canonicalize, to_slash};

/// Message recorded when a copy would overwrite an existing file
pub const TARGET_EXISTS_MESSAGE: &str = "Target file already exists, skipping copy";

/// Filesystem access for one run, recording copies, skipped copies and
/// removals into an [`ActionLog`].
///
/// All paths are canonicalized before use.
#[derive(Debug)]
pub struct LoggedFs<F: FileSystem> {
    fs: F,
    log: ActionLog,
}

impl<F: FileSystem> LoggedFs<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            log: ActionLog::new(),
        }
    }

    /// Copy a file or mirror a directory.
    ///
    /// An existing target file is left alone and reported as a warning
    /// unless `overwrite` is set. Directories are always mirrored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSource`] when `source` does not exist.
    pub fn copy(&mut self, source: &str, target: &str, overwrite: bool) -> Result<()> {
        let source = canonicalize(source);
        let target = canonicalize(target);
        let (source_path, target_path) = (Path::new(&source), Path::new(&target));

        if !self.fs.exists(source_path) {
            return Err(Error::MissingSource { path: source });
        }

        if self.fs.is_dir(source_path) {
            self.fs.mirror(source_path, target_path)?;
        } else if self.fs.exists(target_path) && !overwrite {
            warn!("{}: {}", TARGET_EXISTS_MESSAGE, target);
            self.log
                .record_warned(&source, format!("{}: {}", TARGET_EXISTS_MESSAGE, target));
            return Ok(());
        } else {
            self.fs.copy_file(source_path, target_path)?;
        }

        info!("Copied {} -> {}", source, target);
        self.log.record_copied(&source, &target);
        Ok(())
    }

    /// Record a skipped action for `source` without touching the filesystem
    pub fn record_warning(&mut self, source: &str, message: impl Into<String>) {
        self.log.record_warned(source, message);
    }

    /// Remove a file or directory tree, missing paths included
    pub fn remove(&mut self, path: &str) -> Result<()> {
        let path = canonicalize(path);
        self.fs.remove(Path::new(&path))?;
        debug!("Removed {}", path);
        self.log.record_removed(&path);
        Ok(())
    }

    pub fn read(&self, path: &str) -> Result<String> {
        self.fs.read_to_string(Path::new(&canonicalize(path)))
    }

    /// Write a file, creating parent directories. Not recorded in the log.
    pub fn write(&mut self, path: &str, content: &str) -> Result<()> {
        self.fs.write(Path::new(&canonicalize(path)), content)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.fs.exists(Path::new(&canonicalize(path)))
    }

    /// Every file below `dir`, as canonical `/`-separated paths
    pub fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let dir = canonicalize(dir);
        if !self.fs.is_dir(Path::new(&dir)) {
            return Ok(Vec::new());
        }
        Ok(self
            .fs
            .list_files(Path::new(&dir))?
            .iter()
            .map(|path| canonicalize(&to_slash(path)))
            .collect())
    }

    /// The wrapped filesystem
    pub fn inner(&self) -> &F {
        &self.fs
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Give back the filesystem and the log
    pub fn into_parts(self) -> (F, ActionLog) {
        (self.fs, self.log)
    }
}
