//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting the regular files in it.
//!
//! - Directories are descended into unconditionally.
//! - Symbolic links (to files or directories) are never followed and never
//!   yielded, which rules out cycles and double counting.
//! - Entries are sorted by file name within each directory, so the order is
//!   stable from one run to the next.
//! - Errors are yielded as [`ScanError`] values rather than stopping
//!   iteration; the caller decides which ones are fatal.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads")).unwrap();
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} files", files.len());
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Canonical root path to walk
    root: PathBuf,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a walker rooted at `path`.
    ///
    /// The root is canonicalised so that every yielded path is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidTarget`] if `path` does not exist or is
    /// not a directory.
    pub fn new(path: &Path) -> Result<Self, ScanError> {
        if !path.is_dir() {
            return Err(ScanError::InvalidTarget(path.to_path_buf()));
        }
        let root = path
            .canonicalize()
            .map_err(|_| ScanError::InvalidTarget(path.to_path_buf()))?;

        Ok(Self {
            root,
            shutdown_flag: None,
        })
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// The canonical root being walked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree, yielding regular files.
    ///
    /// An unreadable root is reported as [`ScanError::RootInaccessible`];
    /// an unreadable directory further down as [`ScanError::Traversal`].
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        walk_dir
            .into_iter()
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    false
                } else {
                    true
                }
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();

                    if file_type.is_symlink() {
                        log::trace!("Skipping symlink: {}", entry.path().display());
                        return None;
                    }
                    if !file_type.is_file() {
                        // Directories are descended by walkdir itself; sockets,
                        // fifos and devices are not content files.
                        return None;
                    }

                    let path = entry.into_path();
                    match std::fs::symlink_metadata(&path) {
                        Ok(metadata) => Some(Ok(FileEntry::new(path, metadata.len()))),
                        Err(e) => {
                            log::debug!("Size unavailable for {}: {}", path.display(), e);
                            Some(Ok(FileEntry::without_size(path)))
                        }
                    }
                }
                Err(e) => Some(Err(self.convert_error(e))),
            })
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn convert_error(&self, error: walkdir::Error) -> ScanError {
        let depth = error.depth();
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let source = error
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));

        if depth == 0 {
            log::error!("Cannot read scan root {}: {}", path.display(), source);
            ScanError::RootInaccessible { path, source }
        } else {
            log::warn!("Cannot read directory {}: {}", path.display(), source);
            ScanError::Traversal { path, source }
        }
    }
}
