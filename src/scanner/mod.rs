//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Recursive directory walking using walkdir (symbolic links excluded)
//! - Streaming SHA-256 content hashing
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: SHA-256 file hashing (streaming, fixed-size chunks)
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new(".")).unwrap();
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {:?} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher, BUFFER_SIZE, EMPTY_HASH};
pub use walker::Walker;

/// A regular file discovered by the walker.
///
/// Identity is the absolute path. The size is captured during the walk when
/// the metadata is available; otherwise it is resolved lazily by the
/// duplicate detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes, if known
    pub size: Option<u64>,
}

impl FileEntry {
    /// Create a new FileEntry with a known size.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size: Some(size),
        }
    }

    /// Create a FileEntry whose size has not been read yet.
    #[must_use]
    pub fn without_size(path: PathBuf) -> Self {
        Self {
            path,
            size: None,
        }
    }

    /// Return the size, reading it from the filesystem if it was not captured.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the metadata cannot be read.
    pub fn resolve_size(&self) -> io::Result<u64> {
        match self.size {
            Some(size) => Ok(size),
            None => std::fs::symlink_metadata(&self.path).map(|m| m.len()),
        }
    }

    /// File name component, for display.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist or is not a directory.
    #[error("Directory not found or invalid: {0}")]
    InvalidTarget(PathBuf),

    /// The scan root exists but its contents cannot be listed.
    #[error("Cannot read directory {path}: {source}")]
    RootInaccessible {
        /// The scan root
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A directory below the root could not be traversed.
    #[error("Error during directory traversal at {path}: {source}")]
    Traversal {
        /// Directory where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Whether this error prevents the scan from producing any result,
    /// regardless of the configured failure policy.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Traversal { .. })
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidTarget(path) => path,
            Self::RootInaccessible { path, .. } | Self::Traversal { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Hashing stopped because shutdown was requested.
    #[error("Hashing interrupted: {0}")]
    Interrupted(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while opening or reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Short human-readable reason, without the path.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::NotFound(_) => "file not found".to_string(),
            Self::PermissionDenied(_) => "permission denied".to_string(),
            Self::Interrupted(_) => "interrupted".to_string(),
            Self::Io { source, .. } => source.to_string(),
        }
    }
}
