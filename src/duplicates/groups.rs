//! Duplicate grouping and size-based file organization.
//!
//! # Overview
//!
//! This module provides the intermediate and final groupings used by the
//! duplicate detector:
//!
//! - [`SizeGroup`]: files sharing an exact byte size (the candidate filter)
//! - [`HashGroup`]: members of one size group sharing a content digest
//! - [`DuplicateGroup`]: the reported unit, two or more byte-identical files
//!
//! Size groups are kept in the order their size was first seen, which is the
//! order duplicate groups are finally reported in.
//!
//! # Example
//!
//! ```
//! use dupefinder::scanner::FileEntry;
//! use dupefinder::duplicates::group_by_size;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/file1.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file2.txt"), 2048),
//!     FileEntry::new(PathBuf::from("/file3.txt"), 1024),
//! ];
//!
//! let grouping = group_by_size(files);
//!
//! assert_eq!(grouping.groups.len(), 2);
//! assert_eq!(grouping.groups[0].size, 1024);
//! assert_eq!(grouping.groups[0].len(), 2);
//! assert_eq!(grouping.stats.eliminated_unique, 1);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// A group of files with the same size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGroup {
    /// File size in bytes (shared by all files in this group)
    pub size: u64,
    /// Files with this exact size, in first-seen order
    pub files: Vec<FileEntry>,
}

impl SizeGroup {
    /// Create an empty size group.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            files: Vec::new(),
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this group has potential duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// Whether every member is a zero-byte file.
    #[must_use]
    pub fn is_zero_size(&self) -> bool {
        self.size == 0
    }
}

/// Members of one size group that share a content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashGroup {
    /// Shared content digest
    pub hash: Hash,
    /// Files with this digest, in first-seen order
    pub files: Vec<FileEntry>,
}

/// Split the hashed members of a size group by digest.
///
/// Hash groups are returned in the order their digest was first seen, and
/// members keep their relative order.
#[must_use]
pub fn group_by_hash(hashed: impl IntoIterator<Item = (FileEntry, Hash)>) -> Vec<HashGroup> {
    let mut index: HashMap<Hash, usize> = HashMap::new();
    let mut groups: Vec<HashGroup> = Vec::new();

    for (file, hash) in hashed {
        match index.get(&hash) {
            Some(&slot) => groups[slot].files.push(file),
            None => {
                index.insert(hash, groups.len());
                groups.push(HashGroup {
                    hash,
                    files: vec![file],
                });
            }
        }
    }

    groups
}

/// Confirmed duplicate group of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// SHA-256 digest shared by every member
    pub hash: Hash,
    /// File size in bytes (shared by every member)
    pub size: u64,
    /// Byte-identical files, in first-seen order (always 2 or more)
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(hash: Hash, size: u64, files: Vec<FileEntry>) -> Self {
        debug_assert!(files.len() > 1, "duplicate group needs at least two files");
        Self { hash, size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Bytes held by all copies but one: `(members - 1) * size`.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Number of redundant copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// The member suggested to keep (the first one seen).
    #[must_use]
    pub fn representative(&self) -> Option<&FileEntry> {
        self.files.first()
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Statistics from size grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Number of entries offered for grouping
    pub total_files: usize,
    /// Number of distinct sizes seen
    pub unique_sizes: usize,
    /// Files alone in their size group (can never be duplicates)
    pub eliminated_unique: usize,
    /// Files in size groups of 2+ (including empty files)
    pub potential_duplicates: usize,
    /// Zero-byte files seen
    pub empty_files: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Result of size grouping.
#[derive(Debug, Clone, Default)]
pub struct SizeGrouping {
    /// Every size group, singletons included, in first-seen order
    pub groups: Vec<SizeGroup>,
    /// Entries whose size could not be determined, with the reason
    pub unreadable: Vec<(FileEntry, String)>,
    /// Grouping statistics
    pub stats: GroupingStats,
}

/// Group files by size (first phase of duplicate detection).
///
/// Every entry lands in exactly one size group, except entries whose size
/// cannot be read, which are set aside in [`SizeGrouping::unreadable`].
///
/// # Performance
///
/// O(n) time and space; entries that already carry a size need no I/O.
#[must_use]
pub fn group_by_size(files: impl IntoIterator<Item = FileEntry>) -> SizeGrouping {
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut grouping = SizeGrouping::default();

    for file in files {
        grouping.stats.total_files += 1;

        let size = match file.resolve_size() {
            Ok(size) => size,
            Err(e) => {
                grouping.unreadable.push((file, e.to_string()));
                continue;
            }
        };

        let slot = *index.entry(size).or_insert_with(|| {
            grouping.groups.push(SizeGroup::new(size));
            grouping.groups.len() - 1
        });
        grouping.groups[slot].files.push(FileEntry {
            size: Some(size),
            ..file
        });
    }

    let stats = &mut grouping.stats;
    stats.unique_sizes = grouping.groups.len();
    for group in &grouping.groups {
        if group.is_zero_size() {
            stats.empty_files += group.len();
        }
        if group.has_duplicates() {
            stats.potential_duplicates += group.len();
            log::trace!("Size group {} bytes: {} candidates", group.size, group.len());
        } else {
            stats.eliminated_unique += group.len();
        }
    }

    log::debug!(
        "Size grouping: {} files → {} candidates ({:.1}% eliminated)",
        stats.total_files,
        stats.potential_duplicates,
        stats.elimination_rate()
    );

    grouping
}
