//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping (files with a unique size cannot be duplicates)
//! - Zero-byte grouping without reading content
//! - SHA-256 confirmation of same-size candidates
//! - Duplicate group management and summary statistics

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary, SkippedFile};
pub use groups::{
    group_by_hash, group_by_size, DuplicateGroup, GroupingStats, HashGroup, SizeGroup,
    SizeGrouping,
};
