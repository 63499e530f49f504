//! Duplicate finder implementation with two-phase detection.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Walk** - Enumerate regular files below the scan root
//! 2. **Size grouping** - Partition files by exact size; files alone in
//!    their size group are counted as processed immediately
//! 3. **Zero-byte shortcut** - Two or more empty files form a group without
//!    any hashing
//! 4. **Hash confirmation** - SHA-256 every remaining candidate and group
//!    equal digests within each size group
//!
//! Every enumerated file is counted as processed exactly once across steps
//! 2-4, so the final progress event always reads `(total, total)`.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! println!("Found {} duplicate groups", groups.len());
//! println!("Wasted space: {} bytes", summary.wasted_space);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::groups::{group_by_hash, group_by_size, DuplicateGroup, SizeGroup};
use crate::progress::{Phase, ProgressCallback, ProgressTracker};
use crate::scanner::{FileEntry, Hash, HashError, Hasher, ScanError, Walker, EMPTY_HASH};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of worker threads for the hashing pass.
    pub io_threads: usize,
    /// Abort on an unreadable subdirectory instead of skipping it.
    pub strict: bool,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("strict", &self.strict)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: default_io_threads(),
            strict: false,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

/// One hashing worker per available CPU core.
fn default_io_threads() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

impl FinderConfig {
    /// Set the number of hashing threads (at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set fail-fast on unreadable subdirectories.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// A file excluded from duplicate grouping because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the skipped file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Total number of files enumerated
    pub total_files: usize,
    /// Files processed; equals `total_files` after a completed scan
    pub processed_files: usize,
    /// Files eliminated because their size was unique
    pub eliminated_by_size: usize,
    /// Zero-byte files that formed a group without hashing
    pub empty_files: usize,
    /// Files whose content was hashed successfully
    pub hashed_files: usize,
    /// Files excluded because their size or content could not be read
    pub skipped: Vec<SkippedFile>,
    /// Non-fatal traversal errors (unreadable subdirectories)
    pub scan_errors: Vec<ScanError>,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Files belonging to a duplicate group (originals included)
    pub duplicate_files: usize,
    /// Bytes held by redundant copies: Σ (members - 1) × size
    pub wasted_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Fill the group totals from the final duplicate groups.
    pub fn record_groups(&mut self, groups: &[DuplicateGroup]) {
        self.duplicate_groups = groups.len();
        self.duplicate_files = groups.iter().map(DuplicateGroup::len).sum();
        self.wasted_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
    }
}

/// Errors that abort a duplicate scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The scan root is invalid or the tree could not be traversed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl FinderError {
    /// Whether this is a traversal failure (as opposed to a bad target).
    #[must_use]
    pub fn is_traversal(&self) -> bool {
        matches!(
            self,
            Self::Scan(ScanError::RootInaccessible { .. } | ScanError::Traversal { .. })
        )
    }
}

/// Outcome of hashing one candidate.
enum HashOutcome {
    Hashed(Hash),
    Skipped(HashError),
    Interrupted,
}

/// Duplicate finder that orchestrates the detection pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(Arc::clone(flag));
        }
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Enumerate and analyse the tree rooted at `path`.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::enumerate`] and [`DuplicateFinder::detect`].
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let (files, scan_errors) = self.enumerate(path)?;
        let (groups, mut summary) = self.detect(files)?;
        summary.scan_errors = scan_errors;
        summary.scan_duration = start_time.elapsed();
        Ok((groups, summary))
    }

    /// Collect every regular file below `path`.
    ///
    /// Returns the files plus the non-fatal traversal errors encountered.
    ///
    /// # Errors
    ///
    /// - [`ScanError::InvalidTarget`] if `path` is missing or not a directory
    /// - [`ScanError::RootInaccessible`] if `path` cannot be listed
    /// - [`ScanError::Traversal`] for an unreadable subdirectory in strict mode
    /// - [`FinderError::Interrupted`] if shutdown was requested
    pub fn enumerate(&self, path: &Path) -> Result<(Vec<FileEntry>, Vec<ScanError>), FinderError> {
        let mut walker = Walker::new(path)?;
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        log::info!("Starting duplicate scan of {}", walker.root().display());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(Phase::Walking, 0);
        }

        let outcome = self.collect_walk(walker.walk());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(Phase::Walking);
        }
        let (files, errors) = outcome?;

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!(
            "Found {} files ({} directories skipped)",
            files.len(),
            errors.len()
        );
        Ok((files, errors))
    }

    /// Apply the traversal failure policy to walker output.
    ///
    /// Fatal errors always abort; an unreadable subdirectory aborts only in
    /// strict mode and is otherwise kept as a non-fatal scan error.
    fn collect_walk(
        &self,
        results: impl Iterator<Item = Result<FileEntry, ScanError>>,
    ) -> Result<(Vec<FileEntry>, Vec<ScanError>), FinderError> {
        let mut files = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(file) => files.push(file),
                Err(e) if e.is_fatal() || self.config.strict => return Err(FinderError::Scan(e)),
                Err(e) => errors.push(e),
            }
        }
        Ok((files, errors))
    }

    /// Find duplicate groups among `entries`.
    ///
    /// Groups are returned in the order their size was first seen in
    /// `entries`; members keep their input order.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Interrupted`] if shutdown was requested.
    pub fn detect(
        &self,
        entries: Vec<FileEntry>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let total = entries.len();
        let mut summary = ScanSummary {
            total_files: total,
            ..Default::default()
        };
        let tracker = ProgressTracker::new(total, self.config.progress_callback.clone());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(Phase::Hashing, total);
        }
        let result = self.run_detection(entries, &tracker, &mut summary);
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(Phase::Hashing);
        }
        let groups = result?;

        summary.processed_files = tracker.processed();
        debug_assert!(tracker.is_complete(), "progress accounting mismatch");
        summary.record_groups(&groups);
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} files, {} bytes wasted, {} skipped",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.wasted_space,
            summary.skipped.len()
        );

        Ok((groups, summary))
    }

    fn run_detection(
        &self,
        entries: Vec<FileEntry>,
        tracker: &ProgressTracker,
        summary: &mut ScanSummary,
    ) -> Result<Vec<DuplicateGroup>, FinderError> {
        let grouping = group_by_size(entries);
        for (file, reason) in grouping.unreadable {
            self.record_skip(summary, file.path, reason);
        }

        // Singletons and unreadable sizes are settled before any hashing.
        let (singletons, candidates): (Vec<SizeGroup>, Vec<SizeGroup>) = grouping
            .groups
            .into_iter()
            .partition(|group| !group.has_duplicates());
        summary.eliminated_by_size = singletons.len();
        tracker.advance(singletons.len() + summary.skipped.len());

        // Slots keep the first-seen order of size groups for the final output.
        let mut slots: Vec<Vec<DuplicateGroup>> = vec![Vec::new(); candidates.len()];
        let mut to_hash: Vec<(usize, FileEntry)> = Vec::new();
        for (slot, group) in candidates.into_iter().enumerate() {
            if group.is_zero_size() {
                log::debug!("{} empty files grouped without hashing", group.len());
                summary.empty_files += group.len();
                tracker.advance(group.len());
                slots[slot].push(DuplicateGroup::new(EMPTY_HASH, 0, group.files));
            } else {
                to_hash.extend(group.files.into_iter().map(|file| (slot, file)));
            }
        }

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!("Hashing {} candidate files", to_hash.len());
        let outcomes = self.hash_candidates(&to_hash, tracker);

        let mut hashed: Vec<Vec<(FileEntry, Hash)>> = vec![Vec::new(); slots.len()];
        for ((slot, file), outcome) in to_hash.into_iter().zip(outcomes) {
            match outcome {
                HashOutcome::Hashed(hash) => {
                    summary.hashed_files += 1;
                    hashed[slot].push((file, hash));
                }
                HashOutcome::Skipped(e) => self.record_skip(summary, file.path, e.reason()),
                HashOutcome::Interrupted => return Err(FinderError::Interrupted),
            }
        }
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        for (slot, members) in hashed.into_iter().enumerate() {
            for hash_group in group_by_hash(members) {
                if hash_group.files.len() > 1 {
                    let size = hash_group.files[0].size.unwrap_or_default();
                    slots[slot].push(DuplicateGroup::new(hash_group.hash, size, hash_group.files));
                }
            }
        }
        Ok(slots.into_iter().flatten().collect())
    }

    /// Hash every candidate on a bounded worker pool.
    ///
    /// Outcomes come back in input order. Each finished file advances the
    /// tracker by one, whether it hashed, was skipped or was cut short.
    fn hash_candidates(
        &self,
        candidates: &[(usize, FileEntry)],
        tracker: &ProgressTracker,
    ) -> Vec<HashOutcome> {
        let hash_one = |(_, file): &(usize, FileEntry)| {
            let outcome = if self.config.is_shutdown_requested() {
                HashOutcome::Interrupted
            } else {
                match self.hasher.full_hash(&file.path) {
                    Ok(hash) => {
                        log::trace!("Hashed {}", file.path.display());
                        HashOutcome::Hashed(hash)
                    }
                    Err(HashError::Interrupted(_)) => HashOutcome::Interrupted,
                    Err(e) => HashOutcome::Skipped(e),
                }
            };
            tracker.advance(1);
            outcome
        };

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
        {
            Ok(pool) => pool.install(|| candidates.par_iter().map(hash_one).collect()),
            Err(e) => {
                log::warn!("Failed to create hashing thread pool, hashing sequentially: {}", e);
                candidates.iter().map(hash_one).collect()
            }
        }
    }

    fn record_skip(&self, summary: &mut ScanSummary, path: PathBuf, reason: String) {
        log::warn!("Skipping {} ({})", path.display(), reason);
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_skip(&path, &reason);
        }
        summary.skipped.push(SkippedFile { path, reason });
    }
}
