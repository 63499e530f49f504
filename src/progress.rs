//! Progress reporting for the duplicate detection pipeline.
//!
//! - [`ProgressCallback`] is the event contract the detector reports to:
//!   phase boundaries, `(processed, total)` pairs and per-file skips.
//! - [`ProgressTracker`] is the shared counter behind those events. It is
//!   safe to advance from several hashing workers and always emits strictly
//!   increasing `processed` values.
//! - [`Progress`] renders the events as indicatif spinners and bars on
//!   stderr.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Pipeline phases that report progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Directory enumeration (total unknown)
    Walking,
    /// Size grouping and content hashing (total = enumerated files)
    Hashing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Walking => write!(f, "walking"),
            Phase::Hashing => write!(f, "hashing"),
        }
    }
}

/// Progress callback for duplicate finding phases.
///
/// Implement this trait to receive progress updates during
/// the duplicate detection pipeline.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts. `total` is 0 when unknown.
    fn on_phase_start(&self, phase: Phase, total: usize);

    /// Called whenever the processed count advances.
    ///
    /// `processed` never decreases within a phase and reaches `total`
    /// exactly once the phase completes.
    fn on_progress(&self, processed: usize, total: usize);

    /// Called when a file is excluded because it could not be read.
    fn on_skip(&self, _path: &Path, _reason: &str) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: Phase);
}

/// Synchronized processed-files counter.
///
/// Every advance and the event it emits happen under one lock, so observers
/// see a monotonic sequence even when several workers finish at once.
pub struct ProgressTracker {
    processed: Mutex<usize>,
    total: usize,
    callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("processed", &self.processed())
            .field("total", &self.total)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl ProgressTracker {
    /// Create a tracker for `total` files.
    #[must_use]
    pub fn new(total: usize, callback: Option<Arc<dyn ProgressCallback>>) -> Self {
        Self {
            processed: Mutex::new(0),
            total,
            callback,
        }
    }

    /// Mark `count` more files as processed and emit a progress event.
    ///
    /// Returns the new processed count.
    pub fn advance(&self, count: usize) -> usize {
        let mut processed = self.processed.lock().unwrap_or_else(PoisonError::into_inner);
        *processed += count;
        debug_assert!(
            *processed <= self.total,
            "processed {} exceeds total {}",
            *processed,
            self.total
        );
        if let Some(ref callback) = self.callback {
            callback.on_progress(*processed, self.total);
        }
        *processed
    }

    /// Files processed so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        *self.processed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Files to process in total.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether every file has been accounted for.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }
}

/// Terminal progress reporter using indicatif.
pub struct Progress {
    walking: Mutex<Option<ProgressBar>>,
    hashing: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupefinder::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            walking: Mutex::new(None),
            hashing: Mutex::new(None),
            quiet,
        }
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn hashing_style() -> ProgressStyle {
        ProgressStyle::with_template("[{bar:30.green}] {pos}/{len} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█-")
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        if self.quiet {
            return;
        }

        match phase {
            Phase::Walking => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::walking_style());
                pb.set_message("Counting files");
                pb.enable_steady_tick(Duration::from_millis(100));
                *self.walking.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
            }
            Phase::Hashing => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::hashing_style());
                *self.hashing.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
            }
        }
    }

    fn on_progress(&self, processed: usize, _total: usize) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.hashing.lock().unwrap_or_else(PoisonError::into_inner) {
            pb.set_position(processed as u64);
        }
    }

    fn on_phase_end(&self, phase: Phase) {
        let slot = match phase {
            Phase::Walking => &self.walking,
            Phase::Hashing => &self.hashing,
        };
        if let Some(pb) = slot.lock().unwrap_or_else(PoisonError::into_inner).take() {
            pb.finish_and_clear();
        }
    }
}
