//! Ctrl+C handling.
//!
//! A single process-wide [`ShutdownHandler`] owns an `AtomicBool` that the
//! walker, the hasher and the detector poll. Pressing Ctrl+C sets the flag;
//! the scan then unwinds with `FinderError::Interrupted` and the process
//! exits with code 130.
//!
//! ```rust,no_run
//! use dupefinder::duplicates::FinderConfig;
//! use dupefinder::signal::install_handler;
//!
//! let handler = install_handler();
//! let config = FinderConfig::default().with_shutdown_flag(handler.flag());
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Set the flag by hand.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear the flag so the handler can serve another scan.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// The flag to hand to `FinderConfig::with_shutdown_flag`.
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the Ctrl+C hook once per process and return its handler.
///
/// Later calls return the same handler with the flag cleared. If the hook
/// cannot be registered (another library already owns SIGINT), the returned
/// handler still works for [`ShutdownHandler::request_shutdown`].
pub fn install_handler() -> ShutdownHandler {
    let handler = GLOBAL_HANDLER.get_or_init(|| {
        let handler = ShutdownHandler::new();
        let flag = handler.flag();
        let hooked = ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\nInterrupted. Cleaning up...");
            let _ = stderr.flush();
        });
        if let Err(e) = hooked {
            log::debug!("Ctrl+C handler not installed: {}", e);
        }
        handler
    });
    handler.reset();
    handler.clone()
}
