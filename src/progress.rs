//! Progress-callback trait for view-run events.
//!
//! Inject an [`Arc<dyn ViewProgressCallback>`] via
//! [`crate::config::ViewConfigBuilder::progress_callback`] to be told when
//! each file has been opened and when the cleanup wait starts and ends. The
//! CLI uses it to draw a countdown spinner; library callers can forward the
//! events anywhere.
//!
//! # Example
//!
//! ```rust
//! use viewmd::{ViewConfig, ViewProgressCallback};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     opened: AtomicUsize,
//! }
//!
//! impl ViewProgressCallback for CountingCallback {
//!     fn on_file_opened(&self, _index: usize, _total: usize, _output: &Path) {
//!         self.opened.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { opened: AtomicUsize::new(0) });
//! let config = ViewConfig::builder()
//!     .progress_callback(counter as Arc<dyn ViewProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the view pipeline as it works through the inputs.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ViewProgressCallback: Send + Sync {
    /// Called once, after the workspace is created and before any file is read.
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called after `output` has been written and handed to the opener.
    ///
    /// # Arguments
    /// * `index`      : 0-based position of the input on the command line
    /// * `total_files`: number of inputs in the run
    /// * `output`     : path of the written HTML file
    fn on_file_opened(&self, index: usize, total_files: usize, output: &Path) {
        let _ = (index, total_files, output);
    }

    /// Called just before the cleanup sleep starts. Not called with `keep`.
    fn on_cleanup_wait(&self, dir: &Path, wait_secs: u64) {
        let _ = (dir, wait_secs);
    }

    /// Called after the workspace removal was attempted.
    fn on_cleanup_complete(&self, dir: &Path, removed: bool) {
        let _ = (dir, removed);
    }
}

/// Type alias for a shareable progress callback.
pub type ProgressCallback = Arc<dyn ViewProgressCallback>;
