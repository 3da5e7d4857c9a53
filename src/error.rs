//! Error types for the viewmd library.
//!
//! Every failure in a view run is fatal: the first error aborts the run and
//! is returned as `Err(ViewError)` from the top-level `view*` functions.
//! Files for later inputs are never written once an error has occurred, and
//! there is no retry or partial-success mode.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the viewmd library.
#[derive(Debug, Error)]
pub enum ViewError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// No Markdown files were given.
    #[error("No input files given.\nUsage: viewmd [options] input.md...")]
    NoInputs,

    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read.
    #[error("Cannot read input markdown file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The temporary output directory could not be created.
    #[error("Cannot create temporary output directory: {source}")]
    TempDirFailed {
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output HTML file.
    #[error("Cannot write output to file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser or default handler could not be launched.
    #[error("Cannot open file '{path}': {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ViewError {
    /// Map an I/O error from reading `path` to the most specific variant.
    pub(crate) fn from_read(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ViewError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => ViewError::PermissionDenied { path },
            _ => ViewError::ReadFailed { path, source },
        }
    }
}
