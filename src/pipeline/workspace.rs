//! The process-scoped temporary output directory.
//!
//! One workspace is created per run, after argument checks pass and before
//! the first input is read. A temporary workspace is removed either by an
//! explicit [`Workspace::cleanup`] after the wait, or by `Drop` when the run
//! aborts early. A persistent workspace (`keep`) is never removed.

use crate::error::ViewError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// The directory holding `output<N>.html` for one run.
pub enum Workspace {
    /// Removed on cleanup or drop.
    Temporary(TempDir),
    /// Left on disk.
    Persistent(PathBuf),
}

impl Workspace {
    /// Create a fresh directory named `<prefix>XXXXXX` under `root`, or
    /// under the system temp dir when `root` is None.
    ///
    /// With `keep`, the directory is detached from its guard immediately so
    /// that it survives every exit path, including fatal errors.
    pub fn create(root: Option<&Path>, prefix: &str, keep: bool) -> Result<Self, ViewError> {
        let dir = match root {
            Some(root) => TempDir::with_prefix_in(prefix, root),
            None => TempDir::with_prefix(prefix),
        }
        .map_err(|source| ViewError::TempDirFailed { source })?;

        debug!("Created workspace {}", dir.path().display());

        if keep {
            Ok(Workspace::Persistent(dir.keep()))
        } else {
            Ok(Workspace::Temporary(dir))
        }
    }

    /// Path of the workspace directory.
    pub fn path(&self) -> &Path {
        match self {
            Workspace::Temporary(dir) => dir.path(),
            Workspace::Persistent(path) => path,
        }
    }

    /// True when the directory will be left on disk.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Workspace::Persistent(_))
    }

    /// Path of the output file for the input at `index`.
    pub fn output_path(&self, index: usize) -> PathBuf {
        self.path().join(output_file_name(index))
    }

    /// Recursively remove a temporary workspace.
    ///
    /// Returns true if the directory was removed. Failures are logged, not
    /// returned: the outputs have already been displayed by then. A
    /// persistent workspace is left alone and reports false.
    pub fn cleanup(self) -> bool {
        match self {
            Workspace::Temporary(dir) => {
                let path = dir.path().to_path_buf();
                match dir.close() {
                    Ok(()) => {
                        debug!("Removed workspace {}", path.display());
                        true
                    }
                    Err(e) => {
                        warn!("Failed to remove {}: {}", path.display(), e);
                        false
                    }
                }
            }
            Workspace::Persistent(_) => false,
        }
    }
}

/// File name of the output for the input at `index` (0-based).
pub fn output_file_name(index: usize) -> String {
    format!("output{index}.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_are_zero_based() {
        assert_eq!(output_file_name(0), "output0.html");
        assert_eq!(output_file_name(12), "output12.html");
    }

    #[test]
    fn temporary_workspace_is_removed_on_cleanup() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(Some(root.path()), "viewmd", false).unwrap();
        let path = ws.path().to_path_buf();
        assert!(path.is_dir());
        assert!(path.starts_with(root.path()));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("viewmd"));

        std::fs::write(ws.output_path(0), "x").unwrap();
        assert!(ws.cleanup());
        assert!(!path.exists());
    }

    #[test]
    fn temporary_workspace_is_removed_on_drop() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(Some(root.path()), "viewmd", false).unwrap();
        let path = ws.path().to_path_buf();
        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn persistent_workspace_survives() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(Some(root.path()), "viewmd", true).unwrap();
        assert!(ws.is_persistent());
        let path = ws.path().to_path_buf();
        assert!(!ws.cleanup());
        assert!(path.is_dir());
    }

    #[test]
    fn missing_root_is_temp_dir_failed() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("does-not-exist");
        let err = Workspace::create(Some(&missing), "viewmd", false).err().unwrap();
        assert!(matches!(err, ViewError::TempDirFailed { .. }));
    }
}
