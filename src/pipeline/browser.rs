//! Display stage: hand an output file to the browser.
//!
//! The [`Opener`] trait is the seam between the pipeline and the desktop.
//! [`SystemOpener`] launches the OS default handler (or a named
//! application) through the `open` crate; tests and embedders inject their
//! own implementation through [`crate::ViewConfigBuilder::opener`].

use crate::error::ViewError;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Something that can display a file.
///
/// Called from the blocking thread pool, so implementations may block
/// until the launcher returns.
pub trait Opener: Send + Sync {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens files with the OS default handler, or with `app` when set.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    app: Option<String>,
}

impl SystemOpener {
    /// Use the platform's default handler for `.html` files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the named application, e.g. `firefox`.
    pub fn with_app(app: impl Into<String>) -> Self {
        Self {
            app: Some(app.into()),
        }
    }

    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }
}

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        match self.app.as_deref() {
            Some(app) => open::with(path, app),
            None => open::that(path),
        }
    }
}

/// Pick the opener for a run: an injected one wins over `browser`.
pub fn resolve_opener(injected: Option<&Arc<dyn Opener>>, browser: Option<&str>) -> Arc<dyn Opener> {
    if let Some(opener) = injected {
        return Arc::clone(opener);
    }
    match browser {
        Some(app) => Arc::new(SystemOpener::with_app(app)),
        None => Arc::new(SystemOpener::new()),
    }
}

/// Open `path` with `opener` on the blocking pool.
pub async fn open_output(opener: &Arc<dyn Opener>, path: &Path) -> Result<(), ViewError> {
    let opener = Arc::clone(opener);
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || opener.open(&target))
        .await
        .map_err(|e| ViewError::Internal(format!("Opener task panicked: {}", e)))?
        .map_err(|source| ViewError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Opened {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        opened: Mutex<Vec<PathBuf>>,
    }

    impl Opener for Recording {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    struct Failing;

    impl Opener for Failing {
        fn open(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
        }
    }

    #[test]
    fn injected_opener_wins() {
        let rec: Arc<dyn Opener> = Arc::new(Recording::default());
        let chosen = resolve_opener(Some(&rec), Some("firefox"));
        assert!(Arc::ptr_eq(&rec, &chosen));
    }

    #[test]
    fn browser_name_is_kept() {
        assert_eq!(SystemOpener::with_app("firefox").app(), Some("firefox"));
        assert_eq!(SystemOpener::new().app(), None);
    }

    #[tokio::test]
    async fn open_output_calls_opener() {
        let rec = Arc::new(Recording::default());
        let opener: Arc<dyn Opener> = rec.clone();
        open_output(&opener, Path::new("/tmp/output0.html")).await.unwrap();
        assert_eq!(
            *rec.opened.lock().unwrap(),
            vec![PathBuf::from("/tmp/output0.html")]
        );
    }

    #[tokio::test]
    async fn open_failure_is_open_failed() {
        let opener: Arc<dyn Opener> = Arc::new(Failing);
        let err = open_output(&opener, Path::new("/tmp/output0.html"))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::OpenFailed { .. }), "got: {err:?}");
        assert!(err.to_string().contains("no browser"));
    }
}
