//! Output stage: write a sanitized HTML file.

use crate::error::ViewError;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Write `html` to `path`, creating or truncating it.
///
/// On Unix the file is created with mode `0600`.
pub async fn write_output(path: &Path, html: &str) -> Result<(), ViewError> {
    let to_err = |e| ViewError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut opts = tokio::fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(0o600);

    let mut file = opts.open(path).await.map_err(to_err)?;
    file.write_all(html.as_bytes()).await.map_err(to_err)?;
    file.flush().await.map_err(to_err)?;

    debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_and_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output0.html");
        write_output(&path, "<p>long first version</p>").await.unwrap();
        write_output(&path, "<p>short</p>").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>short</p>");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output0.html");
        write_output(&path, "<p>x</p>").await.unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn missing_directory_is_write_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone").join("output0.html");
        let err = write_output(&path, "x").await.unwrap_err();
        assert!(matches!(err, ViewError::WriteFailed { .. }), "got: {err:?}");
    }
}
