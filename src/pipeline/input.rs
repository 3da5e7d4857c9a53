//! Input stage: read a Markdown file into memory.
//!
//! The whole file is read in one call; there is no streaming. Bytes that
//! are not valid UTF-8 are replaced with U+FFFD rather than rejected, so a
//! Latin-1 README still renders instead of aborting the run.

use crate::error::ViewError;
use std::path::Path;
use tracing::debug;

/// Read the Markdown file at `path`.
///
/// Errors are mapped to [`ViewError::FileNotFound`],
/// [`ViewError::PermissionDenied`] or [`ViewError::ReadFailed`].
pub async fn read_markdown(path: &Path) -> Result<String, ViewError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ViewError::from_read(path.to_path_buf(), e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(decode_lossy(bytes))
}

/// Decode bytes as UTF-8, replacing invalid sequences.
///
/// A leading byte-order mark is dropped so it does not end up in front of
/// the first heading.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn decode_valid_utf8() {
        assert_eq!(decode_lossy(b"# Hi\n".to_vec()), "# Hi\n");
    }

    #[test]
    fn decode_replaces_invalid_bytes() {
        let s = decode_lossy(vec![b'a', 0xFF, b'b']);
        assert_eq!(s, "a\u{FFFD}b");
    }

    #[test]
    fn decode_strips_bom() {
        let mut bytes = "\u{FEFF}".as_bytes().to_vec();
        bytes.extend_from_slice(b"# Title");
        assert_eq!(decode_lossy(bytes), "# Title");
    }

    #[tokio::test]
    async fn read_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "hello *world*").unwrap();
        assert_eq!(read_markdown(&path).await.unwrap(), "hello *world*");
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_markdown(&dir.path().join("nope.md")).await.unwrap_err();
        assert!(matches!(err, ViewError::FileNotFound { .. }), "got: {err:?}");
    }
}
