//! Result types returned by a view run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a completed view run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewReport {
    /// The workspace directory the outputs were written to.
    pub temp_dir: PathBuf,
    /// One entry per input, in argument order.
    pub files: Vec<RenderedFile>,
    /// True when the workspace was kept on disk.
    pub kept: bool,
    /// True when the workspace was deleted after the wait.
    pub removed: bool,
    /// Seconds waited before cleanup (0 when kept).
    pub waited_secs: u64,
}

impl ViewReport {
    /// Paths of every written output, in argument order.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().map(|f| &f.output)
    }
}

/// One input file and the HTML written for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedFile {
    /// 0-based position of the input on the command line.
    pub index: usize,
    /// The Markdown file as given.
    pub input: PathBuf,
    /// The written `output<index>.html`.
    pub output: PathBuf,
    /// Size of the sanitized HTML in bytes.
    pub bytes: usize,
}
