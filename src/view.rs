//! View entry points.
//!
//! [`view`] runs the whole thing: one workspace, one `output<N>.html` per
//! input in argument order, each opened as soon as it is written, then the
//! cleanup wait. [`render_file`] and [`render_str`] expose the conversion on
//! its own for callers that want the HTML without a browser.

use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::output::{RenderedFile, ViewReport};
use crate::pipeline::{browser, document, input, render, sanitize, workspace::Workspace, write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Render, sanitize, write and open every input, then clean up.
///
/// # Arguments
/// * `inputs`: Markdown files, processed in order
/// * `config`: run configuration
///
/// # Errors
/// Every error is fatal and returned immediately; files for later inputs
/// are not written. With `keep` set, the workspace and the files already
/// written stay on disk; otherwise they are removed as the error
/// propagates.
pub async fn view<P: AsRef<Path>>(
    inputs: &[P],
    config: &ViewConfig,
) -> Result<ViewReport, ViewError> {
    if inputs.is_empty() {
        return Err(ViewError::NoInputs);
    }

    let workspace = Workspace::create(
        config.temp_root.as_deref(),
        &config.temp_prefix,
        config.keep,
    )?;
    let temp_dir = workspace.path().to_path_buf();
    let opener = browser::resolve_opener(config.opener.as_ref(), config.browser.as_deref());
    let total = inputs.len();

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    let mut files = Vec::with_capacity(total);
    for (index, input_path) in inputs.iter().enumerate() {
        let input_path = input_path.as_ref();
        let html = render_file(input_path, config).await?;

        let output = workspace.output_path(index);
        write::write_output(&output, &html).await?;
        info!("Output written to {}", output.display());

        browser::open_output(&opener, &output).await?;
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_opened(index, total, &output);
        }

        files.push(RenderedFile {
            index,
            input: input_path.to_path_buf(),
            output,
            bytes: html.len(),
        });
    }

    let kept = workspace.is_persistent();
    let (removed, waited_secs) = if kept {
        info!("Keeping output in {}", temp_dir.display());
        (false, 0)
    } else {
        (cleanup_after_wait(workspace, config).await, config.wait_secs)
    };

    Ok(ViewReport {
        temp_dir,
        files,
        kept,
        removed,
        waited_secs,
    })
}

/// Synchronous wrapper around [`view`].
///
/// Creates a temporary tokio runtime internally.
pub fn view_sync<P: AsRef<Path>>(
    inputs: &[P],
    config: &ViewConfig,
) -> Result<ViewReport, ViewError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ViewError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(view(inputs, config))
}

/// Read one Markdown file and return its sanitized HTML.
///
/// Nothing is written and no browser is opened. With `standalone`, the
/// document title is the first heading, or the file name.
pub async fn render_file(path: &Path, config: &ViewConfig) -> Result<String, ViewError> {
    let markdown = input::read_markdown(path).await?;
    let body = render_body(&markdown, config);

    if !config.standalone {
        return Ok(body);
    }
    let title = render::extract_title(&markdown).unwrap_or_else(|| fallback_title(path));
    Ok(document::wrap_document(&body, &title))
}

/// Convert a Markdown string to sanitized HTML.
///
/// With `standalone`, the first heading is the title, or "Untitled".
pub fn render_str(markdown: &str, config: &ViewConfig) -> String {
    let body = render_body(markdown, config);
    if !config.standalone {
        return body;
    }
    let title = render::extract_title(markdown).unwrap_or_else(|| "Untitled".to_string());
    document::wrap_document(&body, &title)
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn render_body(markdown: &str, config: &ViewConfig) -> String {
    let unsafe_html = render::render_markdown(markdown, &config.render);
    let html = sanitize::sanitize(&unsafe_html, config.policy);
    debug!(
        "Sanitized {} bytes of HTML down to {} ({:?} policy)",
        unsafe_html.len(),
        html.len(),
        config.policy
    );
    html
}

fn fallback_title(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Sleep for `wait_secs`, then remove the workspace.
///
/// The sleep is not cancellable; once it ends, removal is unconditional.
async fn cleanup_after_wait(workspace: Workspace, config: &ViewConfig) -> bool {
    let dir: PathBuf = workspace.path().to_path_buf();

    if let Some(ref cb) = config.progress_callback {
        cb.on_cleanup_wait(&dir, config.wait_secs);
    }
    debug!(
        "Waiting {}s before removing {}",
        config.wait_secs,
        dir.display()
    );
    tokio::time::sleep(Duration::from_secs(config.wait_secs)).await;

    let removed = workspace.cleanup();
    if let Some(ref cb) = config.progress_callback {
        cb.on_cleanup_complete(&dir, removed);
    }
    removed
}
