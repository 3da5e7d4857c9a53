//! Configuration types for a view run.
//!
//! All run behaviour is controlled through [`ViewConfig`], built via its
//! [`ViewConfigBuilder`]. The CLI maps its flags onto the builder; library
//! callers set only what they care about and rely on the defaults for the
//! rest.

use crate::error::ViewError;
use crate::pipeline::browser::Opener;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default number of seconds to wait before removing generated files.
pub const DEFAULT_WAIT_SECS: u64 = 3;

/// Prefix of the temporary output directory name.
pub const DEFAULT_TEMP_PREFIX: &str = "viewmd";

/// Configuration for a view run.
///
/// Built via [`ViewConfig::builder()`] or using [`ViewConfig::default()`].
///
/// # Example
/// ```rust
/// use viewmd::{SanitizePolicy, ViewConfig};
///
/// let config = ViewConfig::builder()
///     .keep(true)
///     .policy(SanitizePolicy::Strict)
///     .build()
///     .unwrap();
/// assert!(config.keep);
/// ```
#[derive(Clone)]
pub struct ViewConfig {
    /// Keep the generated HTML files instead of deleting them. Default: false.
    pub keep: bool,

    /// Seconds to wait before deleting generated files. Default: 3.
    ///
    /// The browser usually reads the file asynchronously after the launcher
    /// returns, so the directory must outlive the open call by a margin.
    /// Ignored when `keep` is set.
    pub wait_secs: u64,

    /// Sanitization policy applied to the rendered HTML. Default: [`SanitizePolicy::Ugc`].
    pub policy: SanitizePolicy,

    /// Markdown extensions enabled while rendering.
    pub render: RenderOptions,

    /// Wrap the sanitized fragment in a full HTML document. Default: false.
    pub standalone: bool,

    /// Application used to open outputs. If None, the OS default handler is used.
    pub browser: Option<String>,

    /// Parent directory of the temporary workspace. If None, the system temp dir.
    pub temp_root: Option<PathBuf>,

    /// Prefix of the workspace directory name. Default: "viewmd".
    pub temp_prefix: String,

    /// Pre-constructed opener. Takes precedence over `browser`.
    pub opener: Option<Arc<dyn Opener>>,

    /// Optional progress callback for per-file and cleanup events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            keep: false,
            wait_secs: DEFAULT_WAIT_SECS,
            policy: SanitizePolicy::default(),
            render: RenderOptions::default(),
            standalone: false,
            browser: None,
            temp_root: None,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            opener: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ViewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfig")
            .field("keep", &self.keep)
            .field("wait_secs", &self.wait_secs)
            .field("policy", &self.policy)
            .field("render", &self.render)
            .field("standalone", &self.standalone)
            .field("browser", &self.browser)
            .field("temp_root", &self.temp_root)
            .field("temp_prefix", &self.temp_prefix)
            .field("opener", &self.opener.as_ref().map(|_| "<dyn Opener>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ViewProgressCallback>"),
            )
            .finish()
    }
}

impl ViewConfig {
    /// Create a new builder for `ViewConfig`.
    pub fn builder() -> ViewConfigBuilder {
        ViewConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ViewConfig`].
pub struct ViewConfigBuilder {
    config: ViewConfig,
}

impl fmt::Debug for ViewConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ViewConfigBuilder {
    pub fn keep(mut self, v: bool) -> Self {
        self.config.keep = v;
        self
    }

    pub fn wait_secs(mut self, secs: u64) -> Self {
        self.config.wait_secs = secs;
        self
    }

    pub fn policy(mut self, policy: SanitizePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn render_options(mut self, opts: RenderOptions) -> Self {
        self.config.render = opts;
        self
    }

    pub fn standalone(mut self, v: bool) -> Self {
        self.config.standalone = v;
        self
    }

    pub fn browser(mut self, app: impl Into<String>) -> Self {
        self.config.browser = Some(app.into());
        self
    }

    pub fn temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_root = Some(dir.into());
        self
    }

    pub fn temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.temp_prefix = prefix.into();
        self
    }

    pub fn opener(mut self, opener: Arc<dyn Opener>) -> Self {
        self.config.opener = Some(opener);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ViewConfig, ViewError> {
        let c = &self.config;
        if c.temp_prefix.is_empty() {
            return Err(ViewError::InvalidConfig(
                "Temporary directory prefix must not be empty".into(),
            ));
        }
        if c.temp_prefix.contains(std::path::is_separator) {
            return Err(ViewError::InvalidConfig(format!(
                "Temporary directory prefix must not contain a path separator, got {:?}",
                c.temp_prefix
            )));
        }
        if matches!(c.browser.as_deref(), Some(app) if app.trim().is_empty()) {
            return Err(ViewError::InvalidConfig(
                "Browser application name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Allow-list applied to the rendered HTML before it is written.
///
/// | Policy | Keeps |
/// |--------|-------|
/// | `Ugc`    | Formatting, links, images, tables, code blocks (default) |
/// | `Strict` | Text only; every tag is removed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizePolicy {
    /// Policy for user-generated content. Scripting and styling are removed. (default)
    #[default]
    Ugc,
    /// Strip all markup and keep escaped text.
    Strict,
}

/// Markdown extensions enabled on top of CommonMark.
///
/// The defaults are the "common" set: tables, strikethrough, explicit
/// heading ids (`# Title {#id}`), smart punctuation, definition lists and
/// bare-URL autolinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// GFM pipe tables. Default: true.
    pub tables: bool,
    /// `~~strikethrough~~`. Default: true.
    pub strikethrough: bool,
    /// `{#id .class}` attributes on headings. Default: true.
    pub heading_attributes: bool,
    /// Curly quotes, en/em dashes and ellipses. Default: true.
    pub smart_punctuation: bool,
    /// `Term` / `: Definition` lists. Default: true.
    pub definition_lists: bool,
    /// Turn bare `http://`, `https://` and `www.` URLs in text into links.
    /// Default: true.
    pub autolink: bool,
    /// `[^1]` footnotes. Default: false.
    pub footnotes: bool,
    /// `- [x]` task lists. Default: false.
    ///
    /// The checkboxes are `<input>` elements, which the UGC policy removes.
    pub tasklists: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            heading_attributes: true,
            smart_punctuation: true,
            definition_lists: true,
            autolink: true,
            footnotes: false,
            tasklists: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let c = ViewConfig::default();
        assert!(!c.keep);
        assert_eq!(c.wait_secs, 3);
        assert_eq!(c.policy, SanitizePolicy::Ugc);
        assert_eq!(c.temp_prefix, "viewmd");
        assert!(c.opener.is_none());
    }

    #[test]
    fn render_defaults_are_common_set() {
        let r = RenderOptions::default();
        assert!(r.tables && r.strikethrough && r.heading_attributes);
        assert!(r.smart_punctuation && r.definition_lists && r.autolink);
        assert!(!r.footnotes && !r.tasklists);
    }

    #[test]
    fn builder_sets_fields() {
        let c = ViewConfig::builder()
            .keep(true)
            .wait_secs(0)
            .standalone(true)
            .browser("firefox")
            .build()
            .unwrap();
        assert!(c.keep);
        assert_eq!(c.wait_secs, 0);
        assert!(c.standalone);
        assert_eq!(c.browser.as_deref(), Some("firefox"));
    }

    #[test]
    fn builder_rejects_empty_prefix() {
        let err = ViewConfig::builder().temp_prefix("").build().unwrap_err();
        assert!(matches!(err, ViewError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_prefix_with_separator() {
        let err = ViewConfig::builder()
            .temp_prefix("a/b")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("separator"), "got: {err}");
    }

    #[test]
    fn builder_rejects_blank_browser() {
        assert!(ViewConfig::builder().browser("  ").build().is_err());
    }

    #[test]
    fn policy_serialises_lowercase() {
        let json = serde_json::to_string(&SanitizePolicy::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
    }
}
