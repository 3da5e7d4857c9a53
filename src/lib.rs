//! # viewmd
//!
//! Render Markdown files to sanitized HTML and display them in a browser.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input.md...
//!  │
//!  ├─ 1. Workspace  one temp dir per run (viewmdXXXXXX)
//!  ├─ 2. Read       whole file, lossy UTF-8
//!  ├─ 3. Render     pulldown-cmark (tables, strikethrough, heading ids, smart quotes)
//!  ├─ 4. Sanitize   ammonia, UGC or strict allow-list
//!  ├─ 5. Write      output<N>.html, mode 0600
//!  ├─ 6. Open       OS default handler or a named browser
//!  └─ 7. Cleanup    wait N seconds, then remove the temp dir (unless keep)
//! ```
//!
//! Any error in steps 1-6 aborts the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viewmd::{view, ViewConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ViewConfig::builder().wait_secs(5).build()?;
//!     let report = view(&["README.md", "CHANGELOG.md"], &config).await?;
//!     for file in &report.files {
//!         eprintln!("{} -> {}", file.input.display(), file.output.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! To convert without opening anything:
//!
//! ```rust
//! use viewmd::{render_str, ViewConfig};
//!
//! let html = render_str("# Hello\n\n<script>x()</script>", &ViewConfig::default());
//! assert!(html.starts_with("<h1>Hello</h1>"));
//! assert!(!html.contains("script"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `viewmd` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RenderOptions, SanitizePolicy, ViewConfig, ViewConfigBuilder, DEFAULT_WAIT_SECS};
pub use error::ViewError;
pub use output::{RenderedFile, ViewReport};
pub use pipeline::browser::{Opener, SystemOpener};
pub use progress::{ProgressCallback, ViewProgressCallback};
pub use view::{render_file, render_str, view, view_sync};
