//! Pipeline stages for a view run.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ sanitize ──▶ document ──▶ write ──▶ browser
//! (read)   (markdown)   (ammonia)   (optional)  (0600)    (open)
//! ```
//!
//! 1. [`input`]     read the whole Markdown file, lossily decoded as UTF-8
//! 2. [`render`]    Markdown to an untrusted HTML fragment via pulldown-cmark
//! 3. [`sanitize`]  apply the UGC or strict allow-list
//! 4. [`document`]  wrap the fragment in a page when `standalone` is set
//! 5. [`write`]     write `output<N>.html` into the [`workspace`]
//! 6. [`browser`]   hand the file to the opener on the blocking pool

pub mod browser;
pub mod document;
pub mod input;
pub mod render;
pub mod sanitize;
pub mod workspace;
pub mod write;
