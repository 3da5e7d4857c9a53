//! HTML sanitization via `ammonia`.
//!
//! Rendered Markdown may carry arbitrary raw HTML, so every output is
//! cleaned against an allow-list before it is written. Two policies exist:
//!
//! * [`SanitizePolicy::Ugc`]: the usual allow-list for user-generated
//!   content. Formatting, links, images, tables and code blocks survive;
//!   scripts, styles, forms, event-handler attributes and non-web URL
//!   schemes do not. Links get `rel="nofollow noopener noreferrer"`.
//! * [`SanitizePolicy::Strict`]: every tag is removed and only escaped
//!   text remains.
//!
//! Attribute values that ammonia cannot restrict on its own (`id`, `dir`,
//! `class` on `<code>` and the column alignment `style` on `<th>`/`<td>`)
//! are checked by an attribute filter.

use crate::config::SanitizePolicy;
use ammonia::Builder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;

/// Sanitize an HTML fragment with the given policy.
pub fn sanitize(html: &str, policy: SanitizePolicy) -> String {
    match policy {
        SanitizePolicy::Ugc => UGC_POLICY.clean(html).to_string(),
        SanitizePolicy::Strict => STRICT_POLICY.clean(html).to_string(),
    }
}

// ── Attribute value patterns ─────────────────────────────────────────────────

static RE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9:\-_.]+$").unwrap());

static RE_CODE_LANGUAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^language-[a-zA-Z0-9]+$").unwrap());

static RE_CELL_ALIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*text-align:\s*(left|center|right)\s*;?\s*$").unwrap());

fn filter_attribute<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    match (element, attribute) {
        (_, "id") => RE_ID.is_match(value).then_some(Cow::Borrowed(value)),
        (_, "dir") => matches!(value.to_ascii_lowercase().as_str(), "ltr" | "rtl" | "auto")
            .then_some(Cow::Borrowed(value)),
        ("code", "class") => RE_CODE_LANGUAGE
            .is_match(value)
            .then_some(Cow::Borrowed(value)),
        ("th" | "td", "style") => RE_CELL_ALIGN
            .is_match(value)
            .then_some(Cow::Borrowed(value)),
        _ => Some(Cow::Borrowed(value)),
    }
}

// ── Policies ─────────────────────────────────────────────────────────────────

static UGC_POLICY: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .url_schemes(HashSet::from(["http", "https", "mailto"]))
        .link_rel(Some("nofollow noopener noreferrer"))
        .add_generic_attributes(["id", "dir"])
        .add_tag_attributes("code", ["class"])
        .add_tag_attributes("th", ["style"])
        .add_tag_attributes("td", ["style"])
        .attribute_filter(filter_attribute);
    builder
});

static STRICT_POLICY: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    builder
});
