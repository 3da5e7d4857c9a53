//! Markdown rendering via `pulldown-cmark`.
//!
//! The output of this stage is untrusted: raw HTML in the source passes
//! straight through, so it must go through [`super::sanitize`] before it is
//! written anywhere a browser will load it.
//!
//! Bare URLs are not part of CommonMark, so with
//! [`RenderOptions::autolink`] the event stream is rewritten before it
//! reaches the HTML writer: URLs in plain text become link events. Text
//! inside links, images, code and raw `<a>` elements is left alone.

use crate::config::RenderOptions;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;

/// `http(s)://` or `www.` up to whitespace, not ending in punctuation.
static RE_BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>]*[^\s<>.,:;!?'"*_~()\[\]{}]"#).unwrap()
});

static RE_RAW_ANCHOR_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^<a[\s>]").unwrap());

static RE_RAW_ANCHOR_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^</a\s*>").unwrap());

/// Translate [`RenderOptions`] into parser flags.
pub fn parser_options(opts: &RenderOptions) -> Options {
    let mut options = Options::empty();
    if opts.tables {
        options.insert(Options::ENABLE_TABLES);
    }
    if opts.strikethrough {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }
    if opts.heading_attributes {
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    }
    if opts.smart_punctuation {
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
    }
    if opts.footnotes {
        options.insert(Options::ENABLE_FOOTNOTES);
    }
    if opts.tasklists {
        options.insert(Options::ENABLE_TASKLISTS);
    }
    if opts.definition_lists {
        options.insert(Options::ENABLE_DEFINITION_LIST);
    }
    options
}

/// Render Markdown to an (unsanitized) HTML fragment.
pub fn render_markdown(markdown: &str, opts: &RenderOptions) -> String {
    let events = TextMergeStream::new(Parser::new_ext(markdown, parser_options(opts)));
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    if opts.autolink {
        html::push_html(&mut out, autolink(events));
    } else {
        html::push_html(&mut out, events);
    }
    out
}

/// Replace bare URLs in text events with link events.
///
/// Expects merged text events, otherwise a URL split across two events is
/// missed.
fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> impl Iterator<Item = Event<'a>> {
    // Open links, images and code blocks, Markdown or raw HTML.
    let mut depth = 0usize;
    events.flat_map(move |event| {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                depth = depth.saturating_sub(1)
            }
            Event::InlineHtml(tag) if RE_RAW_ANCHOR_OPEN.is_match(tag) => depth += 1,
            Event::InlineHtml(tag) if RE_RAW_ANCHOR_CLOSE.is_match(tag) => {
                depth = depth.saturating_sub(1)
            }
            Event::Text(text) if depth == 0 && RE_BARE_URL.is_match(text) => {
                return linkify_text(text);
            }
            _ => {}
        }
        vec![event]
    })
}

fn linkify_text<'a>(text: &str) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut last = 0;

    for m in RE_BARE_URL.find_iter(text) {
        if m.start() > last {
            events.push(Event::Text(text[last..m.start()].to_string().into()));
        }
        let url = m.as_str();
        let href = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: "".into(),
            id: "".into(),
        }));
        events.push(Event::Text(url.to_string().into()));
        events.push(Event::End(TagEnd::Link));
        last = m.end();
    }
    if last < text.len() {
        events.push(Event::Text(text[last..].to_string().into()));
    }
    events
}

/// Plain text of the first heading, if any.
///
/// Inline markup inside the heading is dropped; only text and code spans
/// contribute. Returns None for an empty heading.
pub fn extract_title(markdown: &str) -> Option<String> {
    let mut in_heading = false;
    let mut title = String::new();

    for event in Parser::new_ext(markdown, Options::ENABLE_HEADING_ATTRIBUTES) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                title.clear();
                in_heading = false;
            }
            Event::Text(text) | Event::Code(text) if in_heading => title.push_str(&text),
            Event::SoftBreak | Event::HardBreak if in_heading => title.push(' '),
            _ => {}
        }
    }
    None
}
