//! Standalone document wrapper.
//!
//! Browsers guess the encoding of a bare HTML fragment loaded from disk,
//! which garbles non-ASCII text on some platforms. Wrapping the sanitized
//! body in a minimal page pins the charset and gives the tab a title.

use html_escape::encode_text;

/// Wrap a sanitized HTML fragment in a minimal HTML5 document.
///
/// `title` is escaped; `body` is inserted as-is and must already be
/// sanitized.
pub fn wrap_document(body: &str, title: &str) -> String {
    let mut out = String::with_capacity(body.len() + title.len() + 160);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>");
    out.push_str(&encode_text(title));
    out.push_str("</title>\n</head>\n<body>\n");
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_with_charset_and_title() {
        let doc = wrap_document("<p>hi</p>", "Notes");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"utf-8\">"));
        assert!(doc.contains("<title>Notes</title>"));
        assert!(doc.contains("<body>\n<p>hi</p>\n</body>"));
    }

    #[test]
    fn title_is_escaped() {
        let doc = wrap_document("", "<script>x</script> & co");
        assert!(doc.contains("<title>&lt;script&gt;x&lt;/script&gt; &amp; co</title>"), "got: {doc}");
    }
}
