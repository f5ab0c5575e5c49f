//! Character encoding detection and transcoding of fetched pages.
//!
//! The charset is taken from the HTTP `Content-Type` header when present,
//! otherwise from the HTML meta declarations, otherwise UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

use crate::patterns::HEADER_CHARSET;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Bytes of the document inspected for meta declarations.
const META_SNIFF_LEN: usize = 1024;

/// Resolve the encoding of a response body.
///
/// Order: header charset, `<meta charset>`, `<meta http-equiv>`, UTF-8.
/// Unknown labels are skipped rather than treated as errors.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type
        .and_then(header_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(META_SNIFF_LEN)]);

    [&*CHARSET_META_RE, &*CONTENT_TYPE_CHARSET_RE]
        .into_iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Charset label from a `Content-Type` header value.
fn header_charset(content_type: &str) -> Option<String> {
    HEADER_CHARSET
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode a response body to a UTF-8 string.
///
/// Invalid sequences become U+FFFD instead of failing the page.
///
/// # Examples
///
/// ```
/// use rs_doctagger::encoding::decode_html;
///
/// let body = b"<html><body>Caf\xE9</body></html>";
/// let html = decode_html(body, Some("text/html; charset=ISO-8859-1"));
/// assert!(html.contains("Café"));
/// ```
#[must_use]
pub fn decode_html(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, WINDOWS_1252};

    #[test]
    fn header_charset_takes_precedence_over_meta() {
        let html = br#"<html><head><meta charset="utf-8"></head></html>"#;
        let encoding = detect_encoding(html, Some("text/html; charset=windows-1252"));
        assert_eq!(encoding, WINDOWS_1252);
    }

    #[test]
    fn meta_charset_used_without_header_charset() {
        let html = br#"<html><head><meta charset="Shift_JIS"></head></html>"#;
        assert_eq!(detect_encoding(html, Some("text/html")), SHIFT_JIS);
    }

    #[test]
    fn http_equiv_charset_detected() {
        let html = br#"<html><head><meta http-equiv="Content-Type" content="text/html; charset=windows-1252"></head></html>"#;
        assert_eq!(detect_encoding(html, None), WINDOWS_1252);
    }

    #[test]
    fn unknown_labels_fall_back_to_utf8() {
        let html = br#"<html><head><meta charset="not-a-charset"></head></html>"#;
        assert_eq!(detect_encoding(html, Some("text/html; charset=bogus")), UTF_8);
    }

    #[test]
    fn decode_replaces_invalid_utf8() {
        let decoded = decode_html(b"<p>ok \xFF</p>", None);
        assert!(decoded.contains('\u{FFFD}'));
        assert!(decoded.starts_with("<p>ok"));
    }

    #[test]
    fn decode_latin1_body() {
        let decoded = decode_html(b"<p>na\xEFve</p>", Some("text/html; charset=latin1"));
        assert_eq!(decoded, "<p>naïve</p>");
    }
}
