//! Field sanitizer and limiter.
//!
//! Every externally supplied scrape field passes through exactly one of the
//! `limit_*` functions before it enters a [`ScrapedData`](crate::ScrapedData).
//! None of them fail: rejected input comes back empty.

use serde_json::{Map, Value};

use crate::embed;
use crate::image;
use crate::options::Limits;
use crate::patterns::{HTML_TAG, PERCENT_OCTET, ROOT_RELATIVE, SCRIPT_STYLE_BLOCK, WHITESPACE_RUN};
use crate::url_utils::parse_http_url;

/// Value-shaping primitives bound to one page.
///
/// The page domain (scheme and host of the source URL) completes
/// root-relative URLs such as `/img/a.png`.
#[derive(Debug, Clone, Default)]
pub struct FieldSanitizer {
    domain: Option<String>,
    limits: Limits,
}

impl FieldSanitizer {
    /// Create a sanitizer with the given limits and no page domain.
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self { domain: None, limits }
    }

    /// Set the page domain used for root-relative URLs.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Replace the page domain.
    pub fn set_domain(&mut self, domain: Option<String>) {
        self.domain = domain.filter(|d| !d.is_empty());
    }

    /// Current page domain, if known.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Limits this sanitizer applies.
    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Shape a free-text value.
    ///
    /// Numbers and booleans pass through as their textual form. Strings are
    /// cut to `max_string_chars` characters, entity-decoded, trimmed and
    /// reduced to plain text. Anything else becomes empty.
    #[must_use]
    pub fn limit_string(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.limit_str(s),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }

    /// [`limit_string`](Self::limit_string) for a string slice.
    #[must_use]
    pub fn limit_str(&self, s: &str) -> String {
        let truncated: String = s.chars().take(self.limits.max_string_chars).collect();
        let decoded = html_escape::decode_html_entities(&truncated);
        sanitize_text_field(decoded.trim())
    }

    /// Shape a URL value. Non-strings become empty.
    #[must_use]
    pub fn limit_url(&self, value: &Value) -> String {
        match value {
            Value::String(s) => self.limit_url_str(s),
            _ => String::new(),
        }
    }

    /// Shape a URL.
    ///
    /// Input longer than `max_url_len` is dropped. The URL is
    /// percent-decoded except for `%25`, root-relative paths are completed
    /// with the page domain, and the result must be a well-formed http(s)
    /// URL. Shaping an already shaped URL returns it unchanged.
    #[must_use]
    pub fn limit_url_str(&self, s: &str) -> String {
        if s.len() > self.limits.max_url_len {
            return String::new();
        }

        let decoded = decode_keeping_percent(s);
        let decoded = decoded.trim();

        let candidate = match self.domain.as_deref() {
            Some(domain) if ROOT_RELATIVE.is_match(decoded) => format!("{domain}{decoded}"),
            _ => decoded.to_string(),
        };

        parse_http_url(&candidate).map(|u| u.to_string()).unwrap_or_default()
    }

    /// Keep the first `max_array_len` items of an array. Non-arrays become empty.
    #[must_use]
    pub fn limit_array<'a>(&self, value: &'a Value) -> &'a [Value] {
        match value {
            Value::Array(items) => &items[..items.len().min(self.limits.max_array_len)],
            _ => &[],
        }
    }

    /// Keep the first `max_array_len` entries of a nested map whose key is
    /// non-empty and at most `max_nested_key_len` characters.
    pub fn limit_map<'a>(&self, value: &'a Value) -> impl Iterator<Item = (&'a String, &'a Value)> {
        let max_key = self.limits.max_nested_key_len;
        let entries: Option<&'a Map<String, Value>> = value.as_object();
        entries
            .into_iter()
            .flat_map(|m| m.iter())
            .take(self.limits.max_array_len)
            .filter(move |(key, _)| !key.is_empty() && key.chars().count() <= max_key)
    }

    /// Shape an image URL: [`limit_url_str`](Self::limit_url_str), then drop
    /// known noise paths.
    #[must_use]
    pub fn limit_img(&self, src: &str) -> String {
        let url = self.limit_url_str(src);
        if url.is_empty() || image::is_noise_url(&url) {
            return String::new();
        }
        url
    }

    /// Shape an embed URL: [`limit_url_str`](Self::limit_url_str), then
    /// normalize it for a known provider.
    #[must_use]
    pub fn limit_embed(&self, src: &str) -> Option<String> {
        let url = self.limit_url_str(src);
        if url.is_empty() {
            return None;
        }
        embed::normalize_sanitized(&url)
    }
}

/// Percent-decode `s` until no escape other than `%25` is left.
///
/// Encoded `%` signs stay encoded, so decoding never exposes a new layer
/// and a second pass over the result changes nothing.
fn decode_keeping_percent(s: &str) -> String {
    let mut current = s.to_string();
    loop {
        let mut bytes = Vec::with_capacity(current.len());
        for (i, part) in current.split("%25").enumerate() {
            if i > 0 {
                bytes.extend_from_slice(b"%25");
            }
            bytes.extend_from_slice(&urlencoding::decode_binary(part.as_bytes()));
        }
        let next = String::from_utf8_lossy(&bytes).into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Reduce text to a single plain-text line.
///
/// Removes script/style blocks and tags, folds line breaks and tabs into
/// single spaces, drops control characters and stray percent-encoded octets.
#[must_use]
pub fn sanitize_text_field(s: &str) -> String {
    let without_blocks = SCRIPT_STYLE_BLOCK.replace_all(s, "");
    let without_tags = HTML_TAG.replace_all(&without_blocks, "");
    let folded = WHITESPACE_RUN.replace_all(&without_tags, " ");
    let visible: String = folded.chars().filter(|c| !c.is_control()).collect();
    let mut text = visible;
    while PERCENT_OCTET.is_match(&text) {
        text = PERCENT_OCTET.replace_all(&text, "").into_owned();
    }
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limit_string_truncates_to_max_chars() {
        let s = FieldSanitizer::default();
        let long = "é".repeat(6000);
        let out = s.limit_string(&json!(long));
        assert_eq!(out.chars().count(), 5000);
    }

    #[test]
    fn test_limit_string_decodes_entities_and_strips_tags() {
        let s = FieldSanitizer::default();
        let out = s.limit_string(&json!("  Tom &amp; Jerry <b>rule</b>\n\tforever  "));
        assert_eq!(out, "Tom & Jerry rule forever");
    }

    #[test]
    fn test_limit_string_passes_scalars() {
        let s = FieldSanitizer::default();
        assert_eq!(s.limit_string(&json!(11)), "11");
        assert_eq!(s.limit_string(&json!(true)), "true");
        assert_eq!(s.limit_string(&json!(["a"])), "");
    }

    #[test]
    fn test_limit_url_rejects_non_http() {
        let s = FieldSanitizer::default();
        assert_eq!(s.limit_url(&json!("javascript:alert(1)")), "");
        assert_eq!(s.limit_url(&json!("ftp://example.com/file")), "");
        assert_eq!(s.limit_url(&json!(42)), "");
    }

    #[test]
    fn test_limit_url_rejects_overlong() {
        let s = FieldSanitizer::default();
        let url = format!("https://example.com/{}", "a".repeat(2100));
        assert_eq!(s.limit_url_str(&url), "");
    }

    #[test]
    fn test_limit_url_completes_root_relative() {
        let s = FieldSanitizer::default().with_domain("https://example.com");
        assert_eq!(s.limit_url_str("/img/a.png"), "https://example.com/img/a.png");
        let bare = FieldSanitizer::default();
        assert_eq!(bare.limit_url_str("/img/a.png"), "");
    }

    #[test]
    fn test_limit_url_decodes() {
        let s = FieldSanitizer::default();
        assert_eq!(
            s.limit_url_str("https%3A%2F%2Fexample.com%2Fpage"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_limit_url_keeps_encoded_percent() {
        let s = FieldSanitizer::default();
        let once = s.limit_url_str("https://example.com/x%2541?q=a%20b");
        assert_eq!(once, "https://example.com/x%2541?q=a%20b");
        assert_eq!(s.limit_url_str(&once), once);
        assert_eq!(s.limit_url_str("https://example.com/%41%2fb"), "https://example.com/A/b");

        let nested = s.limit_url_str("https://example.com/a%%3235");
        assert_eq!(s.limit_url_str(&nested), nested);
    }

    #[test]
    fn test_limit_array_caps() {
        let s = FieldSanitizer::default();
        let items: Vec<Value> = (0..80).map(|i| json!(i)).collect();
        assert_eq!(s.limit_array(&Value::Array(items)).len(), 50);
        assert!(s.limit_array(&json!("nope")).is_empty());
    }

    #[test]
    fn test_limit_map_drops_bad_keys() {
        let s = FieldSanitizer::default();
        let long_key = "k".repeat(101);
        let value = json!({ "": "x", "og:title": "T", long_key: "y" });
        let kept: Vec<&String> = s.limit_map(&value).map(|(k, _)| k).collect();
        assert_eq!(kept, vec!["og:title"]);
    }

    #[test]
    fn test_limit_img_filters_noise() {
        let s = FieldSanitizer::default();
        assert_eq!(s.limit_img("http://site.com/ad/banner.png"), "");
        assert_eq!(s.limit_img("https://site.com/photos/cat.jpg"), "https://site.com/photos/cat.jpg");
    }

    #[test]
    fn test_sanitize_text_field() {
        assert_eq!(sanitize_text_field("a<script>x()</script>b"), "ab");
        assert_eq!(sanitize_text_field("1 < 2"), "1 < 2");
        assert_eq!(sanitize_text_field("line\r\nbreak"), "line break");
        assert_eq!(sanitize_text_field("100%41 sure"), "100 sure");
    }
}
