//! URL Utility Functions
//!
//! Resolution of scraped relative URLs, protocol-relative dedup keys, and
//! small helpers shared by the sanitizer, the registry and the sideloader.

use url::Url;

use crate::patterns::{DOMAIN_PREFIX, HTTP_SCHEME_PREFIX};

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    let lower = s.to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a string as an absolute http(s) URL.
#[must_use]
pub fn parse_http_url(s: &str) -> Option<Url> {
    is_absolute_url(s).1
}

/// Resolve a scraped `src`/`href` against the page URL.
///
/// - absolute http(s) URLs are returned unchanged
/// - protocol-relative URLs (`//cdn/x.png`) are forced to `https:`
/// - root-relative and path-relative URLs are joined onto `base`
/// - `data:`, `javascript:`, `mailto:` and `tel:` are returned unchanged
///
/// # Arguments
/// * `url_str` - The URL to resolve
/// * `base` - The page URL
#[must_use]
pub fn resolve_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    let lower = url_str.to_ascii_lowercase();
    if lower.starts_with("data:")
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if is_absolute_url(url_str).0 {
        return url_str.to_string();
    }

    if url_str.starts_with("//") {
        return format!("https:{url_str}");
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Protocol-relative key used to deduplicate images and embeds.
///
/// `http://x/a.jpg` and `https://x/a.jpg` share the key `//x/a.jpg`.
#[must_use]
pub fn dedup_key(url: &str) -> String {
    HTTP_SCHEME_PREFIX.replace(url, "").into_owned()
}

/// Scheme and host prefix of a page URL, used to complete root-relative URLs.
#[must_use]
pub fn domain_prefix(url: &str) -> Option<String> {
    DOMAIN_PREFIX.find(url).map(|m| m.as_str().to_string())
}

/// Last path segment of a URL, or `image` when there is none.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    parse_http_url(url)
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .map(|name| urlencoding::decode(&name).map_or(name.clone(), |d| d.into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "image".to_string())
}
