//! Embed normalizer.
//!
//! Maps player/iframe URLs of the common video hosts to their canonical
//! watch-page form and accepts other URLs only when a known oEmbed provider
//! claims them. Normalized URLs are fixed points: normalizing them again
//! returns the same string.

use crate::patterns::{
    EMBED_DAILYMOTION, EMBED_VIMEO_FLASH, EMBED_VIMEO_PLAYER, EMBED_YOUTUBE, OEMBED_PROVIDERS,
};
use crate::sanitize::FieldSanitizer;

/// Normalize an embed URL with a default sanitizer.
///
/// # Returns
/// * `Some(url)` with the canonical URL, or `None` when the URL is malformed
///   or no provider supports it
///
/// # Example
///
/// ```rust
/// use press_scrape::embed::normalize_embed;
///
/// assert_eq!(
///     normalize_embed("https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0").as_deref(),
///     Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
/// );
/// assert_eq!(normalize_embed("https://example.com/video.mp4"), None);
/// ```
#[must_use]
pub fn normalize_embed(url: &str) -> Option<String> {
    FieldSanitizer::default().limit_embed(url)
}

/// Normalize a URL that already passed `limit_url`.
#[must_use]
pub(crate) fn normalize_sanitized(url: &str) -> Option<String> {
    if let Some(caps) = EMBED_YOUTUBE.captures(url) {
        return Some(format!("https://www.youtube.com/watch?v={}", &caps[3]));
    }
    if let Some(caps) = EMBED_VIMEO_PLAYER.captures(url) {
        return Some(format!("https://vimeo.com/{}", &caps[1]));
    }
    if let Some(caps) = EMBED_VIMEO_FLASH.captures(url) {
        return Some(format!("https://vimeo.com/{}", &caps[1]));
    }
    if let Some(caps) = EMBED_DAILYMOTION.captures(url) {
        return Some(format!("https://www.dailymotion.com/video/{}", &caps[2]));
    }

    provider_for(url).map(|_| url.to_string())
}

/// Name of the oEmbed provider whose URL scheme matches, without discovery.
#[must_use]
pub fn provider_for(url: &str) -> Option<&'static str> {
    OEMBED_PROVIDERS
        .iter()
        .find(|(_, pattern)| pattern.is_match(url))
        .map(|(name, _)| *name)
}

/// Batch-filter URLs through the normalizer.
///
/// Returns the accepted canonical URLs, deduplicated, in first-seen order.
#[must_use]
pub fn validate_embed_urls<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    let sanitizer = FieldSanitizer::default();
    let mut accepted: Vec<String> = Vec::new();
    for url in urls {
        if let Some(normalized) = sanitizer.limit_embed(url.as_ref()) {
            if !accepted.contains(&normalized) {
                accepted.push(normalized);
            }
        }
    }
    accepted
}
