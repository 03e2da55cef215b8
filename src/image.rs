//! Image classifier.
//!
//! Separates content images from noise: ads, spacers, spinners, share
//! buttons, thumbnails, tracking pixels, avatars and undersized images.

use std::borrow::Cow;

use crate::options::Limits;
use crate::patterns::{
    GRAVATAR_INSECURE, IMG_AD_PATH, IMG_PLATFORM_ASSET_PATH, IMG_SHARE_BUTTON, IMG_SPINNER_DECORATED,
    IMG_SPINNER_PLAIN, IMG_STATS_GIF, IMG_THUMBNAIL, IMG_TINY_DIMENSIONS, IMG_TRACKING_PIXEL,
};

/// Check an image URL against the known noise path patterns.
///
/// This is the URL-only part of [`is_noise_image`]; it does not look at
/// dimensions, classes or avatars.
#[must_use]
pub fn is_noise_url(src: &str) -> bool {
    IMG_AD_PATH.is_match(src)
        || IMG_SHARE_BUTTON.is_match(src)
        || IMG_SPINNER_PLAIN.is_match(src)
        || IMG_SPINNER_DECORATED.is_match(src)
        || IMG_THUMBNAIL.is_match(src)
        || src.contains(IMG_PLATFORM_ASSET_PATH)
        || IMG_TINY_DIMENSIONS.is_match(src)
        || IMG_TRACKING_PIXEL.is_match(src)
        || IMG_STATS_GIF.is_match(src)
}

/// Decide whether a scraped `<img>` is noise.
///
/// # Arguments
/// * `src` - Image URL (already resolved)
/// * `css_class` - Value of the `class` attribute
/// * `width` / `height` - Explicit dimensions, if the markup gives them
/// * `limits` - Minimum width and height
///
/// # Returns
/// * `true` when the image should be dropped
#[must_use]
pub fn is_noise_image(
    src: &str,
    css_class: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
    limits: &Limits,
) -> bool {
    let src = src.trim();
    if src.is_empty() || src.to_ascii_lowercase().starts_with("data:") {
        return true;
    }

    if width.is_some_and(|w| w < limits.min_image_width)
        || height.is_some_and(|h| h < limits.min_image_height)
    {
        return true;
    }

    if contains_avatar(src) || css_class.is_some_and(contains_avatar) {
        return true;
    }

    is_noise_url(src)
}

/// Case-insensitive "avatar" check shared with the dedup registry's flood guard.
#[must_use]
pub fn contains_avatar(s: &str) -> bool {
    s.to_ascii_lowercase().contains("avatar")
}

/// Rewrite numbered plain-HTTP gravatar hosts to the secure host.
#[must_use]
pub fn upgrade_gravatar(src: &str) -> Cow<'_, str> {
    GRAVATAR_INSECURE.replace(src, "https://secure.gravatar.com/")
}

/// Parse a `width`/`height` attribute. Zero and non-numeric values count as absent.
#[must_use]
pub fn parse_dimension(value: Option<&str>) -> Option<u32> {
    value
        .map(|v| v.trim().trim_end_matches("px"))
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(src: &str) -> bool {
        is_noise_image(src, None, None, None, &Limits::default())
    }

    #[test]
    fn test_ad_path_is_noise() {
        assert!(noise("http://site.com/ad/banner.png"));
        assert!(noise("http://site.com/adx/1.png"));
    }

    #[test]
    fn test_regular_image_is_content() {
        assert!(!noise("https://site.com/uploads/2024/harbour.jpg"));
    }

    #[test]
    fn test_empty_and_data_uri_are_noise() {
        assert!(noise(""));
        assert!(noise("data:image/gif;base64,R0lGODlhAQABAAAAACw="));
    }

    #[test]
    fn test_small_dimensions_are_noise() {
        let limits = Limits::default();
        let src = "https://site.com/photo.jpg";
        assert!(is_noise_image(src, None, Some(100), None, &limits));
        assert!(is_noise_image(src, None, None, Some(90), &limits));
        assert!(!is_noise_image(src, None, Some(800), Some(600), &limits));
    }

    #[test]
    fn test_avatar_in_src_or_class() {
        let limits = Limits::default();
        assert!(is_noise_image("https://site.com/u/Avatar-12.jpg", None, None, None, &limits));
        assert!(is_noise_image("https://site.com/u/me.jpg", Some("author-avatar"), None, None, &limits));
    }

    #[test]
    fn test_spinners_and_spacers() {
        assert!(noise("https://site.com/img/spinner.gif"));
        assert!(noise("https://site.com/img/ajax-loading_2x.png"));
        assert!(noise("https://site.com/img/blank.png"));
        assert!(noise("https://site.com/rss.png"));
    }

    #[test]
    fn test_share_buttons_and_thumbs() {
        assert!(noise("https://site.com/sharethis-button.png"));
        assert!(noise("https://site.com/img/post-thumb-150.jpg"));
    }

    #[test]
    fn test_platform_assets_and_tracking() {
        assert!(noise("https://site.com/wp-includes/images/smilies/smile.png"));
        assert!(noise("https://site.com/icons/icon-16x16.png"));
        assert!(noise("https://pixel.quantserve.com/pixel/p-1.gif"));
        assert!(noise("https://stats.site.com/g.gif?v=1"));
    }

    #[test]
    fn test_upgrade_gravatar() {
        assert_eq!(
            upgrade_gravatar("http://0.gravatar.com/avatar/abc?s=96"),
            "https://secure.gravatar.com/avatar/abc?s=96"
        );
        assert_eq!(upgrade_gravatar("https://site.com/a.jpg"), "https://site.com/a.jpg");
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension(Some("640")), Some(640));
        assert_eq!(parse_dimension(Some(" 320px")), Some(320));
        assert_eq!(parse_dimension(Some("100%")), None);
        assert_eq!(parse_dimension(Some("0")), None);
        assert_eq!(parse_dimension(None), None);
    }
}
