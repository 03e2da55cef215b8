//! Compiled regex patterns for scraping, classification and validation.
//!
//! All patterns are compiled once on first use using `LazyLock`.
//! Patterns are organized by the component that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Image Noise Patterns
// =============================================================================

/// Ad directories: `/ad/`, `/ads/`, `/adx/`.
pub static IMG_AD_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/ad[sx]?/").expect("IMG_AD_PATH regex"));

/// Share-button images such as `/sharethis-button.png` or `/share-this_32.gif`.
pub static IMG_SHARE_BUTTON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(/share-?this[^.]+?\.[a-z0-9]{3,4})(\?.*)?$").expect("IMG_SHARE_BUTTON regex")
});

/// Plain spinner/loader/spacer filenames.
pub static IMG_SPINNER_PLAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/(spinner|loading|spacer|blank|rss)\.(gif|jpg|png)")
        .expect("IMG_SPINNER_PLAIN regex")
});

/// Spinner/loader/spacer filenames decorated with a prefix or suffix
/// (`/ajax-loading_2x.png`, `/blank-spacer.gif`).
pub static IMG_SPINNER_DECORATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/([^./]+[-_])?(spinner|loading|spacer|blank)s?([-_][^./]+)?\.[a-z0-9]{3,4}")
        .expect("IMG_SPINNER_DECORATED regex")
});

/// Thumbnail filenames.
pub static IMG_THUMBNAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([^./]+[-_])?thumb[^.]*\.(gif|jpg|png)$").expect("IMG_THUMBNAIL regex")
});

/// `NxM.ext` tiny-dimension filenames (`icon-16x16.png`).
pub static IMG_TINY_DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[^\d]\d{1,2}x\d+\.(gif|jpg|png)$").expect("IMG_TINY_DIMENSIONS regex")
});

/// Tracking pixel hosts.
pub static IMG_TRACKING_PIXEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/pixel\.(mathtag|quantserve)\.com").expect("IMG_TRACKING_PIXEL regex")
});

/// Stats 1x1 gifs (`/g.gif`, `/b.gif?v=...`).
pub static IMG_STATS_GIF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/[gb]\.gif(\?.+)?$").expect("IMG_STATS_GIF regex"));

/// Platform interface assets.
pub const IMG_PLATFORM_ASSET_PATH: &str = "/wp-includes/";

/// Numbered gravatar hosts served over plain HTTP.
pub static GRAVATAR_INSECURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^http://\d+\.gravatar\.com/").expect("GRAVATAR_INSECURE regex")
});

/// Content images worth sideloading when a draft is saved.
pub static SIDELOADABLE_IMAGE_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^?]+\.(?:jpe?g|jpe|gif|png|webp)(?:\?|$)").expect("SIDELOADABLE_IMAGE_SRC regex")
});

/// `<img ...>` tags in saved post content.
pub static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img [^>]+>").expect("IMG_TAG regex"));

/// Double-quoted `src` attribute inside an `<img>` tag.
pub static IMG_TAG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)src="([^"]+)""#).expect("IMG_TAG_SRC regex"));

// =============================================================================
// Embed Patterns
// =============================================================================

/// YouTube embed/player URLs. Query string is optional.
pub static EMBED_YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//(m|www)\.youtube\.com/(embed|v)/([^?/]+)(\?.*)?$").expect("EMBED_YOUTUBE regex")
});

/// Vimeo player iframes.
pub static EMBED_VIMEO_PLAYER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//player\.vimeo\.com/video/(\d+)([?/].*)?$").expect("EMBED_VIMEO_PLAYER regex")
});

/// Legacy Vimeo flash player.
pub static EMBED_VIMEO_FLASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//vimeo\.com/moogaloop\.swf\?clip_id=(\d+)$").expect("EMBED_VIMEO_FLASH regex")
});

/// Dailymotion embed iframes.
pub static EMBED_DAILYMOTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//(www\.)?dailymotion\.com/embed/video/([^/?]+)([/?].+)?").expect("EMBED_DAILYMOTION regex")
});

/// Hosts that make an embed a video post.
pub static VIDEO_EMBED_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(youtube\.com|vimeo\.com|dailymotion\.com)").expect("VIDEO_EMBED_HOST regex")
});

/// Hosts that make a source URL a video post.
pub static VIDEO_SOURCE_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(youtube\.com|youtu\.be|vimeo\.com|dailymotion\.com)").expect("VIDEO_SOURCE_HOST regex")
});

/// oEmbed provider URL schemes, matched without discovery.
///
/// Each entry is `(provider name, pattern)`.
pub static OEMBED_PROVIDERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("youtube", r"(?i)^https?://((m|www)\.)?youtube\.com/watch.*"),
        ("youtube", r"(?i)^https?://((m|www)\.)?youtube\.com/playlist.*"),
        ("youtube", r"(?i)^https?://((m|www)\.)?youtube\.com/shorts/.*"),
        ("youtube", r"(?i)^https?://((m|www)\.)?youtube\.com/live/.*"),
        ("youtube", r"(?i)^https?://youtu\.be/.*"),
        ("vimeo", r"(?i)^https?://(.+\.)?vimeo\.com/.*"),
        ("dailymotion", r"(?i)^https?://(www\.)?dailymotion\.com/.*"),
        ("dailymotion", r"(?i)^https?://dai\.ly/.*"),
        ("flickr", r"(?i)^https?://(www\.|embedr\.)?flickr\.com/.*"),
        ("flickr", r"(?i)^https?://flic\.kr/.*"),
        ("smugmug", r"(?i)^https?://(.+\.)?smugmug\.com/.*"),
        ("scribd", r"(?i)^https?://(www\.)?scribd\.com/(doc|document)/.*"),
        ("wordpress-tv", r"(?i)^https?://wordpress\.tv/.*"),
        ("crowdsignal", r"(?i)^https?://(.+\.)?polldaddy\.com/.*"),
        ("crowdsignal", r"(?i)^https?://poll\.fm/.*"),
        ("crowdsignal", r"(?i)^https?://(.+\.)?crowdsignal\.net/.*"),
        ("twitter", r"(?i)^https?://(www\.)?twitter\.com/\w{1,15}/status(es)?/.*"),
        ("twitter", r"(?i)^https?://(www\.)?twitter\.com/\w{1,15}$"),
        ("twitter", r"(?i)^https?://(www\.)?twitter\.com/\w{1,15}/likes$"),
        ("twitter", r"(?i)^https?://(www\.)?twitter\.com/\w{1,15}/lists/.*"),
        ("twitter", r"(?i)^https?://(www\.)?twitter\.com/i/moments/.*"),
        ("x", r"(?i)^https?://(www\.)?x\.com/\w{1,15}/status(es)?/.*"),
        ("soundcloud", r"(?i)^https?://(www\.)?soundcloud\.com/.*"),
        ("slideshare", r"(?i)^https?://(.+?\.)?slideshare\.net/.*"),
        ("spotify", r"(?i)^https?://(open|play)\.spotify\.com/.*"),
        ("imgur", r"(?i)^https?://(.+\.)?imgur\.com/.*"),
        ("issuu", r"(?i)^https?://(www\.)?issuu\.com/.+/docs/.+"),
        ("mixcloud", r"(?i)^https?://(www\.)?mixcloud\.com/.*"),
        ("ted", r"(?i)^https?://(www\.|embed\.)?ted\.com/talks/.*"),
        ("animoto", r"(?i)^https?://(.+\.)?(animoto|video214)\.com/play/.*"),
        ("tumblr", r"(?i)^https?://(.+)\.tumblr\.com/.*"),
        ("kickstarter", r"(?i)^https?://(www\.)?kickstarter\.com/projects/.*"),
        ("kickstarter", r"(?i)^https?://kck\.st/.*"),
        ("cloudup", r"(?i)^https?://cloudup\.com/.*"),
        ("reverbnation", r"(?i)^https?://(www\.)?reverbnation\.com/.*"),
        ("videopress", r"(?i)^https?://videopress\.com/v/.*"),
        ("reddit", r"(?i)^https?://(www\.)?reddit\.com/r/[^/]+/comments/.*"),
        ("speakerdeck", r"(?i)^https?://(www\.)?speakerdeck\.com/.*"),
        ("screencast", r"(?i)^https?://(www\.)?screencast\.com/.*"),
        ("amazon", r"(?i)^https?://([a-z0-9-]+\.)?amazon\.(com|com\.mx|com\.br|ca)/.*"),
        ("amazon", r"(?i)^https?://([a-z0-9-]+\.)?amazon\.(co\.uk|de|fr|it|es|in|nl|ru)/.*"),
        ("amazon", r"(?i)^https?://(www\.)?a\.co/.*"),
        ("amazon", r"(?i)^https?://(www\.)?amzn\.to/.*"),
        ("someecards", r"(?i)^https?://(www\.)?someecards\.com/.+-cards/.+"),
        ("tiktok", r"(?i)^https?://(www\.)?tiktok\.com/.*/video/.*"),
        ("tiktok", r"(?i)^https?://(www\.)?tiktok\.com/@.*"),
        ("pinterest", r"(?i)^https?://(www\.)?pinterest\.[a-z.]+/.*"),
        ("wolfram", r"(?i)^https?://(www\.)?wolframcloud\.com/obj/.+"),
        ("pocketcasts", r"(?i)^https?://pca\.st/.+"),
        ("anghami", r"(?i)^https?://(www\.)?anghami\.com/.*"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("OEMBED_PROVIDERS regex")))
    .collect()
});

// =============================================================================
// Scrape Patterns
// =============================================================================

/// OpenGraph video properties collected as embed candidates.
pub const OG_VIDEO_PROPERTIES: &[&str] = &["og:video", "og:video:url", "og:video:secure_url"];

/// Iframe hosts that never carry page content (comments, share widgets, ads, analytics, CAPTCHA).
pub const IFRAME_DENY_LIST: &[&str] = &[
    "jetpack-comment",
    "disqus.com",
    "facebook.com/plugins",
    "platform.twitter.com/widgets",
    "google.com/recaptcha",
    "googletagmanager.com",
    "doubleclick.net",
    "googlesyndication.com",
    "amazon-adsystem.com",
    "quantserve.com",
    "scorecardresearch.com",
    "addthis.com",
    "sharethis.com",
    "addtoany.com",
];

/// JSON-LD node types that describe the page itself.
pub const JSONLD_PAGE_TYPES: &[&str] = &["Article", "WebPage", "NewsArticle", "BlogPosting"];

/// `_meta` keys kept at ingestion (matched by suffix).
pub static META_KEPT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(title|description|keywords|site_name|url)$").expect("META_KEPT_KEY regex")
});

/// `_meta` keys whose values are tried as embeds.
pub const META_EMBED_KEYS: &[&str] = &["og:url", "og:video", "og:video:secure_url"];

/// `_meta` keys whose values are tried as images.
pub const META_IMAGE_KEYS: &[&str] = &[
    "og:image",
    "og:image:secure_url",
    "twitter:image0:src",
    "twitter:image0",
    "twitter:image:src",
    "twitter:image",
];

/// Scheme and host prefix of a page URL (`https://example.com`).
pub static DOMAIN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:https?:)?//[^/]+").expect("DOMAIN_PREFIX regex"));

/// Root-relative path (`/path`, not `//host`).
pub static ROOT_RELATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[^/]+").expect("ROOT_RELATIVE regex"));

/// `http:` / `https:` scheme prefix used for dedup keys.
pub static HTTP_SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?:").expect("HTTP_SCHEME_PREFIX regex"));

// =============================================================================
// Sanitization Patterns
// =============================================================================

/// `<script>`/`<style>` blocks, removed with their contents.
pub static SCRIPT_STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>").expect("SCRIPT_STYLE_BLOCK regex")
});

/// Any HTML tag (or unterminated tag at end of input).
pub static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[a-zA-Z/!?][^>]*(>|$)").expect("HTML_TAG regex"));

/// Runs of line breaks, tabs and spaces.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("WHITESPACE_RUN regex"));

/// Percent-encoded octets left in plain text.
pub static PERCENT_OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("PERCENT_OCTET regex"));

// =============================================================================
// Safety Patterns
// =============================================================================

/// Literal localhost host names and addresses.
pub const LOCALHOST_NAMES: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "::1",
    "[::1]",
    "0.0.0.0",
    "0:0:0:0:0:0:0:1",
    "[0:0:0:0:0:0:0:1]",
    "::ffff:127.0.0.1",
    "[::ffff:127.0.0.1]",
];

/// Any `127.x.x.x` address.
pub static LOOPBACK_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^127\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("LOOPBACK_V4 regex")
});

/// IPv4-mapped IPv6 loopback, bracketed or not.
pub static LOOPBACK_MAPPED_V6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\[?::ffff:127\.\d{1,3}\.\d{1,3}\.\d{1,3}\]?$").expect("LOOPBACK_MAPPED_V6 regex")
});
