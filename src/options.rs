//! Configuration options for scraping, ingestion and fetching.
//!
//! All structs have public fields and a `Default` carrying the standard
//! limits, so callers only override what they need.

use std::time::Duration;

/// Scraper version this build understands. Older payloads are flagged, not refused.
pub const CURRENT_SCRAPER_VERSION: u32 = 11;

/// Caps applied while scraping and sanitizing.
///
/// # Example
///
/// ```rust
/// use press_scrape::Limits;
///
/// let limits = Limits {
///     max_content_images: 20,
///     ..Limits::default()
/// };
/// assert_eq!(limits.max_array_len, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Strings are cut to this many characters before entity decoding.
    ///
    /// Default: `5000`
    pub max_string_chars: usize,

    /// URLs longer than this (in bytes, before decoding) are dropped.
    ///
    /// Default: `2048`
    pub max_url_len: usize,

    /// Array-typed fields keep at most this many entries.
    ///
    /// Default: `50`
    pub max_array_len: usize,

    /// Keys of `_meta`, `_links` and `_jsonld` longer than this are dropped.
    ///
    /// Default: `100`
    pub max_nested_key_len: usize,

    /// Meta tags inspected per document.
    ///
    /// Default: `200`
    pub max_meta_tags: usize,

    /// Link tags inspected per document.
    ///
    /// Default: `50`
    pub max_link_tags: usize,

    /// JSON-LD script blocks inspected per document.
    ///
    /// Default: `10`
    pub max_jsonld_blocks: usize,

    /// Content images inspected per document.
    ///
    /// Default: `100`
    pub max_content_images: usize,

    /// Iframes inspected per document.
    ///
    /// Default: `50`
    pub max_iframes: usize,

    /// Explicit widths below this mark an image as noise.
    ///
    /// Default: `256`
    pub min_image_width: u32,

    /// Explicit heights below this mark an image as noise.
    ///
    /// Default: `128`
    pub min_image_height: u32,

    /// Avatar-named images are skipped once this many images were selected.
    ///
    /// Default: `15`
    pub avatar_flood_threshold: usize,

    /// Images returned by a server-side fetch.
    ///
    /// Default: `50`
    pub max_output_images: usize,

    /// Embeds returned by a server-side fetch.
    ///
    /// Default: `20`
    pub max_output_embeds: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_chars: 5000,
            max_url_len: 2048,
            max_array_len: 50,
            max_nested_key_len: 100,
            max_meta_tags: 200,
            max_link_tags: 50,
            max_jsonld_blocks: 10,
            max_content_images: 100,
            max_iframes: 50,
            min_image_width: 256,
            min_image_height: 128,
            avatar_flood_threshold: 15,
            max_output_images: 50,
            max_output_embeds: 20,
        }
    }
}

/// Settings for server-side page fetching.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Allow fetching remote pages at all.
    ///
    /// Default: `true`
    pub enabled: bool,

    /// Whole-request timeout.
    ///
    /// Default: 15 seconds
    pub timeout: Duration,

    /// Redirects followed before giving up.
    ///
    /// Default: `3`
    pub max_redirects: usize,

    /// `User-Agent` header sent upstream.
    ///
    /// Default: `Press This/<crate version>`
    pub user_agent: String,

    /// Timeout for each DNS lookup made by the safety validator.
    ///
    /// Default: 5 seconds
    pub dns_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(15),
            max_redirects: 3,
            user_agent: format!("Press This/{}", env!("CARGO_PKG_VERSION")),
            dns_timeout: Duration::from_secs(5),
        }
    }
}

/// Settings for sideloading remote images into the content store.
#[derive(Debug, Clone)]
pub struct SideloadOptions {
    /// Timeout of the HEAD pre-check.
    ///
    /// Default: 10 seconds
    pub head_timeout: Duration,

    /// Timeout of the full download.
    ///
    /// Default: 30 seconds
    pub download_timeout: Duration,

    /// Redirects followed by the HEAD probe and the download.
    ///
    /// Default: `3`
    pub max_redirects: usize,

    /// Accepted `Content-Type` values (lowercase, without parameters).
    ///
    /// Default: jpeg, jpg, png, gif, webp
    pub allowed_types: Vec<String>,

    /// Maximum media size in bytes.
    ///
    /// Default: 10 MiB
    pub max_size: u64,
}

impl Default for SideloadOptions {
    fn default() -> Self {
        Self {
            head_timeout: Duration::from_secs(10),
            download_timeout: Duration::from_secs(30),
            max_redirects: 3,
            allowed_types: ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            max_size: 10 * 1024 * 1024,
        }
    }
}

impl SideloadOptions {
    /// Check a `Content-Type` header value against the allow-list.
    ///
    /// Parameters after `;` are ignored and the comparison is case-insensitive.
    #[must_use]
    pub fn allows_type(&self, content_type: &str) -> bool {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        self.allowed_types.iter().any(|t| *t == mime)
    }
}

/// Top-level configuration.
///
/// # Example
///
/// ```rust
/// use press_scrape::Options;
///
/// let options = Options {
///     media_discovery: false,
///     ..Options::default()
/// };
/// assert_eq!(options.current_scraper_version, 11);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Scrape and sanitization caps.
    pub limits: Limits,

    /// Keep `_images`, `_embeds` and `_og_video` from submissions.
    ///
    /// Default: `true`
    pub media_discovery: bool,

    /// Payloads tagged with a lower version are flagged as outdated.
    ///
    /// Default: [`CURRENT_SCRAPER_VERSION`]
    pub current_scraper_version: u32,

    /// Server-side fetch settings.
    pub fetch: FetchOptions,

    /// Media sideload settings.
    pub sideload: SideloadOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            media_discovery: true,
            current_scraper_version: CURRENT_SCRAPER_VERSION,
            fetch: FetchOptions::default(),
            sideload: SideloadOptions::default(),
        }
    }
}
