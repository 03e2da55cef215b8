//! # press-scrape
//!
//! Content capture for "Press This" style quick posting.
//!
//! Takes untrusted page data, either scraped in the browser and submitted
//! as a flat key/value payload or fetched and parsed on the server, and
//! turns it into a sanitized record plus a post suggestion: title, quoted
//! text, canonical link, site name, post format, images and embeds.
//!
//! ## Quick Start
//!
//! ```rust
//! use press_scrape::{Ingestor, Options, Suggester, WirePayload};
//!
//! let options = Options::default();
//! let payload = WirePayload::from_pairs([
//!     ("u", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
//!     ("t", "Never Gonna Give You Up"),
//!     ("_meta[og:site_name]", "YouTube"),
//!     ("pt_version", "11"),
//! ]);
//!
//! let data = Ingestor::new(&options).ingest_one(&payload);
//! let suggestion = Suggester::new(&options).build(&data);
//!
//! assert_eq!(suggestion.post_format.as_str(), "video");
//! assert_eq!(suggestion.embeds, vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ"]);
//! ```
//!
//! ## Pipeline
//!
//! - [`metadata`] walks a page for meta tags, link relations, JSON-LD,
//!   content images and iframes
//! - [`scraped`] decodes wire payloads and folds them into a typed
//!   [`ScrapedData`] through the [`sanitize`], [`embed`] and [`image`] rules
//! - [`suggest`] picks title, description, canonical link and post format
//! - [`dedup`] hands out each image and embed at most once per build
//! - [`safety`] gates every outbound request against SSRF targets

mod error;
mod options;
mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Charset detection and transcoding of fetched pages.
pub mod encoding;

/// URL parsing, resolution and dedup keys.
pub mod url_utils;

/// Field sanitizer: string, URL, array and map limits.
pub mod sanitize;

/// URL safety validator (SSRF defense).
pub mod safety;

/// Embed URL normalization and validation.
pub mod embed;

/// Noise image classification.
pub mod image;

/// Typed scraped data, wire codec and ingestion.
pub mod scraped;

/// Structured-data extraction and server-side parse.
pub mod metadata;

/// Title, description, canonical and post format suggestions.
pub mod suggest;

/// Per-build image and embed dedup.
pub mod dedup;

/// Page fetching, media sideloading and draft saving.
#[cfg(feature = "fetch")]
pub mod fetch;

// Public API - re-exports
pub use dedup::DedupRegistry;
pub use embed::{normalize_embed, validate_embed_urls};
pub use error::{Error, Result};
pub use metadata::{parse_html_metadata, scrape_html, ExtractedMetadata};
pub use options::{FetchOptions, Limits, Options, SideloadOptions, CURRENT_SCRAPER_VERSION};
pub use safety::{BlockReason, UrlValidator, ValidationResult};
pub use sanitize::FieldSanitizer;
pub use scraped::{DataFilter, Ingestor, ScrapedData, WirePayload};
pub use suggest::{PostFormat, Suggester, Suggestion, SuggestionHooks};

#[cfg(feature = "fetch")]
pub use fetch::{ContentStore, DraftPublisher, MediaSideloader, PageFetcher};
