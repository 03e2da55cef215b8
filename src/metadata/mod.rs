//! Structured-data extraction.
//!
//! Walks a parsed page for meta tags, link relations, JSON-LD blocks,
//! content images and iframes, and produces a raw [`ScrapedData`] record in
//! the same shape the client-side scraper submits. [`parse_html_metadata`]
//! then runs that record through ingestion, the merger's title,
//! description and canonical rules, and a fresh [`DedupRegistry`].

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use dom_query::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::dedup::DedupRegistry;
use crate::dom;
use crate::options::{Limits, Options, CURRENT_SCRAPER_VERSION};
use crate::scraped::{Ingestor, ScrapedData, WirePayload};
use crate::suggest::{canonical_link, description, suggested_title};

pub use dom_extraction::{content_region, page_title, scan_iframes, scan_images};
pub use json_ld::scan_json_ld;
pub use meta_tags::{scan_links, scan_meta};

/// Result of parsing a fetched page on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    /// Best title candidate.
    pub title: Option<String>,
    /// Best description candidate.
    pub description: Option<String>,
    /// Deduplicated images, at most `max_output_images`.
    pub images: Vec<String>,
    /// Normalized, deduplicated embeds, at most `max_output_embeds`.
    pub embeds: Vec<String>,
    /// Canonical link.
    pub canonical: Option<String>,
}

/// Scrape a parsed document into a raw, unsanitized record.
///
/// # Arguments
/// * `doc` - Parsed page
/// * `page_url` - URL the page was loaded from, used as `u` and as the base for relative sources
/// * `selection` - Text the user selected, if any
/// * `limits` - Per-key inspection caps
///
/// # Returns
/// * Raw record tagged with the current scraper version
#[must_use]
pub fn scrape_document(doc: &Document, page_url: &str, selection: Option<&str>, limits: &Limits) -> ScrapedData {
    let base = Url::parse(page_url).ok();

    let mut data = ScrapedData {
        url: Some(page_url.to_string()).filter(|u| !u.is_empty()),
        selection: selection.map(str::to_string).filter(|s| !s.is_empty()),
        version: Some(CURRENT_SCRAPER_VERSION),
        ..ScrapedData::default()
    };

    meta_tags::scan_meta(doc, limits, &mut data);
    meta_tags::scan_links(doc, limits, &mut data);
    json_ld::scan_json_ld(doc, limits, &mut data);
    dom_extraction::scan_images(doc, base.as_ref(), limits, &mut data);
    dom_extraction::scan_iframes(doc, base.as_ref(), limits, &mut data);
    data.title = dom_extraction::page_title(doc);

    debug!(
        url = page_url,
        meta = data.meta.len(),
        images = data.images.len(),
        embeds = data.embeds.len(),
        "scraped document"
    );

    data
}

/// Parse and scrape an HTML string. See [`scrape_document`].
#[must_use]
pub fn scrape_html(html: &str, page_url: &str, selection: Option<&str>, limits: &Limits) -> ScrapedData {
    scrape_document(&dom::parse(html), page_url, selection, limits)
}

/// Server-side parse of a fetched page.
///
/// # Arguments
/// * `html` - Page markup, already transcoded to UTF-8
/// * `base_url` - URL the page was fetched from
/// * `options` - Limits and ingestion switches
///
/// # Returns
/// * Title, description, canonical link and capped image/embed lists
#[must_use]
pub fn parse_html_metadata(html: &str, base_url: &str, options: &Options) -> ExtractedMetadata {
    let raw = scrape_html(html, base_url, None, &options.limits);
    let data = Ingestor::new(options).ingest_one(&WirePayload::from(&raw));

    let mut registry = DedupRegistry::new(options.limits);
    let mut embeds = registry.select_embeds(&data);
    embeds.truncate(options.limits.max_output_embeds);
    let mut images = registry.select_images(&data);
    images.truncate(options.limits.max_output_images);

    ExtractedMetadata {
        title: suggested_title(&data),
        description: description(&data),
        images,
        embeds,
        canonical: canonical_link(&data),
    }
}
