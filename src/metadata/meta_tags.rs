//! Meta and link tag scanning.
//!
//! Collects `<meta name|property content>` pairs into `_meta`, OpenGraph
//! video properties into `_og_video`, and the canonical/icon/shortlink and
//! x-default alternate `<link>` relations into `_links`.

use dom_query::{Document, Selection};

use crate::dom;
use crate::options::Limits;
use crate::patterns::OG_VIDEO_PROPERTIES;
use crate::scraped::ScrapedData;

/// Scan up to `max_meta_tags` meta tags.
///
/// `name` wins over `property`. Only property-keyed OpenGraph video tags
/// feed `_og_video`.
pub fn scan_meta(doc: &Document, limits: &Limits, data: &mut ScrapedData) {
    for node in doc.select("meta").nodes().iter().take(limits.max_meta_tags) {
        let meta = Selection::from(*node);

        let Some(content) = dom::get_attribute(&meta, "content").filter(|c| !c.is_empty()) else {
            continue;
        };

        if let Some(name) = dom::get_attribute(&meta, "name").filter(|n| !n.is_empty()) {
            data.meta.insert(name, content);
        } else if let Some(property) = dom::get_attribute(&meta, "property").filter(|p| !p.is_empty()) {
            if OG_VIDEO_PROPERTIES.contains(&property.as_str()) && !data.og_video.contains(&content) {
                data.og_video.push(content.clone());
            }
            data.meta.insert(property, content);
        }
    }
}

/// Scan up to `max_link_tags` link tags.
pub fn scan_links(doc: &Document, limits: &Limits, data: &mut ScrapedData) {
    for node in doc.select("link").nodes().iter().take(limits.max_link_tags) {
        let link = Selection::from(*node);

        let Some(href) = dom::get_attribute(&link, "href").filter(|h| !h.is_empty()) else {
            continue;
        };
        let rel = dom::get_attribute(&link, "rel").unwrap_or_default();

        match rel.as_str() {
            "canonical" | "icon" | "shortlink" => {
                data.links.set(&rel, href);
            }
            "alternate" if dom::get_attribute(&link, "hreflang").as_deref() == Some("x-default") => {
                data.links.set("alternate_canonical", href);
            }
            _ => {}
        }
    }
}
