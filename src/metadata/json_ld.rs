//! JSON-LD scanning.
//!
//! Reads `<script type="application/ld+json">` blocks, flattens `@graph`
//! arrays and pulls video embeds, the page's canonical/headline/description
//! and a representative image. Invalid JSON is skipped.

use dom_query::{Document, Selection};
use serde_json::Value;

use crate::dom;
use crate::options::Limits;
use crate::patterns::JSONLD_PAGE_TYPES;
use crate::scraped::ScrapedData;

/// Scan up to `max_jsonld_blocks` JSON-LD scripts.
///
/// Later nodes overwrite earlier ones for the same `_jsonld` field.
pub fn scan_json_ld(doc: &Document, limits: &Limits, data: &mut ScrapedData) {
    let scripts = doc.select(r#"script[type="application/ld+json"]"#);

    for node in scripts.nodes().iter().take(limits.max_jsonld_blocks) {
        let script = Selection::from(*node);
        let text = dom::text_content(&script);

        let Ok(json) = serde_json::from_str::<Value>(text.trim()) else {
            continue;
        };

        match json.get("@graph").and_then(Value::as_array) {
            Some(graph) => graph.iter().for_each(|item| process_item(item, data)),
            None => process_item(&json, data),
        }
    }
}

/// Extract fields from one JSON-LD node.
fn process_item(item: &Value, data: &mut ScrapedData) {
    if !item.is_object() {
        return;
    }

    if has_type(item, &["VideoObject"]) {
        let url = non_empty_str(item, "embedUrl").or_else(|| non_empty_str(item, "contentUrl"));
        if let Some(url) = url {
            if !data.embeds.iter().any(|e| e == url) {
                data.embeds.push(url.to_string());
            }
        }
    }

    if has_type(item, JSONLD_PAGE_TYPES) {
        let canonical = match item.get("mainEntityOfPage") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(obj @ Value::Object(_)) => non_empty_str(obj, "@id"),
            _ => None,
        };
        if let Some(canonical) = canonical.filter(|c| !c.is_empty()) {
            data.jsonld.set("canonical", canonical.to_string());
        }
        if let Some(headline) = non_empty_str(item, "headline") {
            data.jsonld.set("headline", headline.to_string());
        }
        if let Some(description) = non_empty_str(item, "description") {
            data.jsonld.set("description", description.to_string());
        }
    }

    if let Some(image) = item.get("image").and_then(image_url) {
        data.jsonld.set("image", image.to_string());
    }
}

/// `@type` equal to, or an array containing, one of `types`.
fn has_type(item: &Value, types: &[&str]) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => types.contains(&t.as_str()),
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .any(|t| types.contains(&t)),
        _ => false,
    }
}

/// Image URL from a string, an `ImageObject` with `url`, or the first array element.
fn image_url(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(_) => non_empty_str(value, "url"),
        Value::Array(items) => items.first().and_then(|first| match first {
            Value::String(s) => Some(s.as_str()),
            other => non_empty_str(other, "url"),
        }),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
