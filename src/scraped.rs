//! Scraped data: the typed bag, its wire encoding, and ingestion.
//!
//! The companion scraper delivers a flat payload using bracket-suffixed
//! keys (`_images[]`, `_meta[og:title]`). [`WirePayload`] decodes that into
//! JSON; [`Ingestor`] folds one or two payloads (a primary submission and
//! legacy query parameters) into a sanitized [`ScrapedData`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::options::{Limits, Options};
use crate::patterns::{META_EMBED_KEYS, META_IMAGE_KEYS, META_KEPT_KEY};
use crate::sanitize::FieldSanitizer;
use crate::url_utils::domain_prefix;

/// `_links` entries accepted at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// `<link rel="canonical">`
    pub canonical: Option<String>,
    /// `<link rel="shortlink">`
    pub shortlink: Option<String>,
    /// `<link rel="icon">`
    pub icon: Option<String>,
    /// `<link rel="alternate" hreflang="x-default">`
    pub alternate_canonical: Option<String>,
}

impl Links {
    /// Wire keys, in emission order.
    pub const KEYS: [&'static str; 4] = ["canonical", "shortlink", "icon", "alternate_canonical"];

    /// Value for a wire key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "canonical" => self.canonical.as_deref(),
            "shortlink" => self.shortlink.as_deref(),
            "icon" => self.icon.as_deref(),
            "alternate_canonical" => self.alternate_canonical.as_deref(),
            _ => None,
        }
    }

    /// Set a wire key. Returns `false` for keys outside the allow-list.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "canonical" => &mut self.canonical,
            "shortlink" => &mut self.shortlink,
            "icon" => &mut self.icon,
            "alternate_canonical" => &mut self.alternate_canonical,
            _ => return false,
        };
        *slot = Some(value).filter(|v| !v.is_empty());
        true
    }
}

/// `_jsonld` entries accepted at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonLdFields {
    /// `mainEntityOfPage` of the page node.
    pub canonical: Option<String>,
    /// `headline` of the page node.
    pub headline: Option<String>,
    /// `description` of the page node.
    pub description: Option<String>,
    /// First `image` found on any node.
    pub image: Option<String>,
}

impl JsonLdFields {
    /// Wire keys, in emission order.
    pub const KEYS: [&'static str; 4] = ["canonical", "headline", "description", "image"];

    /// Value for a wire key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "canonical" => self.canonical.as_deref(),
            "headline" => self.headline.as_deref(),
            "description" => self.description.as_deref(),
            "image" => self.image.as_deref(),
            _ => None,
        }
    }

    /// Set a wire key. Returns `false` for keys outside the allow-list.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "canonical" => &mut self.canonical,
            "headline" => &mut self.headline,
            "description" => &mut self.description,
            "image" => &mut self.image,
            _ => return false,
        };
        *slot = Some(value).filter(|v| !v.is_empty());
        true
    }
}

/// Everything captured about one page.
///
/// Produced raw by the extractor and sanitized by the [`Ingestor`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedData {
    /// Source URL (`u`).
    pub url: Option<String>,
    /// Page title (`t`).
    pub title: Option<String>,
    /// Selected text (`s`).
    pub selection: Option<String>,
    /// Scraper version (`pt_version` / `v`).
    pub version: Option<u32>,
    /// Candidate images (`_images[]`).
    pub images: Vec<String>,
    /// Candidate embeds (`_embeds[]`).
    pub embeds: Vec<String>,
    /// OpenGraph video URLs (`_og_video[]`). Folded into `embeds` at ingestion.
    pub og_video: Vec<String>,
    /// Meta tags by name or property (`_meta[...]`).
    pub meta: BTreeMap<String, String>,
    /// Link relations (`_links[...]`).
    pub links: Links,
    /// Structured data (`_jsonld[...]`).
    pub jsonld: JsonLdFields,
    /// Scheme and host of `url`, used to complete root-relative URLs.
    #[serde(skip)]
    pub domain: Option<String>,
}

impl ScrapedData {
    /// Non-empty meta value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// `true` when the payload came from a scraper older than `current`.
    ///
    /// Payloads without a version are not flagged.
    #[must_use]
    pub fn is_outdated(&self, current: u32) -> bool {
        self.version.is_some_and(|v| v < current)
    }

    /// Sanitizer bound to this page's domain.
    #[must_use]
    pub fn sanitizer(&self, limits: Limits) -> FieldSanitizer {
        let mut sanitizer = FieldSanitizer::new(limits);
        sanitizer.set_domain(self.domain.clone());
        sanitizer
    }

    /// Encode as bracket-suffixed wire pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut scalar = |key: &str, value: Option<&str>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), v.to_string()));
            }
        };
        scalar("u", self.url.as_deref());
        scalar("t", self.title.as_deref());
        scalar("s", self.selection.as_deref());
        let version = self.version.map(|v| v.to_string());
        scalar("pt_version", version.as_deref());

        for (name, items) in [("_images", &self.images), ("_embeds", &self.embeds), ("_og_video", &self.og_video)] {
            for item in items.iter().filter(|v| !v.is_empty()) {
                pairs.push((format!("{name}[]"), item.clone()));
            }
        }
        for (key, value) in &self.meta {
            if !value.is_empty() {
                pairs.push((format!("_meta[{key}]"), value.clone()));
            }
        }
        for key in Links::KEYS {
            if let Some(value) = self.links.get(key) {
                pairs.push((format!("_links[{key}]"), value.to_string()));
            }
        }
        for key in JsonLdFields::KEYS {
            if let Some(value) = self.jsonld.get(key) {
                pairs.push((format!("_jsonld[{key}]"), value.to_string()));
            }
        }
        pairs
    }
}

/// Decoded wire payload: a JSON object of scalars, arrays and nested maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WirePayload(Map<String, Value>);

impl WirePayload {
    /// Empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode bracket-suffixed pairs.
    ///
    /// `name[]` appends to an array, `name[key]` sets a nested entry, any
    /// other key sets a scalar (last write wins). Empty values are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = Map::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value: String = value.into();
            if value.is_empty() {
                continue;
            }

            if let Some(name) = key.strip_suffix("[]").filter(|n| !n.is_empty()) {
                let entry = map.entry(name.to_string()).or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(items) = entry {
                    items.push(Value::String(value));
                } else {
                    *entry = Value::Array(vec![Value::String(value)]);
                }
                continue;
            }

            if let Some((parent, child)) = split_nested_key(key) {
                let entry = map.entry(parent.to_string()).or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                if let Value::Object(children) = entry {
                    children.insert(child.to_string(), Value::String(value));
                }
                continue;
            }

            map.insert(key.to_string(), Value::String(value));
        }
        Self(map)
    }

    /// Accept a JSON submission.
    ///
    /// Either a message envelope `{"type": "press-this-data", "data": {...}}`
    /// or a bare object. When the envelope carries a `version` and the data
    /// has no `pt_version`, the envelope version is used.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        let Value::Object(mut outer) = value else {
            return Self::default();
        };

        let is_envelope = outer.get("type").and_then(Value::as_str) == Some("press-this-data")
            && outer.get("data").is_some_and(Value::is_object);
        if !is_envelope {
            return Self(outer);
        }

        let version = outer.remove("version");
        let mut data = match outer.remove("data") {
            Some(Value::Object(data)) => data,
            _ => Map::new(),
        };
        if let Some(version) = version {
            data.entry("pt_version").or_insert(version);
        }
        Self(data)
    }

    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-empty raw value for a key (PHP-style emptiness: `""`, `"0"`, `0`, `false`, `[]`, `{}`, `null`).
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !is_empty_value(v))
    }

    /// Underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON value.
    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<&ScrapedData> for WirePayload {
    fn from(data: &ScrapedData) -> Self {
        Self::from_pairs(data.to_pairs())
    }
}

fn split_nested_key(key: &str) -> Option<(&str, &str)> {
    let inner = key.strip_suffix(']')?;
    let open = inner.find('[')?;
    let (parent, child) = (&inner[..open], &inner[open + 1..]);
    (!parent.is_empty() && !child.is_empty()).then_some((parent, child))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Leading-digit integer parse of a version value (`"11"`, `11`, `"11.2"`).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_version(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
    .filter(|v| *v > 0)
}

/// Final say over an ingested record.
pub trait DataFilter: Send + Sync {
    /// Adjust the record before it is returned.
    fn filter(&self, data: ScrapedData) -> ScrapedData;
}

impl<F> DataFilter for F
where
    F: Fn(ScrapedData) -> ScrapedData + Send + Sync,
{
    fn filter(&self, data: ScrapedData) -> ScrapedData {
        self(data)
    }
}

/// Folds wire payloads into a sanitized [`ScrapedData`].
pub struct Ingestor<'a> {
    options: &'a Options,
    filter: Option<&'a dyn DataFilter>,
}

impl<'a> Ingestor<'a> {
    /// Create an ingestor with no data filter.
    #[must_use]
    pub fn new(options: &'a Options) -> Self {
        Self { options, filter: None }
    }

    /// Run `filter` over every ingested record.
    #[must_use]
    pub fn with_filter(mut self, filter: &'a dyn DataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Ingest a single submission.
    #[must_use]
    pub fn ingest_one(&self, payload: &WirePayload) -> ScrapedData {
        self.ingest(payload, &WirePayload::default())
    }

    /// Merge a primary submission with legacy fallback parameters.
    ///
    /// `u`, `s`, `t`, `v` come from `primary` when present there, else from
    /// `legacy`. Media and nested maps only come from `primary`. The single
    /// image parameter `i` prefers `primary`.
    #[must_use]
    pub fn ingest(&self, primary: &WirePayload, legacy: &WirePayload) -> ScrapedData {
        let mut sanitizer = FieldSanitizer::new(self.options.limits);
        let mut data = ScrapedData::default();

        let pick = |key: &str| primary.non_empty(key).or_else(|| legacy.non_empty(key));

        if let Some(value) = pick("u") {
            let url = sanitizer.limit_url(value);
            if !url.is_empty() {
                data.domain = domain_prefix(&url);
                sanitizer.set_domain(data.domain.clone());
                data.url = Some(url);
            }
        }
        data.selection = pick("s").map(|v| sanitizer.limit_string(v)).filter(|v| !v.is_empty());
        data.title = pick("t").map(|v| sanitizer.limit_string(v)).filter(|v| !v.is_empty());
        data.version = primary
            .non_empty("pt_version")
            .or_else(|| primary.non_empty("v"))
            .or_else(|| legacy.non_empty("v"))
            .and_then(parse_version);

        if self.options.media_discovery {
            ingest_media(primary, &sanitizer, &mut data);
            ingest_nested(primary, &sanitizer, &mut data);

            let single = primary.non_empty("i").or_else(|| legacy.non_empty("i"));
            if let Some(src) = single.and_then(Value::as_str) {
                let src = sanitizer.limit_img(src);
                if !src.is_empty() && !data.images.contains(&src) {
                    data.images.insert(0, src);
                }
            }
        }

        debug!(
            url = data.url.as_deref().unwrap_or_default(),
            images = data.images.len(),
            embeds = data.embeds.len(),
            version = data.version,
            "ingested scraped data"
        );

        match self.filter {
            Some(filter) => filter.filter(data),
            None => data,
        }
    }
}

fn ingest_media(payload: &WirePayload, sanitizer: &FieldSanitizer, data: &mut ScrapedData) {
    if let Some(items) = payload.non_empty("_images") {
        for src in sanitizer.limit_array(items).iter().filter_map(Value::as_str) {
            push_unique(&mut data.images, sanitizer.limit_img(src));
        }
    }
    for key in ["_embeds", "_og_video"] {
        if let Some(items) = payload.non_empty(key) {
            for src in sanitizer.limit_array(items).iter().filter_map(Value::as_str) {
                if let Some(embed) = sanitizer.limit_embed(src) {
                    push_unique(&mut data.embeds, embed);
                }
            }
        }
    }
}

fn ingest_nested(payload: &WirePayload, sanitizer: &FieldSanitizer, data: &mut ScrapedData) {
    if let Some(meta) = payload.non_empty("_meta") {
        for (key, value) in sanitizer.limit_map(meta) {
            ingest_meta_entry(key, value, sanitizer, data);
        }
    }
    if let Some(links) = payload.non_empty("_links") {
        for (key, value) in sanitizer.limit_map(links) {
            if Links::KEYS.contains(&key.as_str()) {
                data.links.set(key, sanitizer.limit_url(value));
            }
        }
    }
    if let Some(jsonld) = payload.non_empty("_jsonld") {
        for (key, value) in sanitizer.limit_map(jsonld) {
            let shaped = match key.as_str() {
                "canonical" | "image" => sanitizer.limit_url(value),
                "headline" | "description" => sanitizer.limit_string(value),
                _ => continue,
            };
            data.jsonld.set(key, shaped);
        }
    }
}

/// Store kept meta keys, and route OpenGraph/Twitter media tags into embeds or images.
fn ingest_meta_entry(key: &str, value: &Value, sanitizer: &FieldSanitizer, data: &mut ScrapedData) {
    if META_KEPT_KEY.is_match(key) || key == "application-name" {
        let text = sanitizer.limit_string(value);
        if !text.is_empty() {
            data.meta.insert(key.to_string(), text);
        }
    }

    let Some(raw) = value.as_str() else {
        return;
    };
    if META_EMBED_KEYS.contains(&key) {
        if let Some(embed) = sanitizer.limit_embed(raw) {
            push_unique(&mut data.embeds, embed);
        }
    } else if META_IMAGE_KEYS.contains(&key) {
        push_unique(&mut data.images, sanitizer.limit_img(raw));
    }
}

fn push_unique(items: &mut Vec<String>, value: String) {
    if !value.is_empty() && !items.contains(&value) {
        items.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_pairs_bracket_notation() {
        let payload = WirePayload::from_pairs([
            ("u", "https://a.com/x"),
            ("_images[]", "https://a.com/1.jpg"),
            ("_images[]", "https://a.com/2.jpg"),
            ("_meta[og:title]", "Hello"),
            ("_links[canonical]", "https://a.com/x"),
            ("t", ""),
        ]);
        assert_eq!(payload.get("u"), Some(&json!("https://a.com/x")));
        assert_eq!(payload.get("_images"), Some(&json!(["https://a.com/1.jpg", "https://a.com/2.jpg"])));
        assert_eq!(payload.get("_meta"), Some(&json!({"og:title": "Hello"})));
        assert_eq!(payload.get("t"), None);
    }

    #[test]
    fn test_split_nested_key() {
        assert_eq!(split_nested_key("_meta[og:title]"), Some(("_meta", "og:title")));
        assert_eq!(split_nested_key("_meta[]"), None);
        assert_eq!(split_nested_key("plain"), None);
    }

    #[test]
    fn test_from_json_envelope() {
        let payload = WirePayload::from_json(json!({
            "type": "press-this-data",
            "version": 11,
            "data": { "u": "https://a.com/" }
        }));
        assert_eq!(payload.get("pt_version"), Some(&json!(11)));
        assert_eq!(payload.get("u"), Some(&json!("https://a.com/")));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version(&json!("11")), Some(11));
        assert_eq!(parse_version(&json!("8abc")), Some(8));
        assert_eq!(parse_version(&json!(10)), Some(10));
        assert_eq!(parse_version(&json!("x")), None);
        assert_eq!(parse_version(&json!("0")), None);
    }

    #[test]
    fn test_primary_wins_for_legacy_keys() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([("t", "Primary title")]);
        let legacy = WirePayload::from_pairs([("t", "Legacy title"), ("s", "Legacy selection"), ("v", "6")]);
        let data = Ingestor::new(&options).ingest(&primary, &legacy);
        assert_eq!(data.title.as_deref(), Some("Primary title"));
        assert_eq!(data.selection.as_deref(), Some("Legacy selection"));
        assert_eq!(data.version, Some(6));
        assert!(data.is_outdated(options.current_scraper_version));
    }

    #[test]
    fn test_pt_version_preferred() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([("pt_version", "11"), ("v", "4")]);
        let data = Ingestor::new(&options).ingest_one(&primary);
        assert_eq!(data.version, Some(11));
        assert!(!data.is_outdated(11));
    }

    #[test]
    fn test_root_relative_images_use_page_domain() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([
            ("u", "https://a.com/post/1"),
            ("_images[]", "/uploads/photo.jpg"),
            ("_images[]", "/uploads/photo.jpg"),
        ]);
        let data = Ingestor::new(&options).ingest_one(&primary);
        assert_eq!(data.domain.as_deref(), Some("https://a.com"));
        assert_eq!(data.images, vec!["https://a.com/uploads/photo.jpg"]);
    }

    #[test]
    fn test_og_video_folds_into_embeds() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([
            ("_embeds[]", "https://player.vimeo.com/video/5"),
            ("_og_video[]", "https://vimeo.com/5"),
            ("_og_video[]", "https://www.youtube.com/embed/abc?x=1"),
        ]);
        let data = Ingestor::new(&options).ingest_one(&primary);
        assert_eq!(data.embeds, vec!["https://vimeo.com/5", "https://www.youtube.com/watch?v=abc"]);
        assert!(data.og_video.is_empty());
    }

    #[test]
    fn test_nested_allow_lists() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([
            ("_links[canonical]", "https://a.com/x"),
            ("_links[stylesheet]", "https://a.com/s.css"),
            ("_jsonld[headline]", "Big &amp; bold"),
            ("_jsonld[author]", "Someone"),
            ("_meta[og:title]", "OG"),
            ("_meta[viewport]", "width=device-width"),
            ("_meta[og:image]", "https://a.com/hero.jpg"),
        ]);
        let data = Ingestor::new(&options).ingest_one(&primary);
        assert_eq!(data.links.canonical.as_deref(), Some("https://a.com/x"));
        assert_eq!(data.jsonld.headline.as_deref(), Some("Big & bold"));
        assert_eq!(data.meta("og:title"), Some("OG"));
        assert_eq!(data.meta("viewport"), None);
        assert_eq!(data.images, vec!["https://a.com/hero.jpg"]);
    }

    #[test]
    fn test_nested_cap_keeps_first_submitted_keys() {
        let options = Options::default();
        let pairs: Vec<(String, String)> = (0..60)
            .rev()
            .map(|i| (format!("_meta[k{i:02}:title]"), format!("v{i}")))
            .collect();
        let data = Ingestor::new(&options).ingest_one(&WirePayload::from_pairs(pairs));
        assert_eq!(data.meta.len(), 50);
        assert_eq!(data.meta("k59:title"), Some("v59"));
        assert_eq!(data.meta("k10:title"), Some("v10"));
        assert_eq!(data.meta("k09:title"), None);
        assert_eq!(data.meta("k00:title"), None);
    }

    #[test]
    fn test_meta_suffix_keys_kept() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([("_meta[dc.title]", "DC"), ("_meta[sailthru.title]", "ST")]);
        let data = Ingestor::new(&options).ingest_one(&primary);
        assert_eq!(data.meta("dc.title"), Some("DC"));
        assert_eq!(data.meta("sailthru.title"), Some("ST"));
    }

    #[test]
    fn test_media_discovery_off() {
        let options = Options {
            media_discovery: false,
            ..Options::default()
        };
        let primary = WirePayload::from_pairs([
            ("u", "https://a.com/"),
            ("_images[]", "https://a.com/1.jpg"),
            ("_meta[og:title]", "OG"),
        ]);
        let data = Ingestor::new(&options).ingest_one(&primary);
        assert!(data.images.is_empty());
        assert!(data.meta.is_empty());
        assert_eq!(data.url.as_deref(), Some("https://a.com/"));
    }

    #[test]
    fn test_single_image_param_prepended() {
        let options = Options::default();
        let primary = WirePayload::from_pairs([("_images[]", "https://a.com/2.jpg")]);
        let legacy = WirePayload::from_pairs([("i", "https://a.com/1.jpg")]);
        let data = Ingestor::new(&options).ingest(&primary, &legacy);
        assert_eq!(data.images, vec!["https://a.com/1.jpg", "https://a.com/2.jpg"]);
    }

    #[test]
    fn test_data_filter_runs_last() {
        let options = Options::default();
        let drop_selection = |mut data: ScrapedData| {
            data.selection = None;
            data
        };
        let primary = WirePayload::from_pairs([("s", "picked text")]);
        let data = Ingestor::new(&options).with_filter(&drop_selection).ingest_one(&primary);
        assert_eq!(data.selection, None);
    }

    #[test]
    fn test_to_pairs_round_trips_through_ingestion() {
        let options = Options::default();
        let mut raw = ScrapedData {
            url: Some("https://a.com/p".to_string()),
            title: Some("T".to_string()),
            version: Some(11),
            images: vec!["https://a.com/big.jpg".to_string()],
            ..ScrapedData::default()
        };
        raw.meta.insert("og:site_name".to_string(), "A".to_string());
        raw.links.set("canonical", "https://a.com/p".to_string());

        let data = Ingestor::new(&options).ingest_one(&WirePayload::from(&raw));
        assert_eq!(data.url, raw.url);
        assert_eq!(data.title, raw.title);
        assert_eq!(data.version, Some(11));
        assert_eq!(data.images, raw.images);
        assert_eq!(data.meta("og:site_name"), Some("A"));
        assert_eq!(data.links.canonical.as_deref(), Some("https://a.com/p"));
    }
}
