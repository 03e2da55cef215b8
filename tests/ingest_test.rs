use press_scrape::{DataFilter, Ingestor, Options, ScrapedData, WirePayload};
use serde_json::json;

#[test]
fn json_envelope_submission() {
    let message = json!({
        "type": "press-this-data",
        "version": 11,
        "data": {
            "u": "https://blog.example.com/post",
            "t": "  A &quot;quoted&quot; title ",
            "_images": ["/img/hero.jpg", "https://blog.example.com/img/ajax-loading.gif", "/img/hero.jpg"],
            "_meta": {"og:site_name": "Example Blog", "generator": "CMS 1.0"},
            "_jsonld": {"headline": "Headline", "author": "ignored"}
        }
    });

    let options = Options::default();
    let data = Ingestor::new(&options).ingest_one(&WirePayload::from_json(message));

    assert_eq!(data.url.as_deref(), Some("https://blog.example.com/post"));
    assert_eq!(data.title.as_deref(), Some(r#"A "quoted" title"#));
    assert_eq!(data.version, Some(11));
    assert!(!data.is_outdated(options.current_scraper_version));
    assert_eq!(data.images, vec!["https://blog.example.com/img/hero.jpg"]);
    assert_eq!(data.meta("og:site_name"), Some("Example Blog"));
    assert_eq!(data.meta("generator"), None);
    assert_eq!(data.jsonld.headline.as_deref(), Some("Headline"));
}

#[test]
fn legacy_parameters_fill_gaps_only() {
    let primary = WirePayload::from_pairs([("t", "Primary title"), ("_images[]", "https://a.com/p.jpg")]);
    let legacy = WirePayload::from_pairs([
        ("u", "https://a.com/legacy"),
        ("t", "Legacy title"),
        ("s", "Legacy selection"),
        ("v", "4"),
        ("_images[]", "https://a.com/legacy.jpg"),
    ]);

    let options = Options::default();
    let data = Ingestor::new(&options).ingest(&primary, &legacy);

    assert_eq!(data.title.as_deref(), Some("Primary title"));
    assert_eq!(data.url.as_deref(), Some("https://a.com/legacy"));
    assert_eq!(data.selection.as_deref(), Some("Legacy selection"));
    assert_eq!(data.version, Some(4));
    assert!(data.is_outdated(options.current_scraper_version));
    assert_eq!(data.images, vec!["https://a.com/p.jpg"]);
}

#[test]
fn hostile_urls_are_dropped() {
    let payload = WirePayload::from_pairs([
        ("u", "javascript:alert(1)"),
        ("_images[]", "data:image/png;base64,AAAA"),
        ("_images[]", "ftp://a.com/x.jpg"),
        ("_embeds[]", "https://evil.example/embed"),
        ("_links[canonical]", "vbscript:msgbox"),
    ]);
    let options = Options::default();
    let data = Ingestor::new(&options).ingest_one(&payload);

    assert_eq!(data.url, None);
    assert!(data.images.is_empty());
    assert!(data.embeds.is_empty());
    assert_eq!(data.links.canonical, None);
}

#[test]
fn oversized_values_are_limited() {
    let long_title = "x".repeat(6000);
    let long_url = format!("https://a.com/{}", "p".repeat(2100));
    let payload = WirePayload::from_pairs([("t", long_title.as_str()), ("u", long_url.as_str())]);

    let options = Options::default();
    let data = Ingestor::new(&options).ingest_one(&payload);

    assert_eq!(data.title.map(|t| t.chars().count()), Some(5000));
    assert_eq!(data.url, None);
}

#[test]
fn array_inputs_are_capped() {
    let images: Vec<(String, String)> = (0..80)
        .map(|i| ("_images[]".to_string(), format!("https://a.com/photo-{i}.jpg")))
        .collect();
    let options = Options::default();
    let data = Ingestor::new(&options).ingest_one(&WirePayload::from_pairs(images));
    assert_eq!(data.images.len(), 50);
}

struct DropImages;

impl DataFilter for DropImages {
    fn filter(&self, mut data: ScrapedData) -> ScrapedData {
        data.images.clear();
        data
    }
}

#[test]
fn data_filter_has_final_say() {
    let payload = WirePayload::from_pairs([("u", "https://a.com/"), ("_images[]", "https://a.com/a.jpg")]);
    let options = Options::default();
    let filter = DropImages;
    let data = Ingestor::new(&options).with_filter(&filter).ingest_one(&payload);

    assert!(data.images.is_empty());
    assert_eq!(data.url.as_deref(), Some("https://a.com/"));
}

#[test]
fn wire_pairs_survive_reingestion() {
    let payload = WirePayload::from_pairs([
        ("u", "https://a.com/post"),
        ("s", "Some text"),
        ("pt_version", "11"),
        ("_embeds[]", "https://www.youtube.com/embed/abc123"),
        ("_meta[og:title]", "OG"),
        ("_links[shortlink]", "https://a.com/?p=1"),
    ]);
    let options = Options::default();
    let ingestor = Ingestor::new(&options);
    let first = ingestor.ingest_one(&payload);
    let second = ingestor.ingest_one(&WirePayload::from(&first));

    assert_eq!(first, second);
    assert_eq!(second.embeds, vec!["https://www.youtube.com/watch?v=abc123"]);
}
