use press_scrape::encoding::{detect_encoding, transcode};
use press_scrape::scrape_html;
use press_scrape::Limits;

/// Latin-1 page declared through a meta tag
#[test]
fn iso88591_meta_charset_is_honored() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9 espa\xF1ol</title></head><body></body></html>";

    let text = transcode(html, None);
    assert!(text.contains("Café español"));

    let data = scrape_html(&text, "https://a.com/", None, &Limits::default());
    assert_eq!(data.title.as_deref(), Some("Café español"));
}

/// Header charset beats a conflicting meta declaration
#[test]
fn header_charset_wins_over_meta() {
    let html = b"<html><head><meta charset=\"utf-8\"></head><body>\x93quoted\x94</body></html>";
    let encoding = detect_encoding(html, Some("text/html; charset=windows-1252"));
    assert_eq!(encoding, encoding_rs::WINDOWS_1252);

    let text = transcode(html, Some("text/html; charset=windows-1252"));
    assert!(text.contains("\u{201c}quoted\u{201d}"));
}

/// Undeclared bytes default to UTF-8 with replacement
#[test]
fn undeclared_page_defaults_to_utf8() {
    let html = "<p>中文 ü</p>".as_bytes();
    assert_eq!(detect_encoding(html, None), encoding_rs::UTF_8);
    assert_eq!(transcode(html, Some("text/html")), "<p>中文 ü</p>");
}
