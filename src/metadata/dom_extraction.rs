//! Title, content image and iframe scanning.

use dom_query::{Document, Selection};
use url::Url;

use crate::dom;
use crate::image::{is_noise_image, parse_dimension};
use crate::options::Limits;
use crate::patterns::IFRAME_DENY_LIST;
use crate::scraped::ScrapedData;
use crate::url_utils::resolve_url;

/// Text of the first `<title>`, trimmed.
#[must_use]
pub fn page_title(doc: &Document) -> Option<String> {
    let title = doc.select("title").first();
    if title.is_empty() {
        return None;
    }
    let text = dom::text_content(&title);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Main content region: a `.hfeed` element, else `#content`, else `<body>`.
#[must_use]
pub fn content_region(doc: &Document) -> Selection<'_> {
    for selector in [".hfeed", "#content"] {
        let region = doc.select(selector).first();
        if !region.is_empty() {
            return region;
        }
    }
    doc.select("body").first()
}

/// Collect content images that pass the noise classifier.
///
/// Inspects at most `max_content_images` `<img>` elements of the content
/// region. Relative sources are resolved against `base`.
pub fn scan_images(doc: &Document, base: Option<&Url>, limits: &Limits, data: &mut ScrapedData) {
    let region = content_region(doc);

    for node in region.select("img").nodes().iter().take(limits.max_content_images) {
        let img = Selection::from(*node);

        let Some(src) = dom::get_attribute(&img, "src").map(|s| s.trim().to_string()) else {
            continue;
        };
        let src = resolve(&src, base);

        let class = dom::class_name(&img);
        let width = parse_dimension(dom::get_attribute(&img, "width").as_deref());
        let height = parse_dimension(dom::get_attribute(&img, "height").as_deref());

        if is_noise_image(&src, class.as_deref(), width, height, limits) {
            continue;
        }
        if !data.images.contains(&src) {
            data.images.push(src);
        }
    }
}

/// Collect iframe sources as embed candidates.
///
/// Inspects at most `max_iframes` iframes in `<body>`, skipping blank frames
/// and known widget, ad and analytics hosts.
pub fn scan_iframes(doc: &Document, base: Option<&Url>, limits: &Limits, data: &mut ScrapedData) {
    for node in doc.select("body iframe").nodes().iter().take(limits.max_iframes) {
        let iframe = Selection::from(*node);

        let src = dom::get_attribute(&iframe, "src").unwrap_or_default();
        let src = src.trim();
        if src.is_empty() || src.eq_ignore_ascii_case("about:blank") || is_denied_frame(src) {
            continue;
        }

        let src = resolve(src, base);
        if !data.embeds.contains(&src) {
            data.embeds.push(src);
        }
    }
}

fn is_denied_frame(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    IFRAME_DENY_LIST.iter().any(|host| lower.contains(host))
}

fn resolve(src: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => resolve_url(src, base),
        None => src.to_string(),
    }
}
