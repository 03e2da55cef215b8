//! Metadata merger and resolver.
//!
//! Derives the canonical link, site name, title, body text, post format and
//! suggested post content from an ingested [`ScrapedData`]. Extension points
//! are passed in as a [`SuggestionHooks`] implementation; [`DefaultHooks`]
//! leaves every decision to the built-in rules.

use serde::{Serialize, Serializer};

use crate::dedup::DedupRegistry;
use crate::options::Options;
use crate::patterns::{VIDEO_EMBED_HOST, VIDEO_SOURCE_HOST};
use crate::scraped::ScrapedData;
use crate::url_utils::parse_http_url;

/// Selections longer than this (in characters) suggest a quote.
const QUOTE_MIN_CHARS: usize = 50;

/// Suggested post format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PostFormat {
    /// No particular format.
    #[default]
    Standard,
    /// Video page or page with a video embed.
    Video,
    /// Substantial text selection.
    Quote,
    /// Bare link.
    Link,
    /// Any other format chosen by a hook (`aside`, `gallery`, ...).
    Other(String),
}

impl PostFormat {
    /// Format name; empty for [`PostFormat::Standard`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard => "",
            Self::Video => "video",
            Self::Quote => "quote",
            Self::Link => "link",
            Self::Other(name) => name,
        }
    }

    /// Parse a format name. Empty and `standard` map to [`PostFormat::Standard`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "standard" => Self::Standard,
            "video" => Self::Video,
            "quote" => Self::Quote,
            "link" => Self::Link,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for PostFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Markup used for the suggested content.
///
/// Placeholders: `{url}` in `embed`, `{text}` in `quote`, `{url}` and
/// `{title}` in `link`. An empty template is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTemplates {
    /// Embed block for the source URL.
    pub embed: String,
    /// Quote block for the selection or description.
    pub quote: String,
    /// Source attribution block.
    pub link: String,
}

const EMBED_BLOCK: &str = "<!-- wp:embed {\"url\":\"{url}\"} -->\n\
<figure class=\"wp-block-embed\"><div class=\"wp-block-embed__wrapper\">\n\
{url}\n\
</div></figure>\n\
<!-- /wp:embed -->";

const QUOTE_BLOCK: &str = "<!-- wp:quote -->\n\
<blockquote class=\"wp-block-quote\"><!-- wp:paragraph -->\n\
<p>{text}</p>\n\
<!-- /wp:paragraph --></blockquote>\n\
<!-- /wp:quote -->";

const LINK_BLOCK: &str = "<!-- wp:paragraph -->\n\
<p>Source: <em><a href=\"{url}\">{title}</a></em></p>\n\
<!-- /wp:paragraph -->";

impl ContentTemplates {
    /// Templates for a source URL that is itself embeddable.
    #[must_use]
    pub fn for_embed(has_selection: bool) -> Self {
        Self {
            embed: EMBED_BLOCK.to_string(),
            quote: if has_selection { QUOTE_BLOCK.to_string() } else { String::new() },
            link: String::new(),
        }
    }

    /// Templates for a regular page.
    #[must_use]
    pub fn for_page() -> Self {
        Self {
            embed: String::new(),
            quote: QUOTE_BLOCK.to_string(),
            link: LINK_BLOCK.to_string(),
        }
    }
}

/// Extension points of the resolver.
pub trait SuggestionHooks: Send + Sync {
    /// Force a post format before detection runs.
    fn override_post_format(&self) -> Option<PostFormat> {
        None
    }

    /// Rewrite the detected post format.
    fn adjust_post_format(&self, suggested: PostFormat, _data: &ScrapedData) -> PostFormat {
        suggested
    }

    /// Rewrite the content templates.
    fn adjust_templates(&self, templates: ContentTemplates, _data: &ScrapedData) -> ContentTemplates {
        templates
    }
}

/// Hooks that keep every built-in decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl SuggestionHooks for DefaultHooks {}

static DEFAULT_HOOKS: DefaultHooks = DefaultHooks;

/// Everything a draft editor needs from one scraped page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestion {
    /// Suggested post title.
    pub title: Option<String>,
    /// Suggested post body markup.
    pub content: String,
    /// Canonical link of the source page.
    pub canonical: Option<String>,
    /// Source site name.
    pub site_name: Option<String>,
    /// Suggested post format.
    pub post_format: PostFormat,
    /// Selectable images, deduplicated.
    pub images: Vec<String>,
    /// Selectable embeds, deduplicated.
    pub embeds: Vec<String>,
    /// Source URL.
    pub source_url: Option<String>,
    /// Version reported by the scraper.
    pub scraper_version: Option<u32>,
    /// The payload came from an outdated scraper.
    pub outdated_scraper: bool,
}

/// First non-empty of: `<link rel=canonical>`, JSON-LD canonical,
/// x-default alternate, source URL, `twitter:url`, `og:url`; else the shortlink.
#[must_use]
pub fn canonical_link(data: &ScrapedData) -> Option<String> {
    [
        data.links.canonical.as_deref(),
        data.jsonld.canonical.as_deref(),
        data.links.alternate_canonical.as_deref(),
        data.url.as_deref(),
        data.meta("twitter:url"),
        data.meta("og:url"),
        data.links.shortlink.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|v| !v.is_empty())
    .map(str::to_string)
}

/// `og:site_name`, else `application-name`.
#[must_use]
pub fn source_site_name(data: &ScrapedData) -> Option<String> {
    data.meta("og:site_name")
        .or_else(|| data.meta("application-name"))
        .map(str::to_string)
}

/// First non-empty of: page title, JSON-LD headline, `twitter:title`,
/// `og:title`, `title` meta; entity-decoded.
#[must_use]
pub fn suggested_title(data: &ScrapedData) -> Option<String> {
    [
        data.title.as_deref(),
        data.jsonld.headline.as_deref(),
        data.meta("twitter:title"),
        data.meta("og:title"),
        data.meta("title"),
    ]
    .into_iter()
    .flatten()
    .find(|v| !v.is_empty())
    .map(|t| html_escape::decode_html_entities(t).into_owned())
}

/// Text to quote in the suggested content.
///
/// The selection wins, then the JSON-LD description, then the
/// `twitter:description`, `og:description` and `description` meta tags.
/// Meta-derived text ending in `...` is dropped as auto-truncated.
#[must_use]
pub fn body_text(data: &ScrapedData) -> Option<String> {
    if let Some(selection) = data.selection.as_deref().filter(|s| !s.is_empty()) {
        return Some(selection.to_string());
    }
    description(data)
}

/// [`body_text`] without the selection.
#[must_use]
pub fn description(data: &ScrapedData) -> Option<String> {
    if let Some(desc) = data.jsonld.description.as_deref().filter(|s| !s.is_empty()) {
        return Some(desc.to_string());
    }
    data.meta("twitter:description")
        .or_else(|| data.meta("og:description"))
        .or_else(|| data.meta("description"))
        .filter(|text| !text.ends_with("..."))
        .map(str::to_string)
}

/// Builds suggestions with a set of hooks.
pub struct Suggester<'a> {
    options: &'a Options,
    hooks: &'a dyn SuggestionHooks,
}

impl<'a> Suggester<'a> {
    /// Create a suggester with [`DefaultHooks`].
    #[must_use]
    pub fn new(options: &'a Options) -> Self {
        Self { options, hooks: &DEFAULT_HOOKS }
    }

    /// Use custom hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: &'a dyn SuggestionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Suggest a post format.
    ///
    /// `video` for video-host embeds or a video-host source URL; `quote` for
    /// a long selection without links; `link` for a bare URL; otherwise
    /// standard. The override hook runs first, the adjustment hook last.
    #[must_use]
    pub fn post_format(&self, data: &ScrapedData) -> PostFormat {
        if let Some(forced) = self.hooks.override_post_format().filter(|f| *f != PostFormat::Standard) {
            return forced;
        }

        let selection = data.selection.as_deref().filter(|s| !s.is_empty());
        let url = data.url.as_deref().filter(|u| !u.is_empty());

        let detected = if data.embeds.iter().any(|e| VIDEO_EMBED_HOST.is_match(e))
            || url.is_some_and(|u| VIDEO_SOURCE_HOST.is_match(u))
        {
            PostFormat::Video
        } else if selection.is_some_and(|s| s.chars().count() > QUOTE_MIN_CHARS && !s.contains("http")) {
            PostFormat::Quote
        } else if url.is_some() && selection.is_none() && data.images.is_empty() && data.embeds.is_empty() {
            PostFormat::Link
        } else {
            PostFormat::Standard
        };

        self.hooks.adjust_post_format(detected, data)
    }

    /// Suggested post body markup, with every interpolated value escaped.
    #[must_use]
    pub fn suggested_content(&self, data: &ScrapedData) -> String {
        let sanitizer = data.sanitizer(self.options.limits);
        let text = body_text(data);
        let source_embed = data
            .url
            .as_deref()
            .filter(|u| sanitizer.limit_embed(u).is_some());

        let templates = if source_embed.is_some() {
            ContentTemplates::for_embed(data.selection.as_deref().is_some_and(|s| !s.is_empty()))
        } else {
            ContentTemplates::for_page()
        };
        let templates = self.hooks.adjust_templates(templates, data);

        let mut content = String::new();

        if !templates.embed.is_empty() {
            let url = source_embed.map(esc_url).unwrap_or_default();
            content.push_str(&templates.embed.replace("{url}", &url));
        }

        if let Some(text) = text.as_deref().filter(|_| !templates.quote.is_empty()) {
            content.push_str(&templates.quote.replace("{text}", &esc_html(text)));
        }

        if !templates.link.is_empty() {
            let title = suggested_title(data).or_else(|| source_site_name(data));
            let url = canonical_link(data).map(|u| esc_url(&u)).filter(|u| !u.is_empty());
            if let (Some(url), Some(title)) = (url, title) {
                content.push_str(
                    &templates
                        .link
                        .replace("{url}", &url)
                        .replace("{title}", &esc_html(&title)),
                );
            }
        }

        content
    }

    /// Build the full suggestion with a fresh [`DedupRegistry`].
    #[must_use]
    pub fn build(&self, data: &ScrapedData) -> Suggestion {
        let mut registry = DedupRegistry::new(self.options.limits);
        let embeds = registry.select_embeds(data);
        let images = registry.select_images(data);

        Suggestion {
            title: suggested_title(data),
            content: self.suggested_content(data),
            canonical: canonical_link(data),
            site_name: source_site_name(data),
            post_format: self.post_format(data),
            images,
            embeds,
            source_url: data.url.clone(),
            scraper_version: data.version,
            outdated_scraper: data.is_outdated(self.options.current_scraper_version),
        }
    }
}

/// Escape text for HTML element content.
#[must_use]
pub fn esc_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Escape an http(s) URL for an HTML attribute. Other URLs become empty.
#[must_use]
pub fn esc_url(url: &str) -> String {
    parse_http_url(url)
        .map(|u| html_escape::encode_double_quoted_attribute(u.as_str()).into_owned())
        .unwrap_or_default()
}
