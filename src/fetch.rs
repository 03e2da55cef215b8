//! Remote I/O: page fetching, media sideloading and draft saving.
//!
//! Every outbound request is gated by the [`UrlValidator`] first, and every
//! redirect hop is re-checked against the localhost patterns. Nothing here
//! retries; timeouts surface as errors. The content store is an external
//! collaborator reached through the [`ContentStore`] trait.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::encoding::transcode;
use crate::error::{Error, Result};
use crate::metadata::{parse_html_metadata, ExtractedMetadata};
use crate::options::{Options, SideloadOptions};
use crate::patterns::{IMG_TAG, IMG_TAG_SRC, SIDELOADABLE_IMAGE_SRC};
use crate::safety::{is_private_ip, literal_block_reason, Resolver, SystemResolver, UrlValidator};
use crate::sanitize::sanitize_text_field;
use crate::suggest::PostFormat;
use crate::url_utils::{filename_from_url, parse_http_url};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Redirect policy that caps hops and runs every hop through the
/// DNS-free URL checks. Named hosts are covered by [`GuardedResolver`].
fn guarded_redirects(max_redirects: usize) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= max_redirects {
            return attempt.error("too many redirects");
        }
        if let Some(reason) = literal_block_reason(attempt.url()) {
            warn!(url = %attempt.url(), reason = reason.code(), "redirect blocked");
            return attempt.error(format!("redirect blocked: {reason}"));
        }
        attempt.follow()
    })
}

/// Connection-time resolver for the HTTP client.
///
/// Every name the client connects to, including redirect targets, is
/// resolved here and refused when any address is private. The client
/// connects only to the addresses checked.
#[derive(Clone)]
pub struct GuardedResolver {
    inner: Arc<dyn Resolver>,
}

impl GuardedResolver {
    #[must_use]
    pub fn new(inner: Arc<dyn Resolver>) -> Self {
        Self { inner }
    }

    /// Resolve `host`, failing when it has no address or any private one.
    ///
    /// # Errors
    ///
    /// - [`std::io::ErrorKind::NotFound`] when the host has no address
    /// - [`std::io::ErrorKind::PermissionDenied`] when an address is private
    pub async fn lookup(&self, host: &str) -> std::io::Result<Vec<SocketAddr>> {
        let addrs = self.inner.resolve(host).await?;
        if addrs.is_empty() {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "host has no addresses"));
        }
        if let Some(private) = addrs.iter().find(|ip| is_private_ip(**ip)) {
            warn!(host, ip = %private, "connection to private address refused");
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "host resolves to a private address",
            ));
        }
        // Port 0 is replaced with the URL's port by the connector.
        Ok(addrs.into_iter().map(|ip| SocketAddr::new(ip, 0)).collect())
    }
}

impl Resolve for GuardedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            let addrs = resolver.lookup(name.as_str()).await?;
            let addrs: Addrs = Box::new(addrs.into_iter());
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(addrs)
        })
    }
}

fn build_client(user_agent: &str, max_redirects: usize, validator: &UrlValidator) -> Result<Client> {
    Client::builder()
        .redirect(guarded_redirects(max_redirects))
        .dns_resolver(Arc::new(GuardedResolver::new(validator.resolver())))
        .user_agent(user_agent)
        .build()
        .map_err(|e| Error::Client(e.to_string()))
}

fn default_validator(options: &Options) -> UrlValidator {
    UrlValidator::new(Arc::new(SystemResolver::new(options.fetch.dns_timeout)))
}

/// Header value as text.
fn header_str<'a>(headers: &'a HeaderMap, name: reqwest::header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Lowercase MIME type without parameters.
fn mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    header_str(headers, CONTENT_LENGTH).and_then(|v| v.trim().parse().ok())
}

// =============================================================================
// Page fetching
// =============================================================================

/// Fetches remote pages and runs the server-side parse over them.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    validator: UrlValidator,
    options: Options,
}

impl PageFetcher {
    /// Create a fetcher that resolves hosts through the system resolver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be built.
    pub fn new(options: Options) -> Result<Self> {
        let validator = default_validator(&options);
        Self::with_validator(options, validator)
    }

    /// Create a fetcher with a custom validator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be built.
    pub fn with_validator(options: Options, validator: UrlValidator) -> Result<Self> {
        let client = build_client(&options.fetch.user_agent, options.fetch.max_redirects, &validator)?;
        Ok(Self { client, validator, options })
    }

    /// The validator gating every fetch.
    #[must_use]
    pub fn validator(&self) -> &UrlValidator {
        &self.validator
    }

    /// Validate, fetch and parse `url`.
    ///
    /// # Errors
    ///
    /// - [`Error::ProxyDisabled`] when fetching is turned off
    /// - [`Error::SecurityBlocked`] when the validator rejects the URL
    /// - [`Error::FetchFailed`] on transport errors and timeouts
    /// - [`Error::HttpStatus`] when the status is not 2xx/3xx
    pub async fn fetch_and_extract(&self, url: &str) -> Result<ExtractedMetadata> {
        if !self.options.fetch.enabled {
            return Err(Error::ProxyDisabled);
        }
        self.validator.validate(url).await.into_result()?;

        let page = self.fetch_page(url).await?;
        let metadata = page.extract(&self.options);

        info!(
            url,
            final_url = page.final_url,
            images = metadata.images.len(),
            embeds = metadata.embeds.len(),
            "fetched and extracted page"
        );
        Ok(metadata)
    }

    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let fetch_failed = |e: reqwest::Error| {
            warn!(url, error = %e, "page fetch failed");
            Error::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        };

        let response = self
            .client
            .get(url)
            .timeout(self.options.fetch.timeout)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(fetch_failed)?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            warn!(url, status = status.as_u16(), "page fetch returned error status");
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = header_str(response.headers(), CONTENT_TYPE).map(str::to_string);
        let body = response.bytes().await.map_err(fetch_failed)?;
        debug!(url, final_url, bytes = body.len(), content_type = content_type.as_deref(), "page body received");

        Ok(FetchedPage {
            final_url,
            html: transcode(&body, content_type.as_deref()),
        })
    }
}

/// A fetched page body and the URL it was served from after redirects.
#[derive(Debug, Clone)]
struct FetchedPage {
    final_url: String,
    html: String,
}

impl FetchedPage {
    /// Server-side parse, resolving relative URLs against the final URL.
    fn extract(&self, options: &Options) -> ExtractedMetadata {
        parse_html_metadata(&self.html, &self.final_url, options)
    }
}

// =============================================================================
// Content store boundary
// =============================================================================

/// Publication status of a saved post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Saved but not submitted.
    #[default]
    Draft,
    /// Waiting for review.
    Pending,
    /// Live.
    Publish,
}

impl PostStatus {
    /// Status name as the store expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Publish => "publish",
        }
    }
}

/// Sanitized post handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftPost {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub format: PostFormat,
    pub categories: Vec<u64>,
    pub tags: Vec<String>,
}

/// Reference to a stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
    pub id: u64,
    pub url: Option<String>,
}

/// Reference to stored media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
    /// Public URL of the stored file.
    pub url: String,
}

/// Media downloaded and checked, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedMedia {
    /// URL the media was downloaded from.
    pub url: String,
    /// Basename of the URL path, percent-decoded.
    pub filename: String,
    /// Lowercase MIME type from the allow-list.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// External content-management collaborator.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create or update a post from already-sanitized data.
    async fn create_or_update_draft(&self, post: DraftPost) -> Result<PostRef>;

    /// Store downloaded media and attach it to `post_id`.
    async fn sideload_media(&self, media: DownloadedMedia, post_id: u64) -> Result<MediaRef>;
}

// =============================================================================
// Media sideloading
// =============================================================================

/// Downloads remote images after safety and type/size checks.
#[derive(Debug, Clone)]
pub struct MediaSideloader {
    client: Client,
    validator: UrlValidator,
    options: SideloadOptions,
}

impl MediaSideloader {
    /// Create a sideloader that resolves hosts through the system resolver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be built.
    pub fn new(options: &Options) -> Result<Self> {
        Self::with_validator(options, default_validator(options))
    }

    /// Create a sideloader with a custom validator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be built.
    pub fn with_validator(options: &Options, validator: UrlValidator) -> Result<Self> {
        let client = build_client(&options.fetch.user_agent, options.sideload.max_redirects, &validator)?;
        Ok(Self {
            client,
            validator,
            options: options.sideload.clone(),
        })
    }

    /// Validate, probe and download `url`.
    ///
    /// A failed HEAD probe is tolerated; the download response is checked
    /// against the same type and size rules.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMediaUrl`] when `url` is not a well-formed http(s) URL
    /// - [`Error::SecurityBlocked`] when the validator rejects it
    /// - [`Error::UnsupportedMediaType`] / [`Error::MediaTooLarge`] on pre-check failures
    /// - [`Error::DownloadFailed`] on transport errors or an unsuccessful status
    pub async fn download(&self, url: &str) -> Result<DownloadedMedia> {
        let Some(parsed) = parse_http_url(url) else {
            return Err(Error::InvalidMediaUrl(url.to_string()));
        };
        let url = parsed.as_str();
        self.validator.validate(url).await.into_result()?;

        let probed_type = self.probe(url).await?;

        let download_failed = |reason: String| {
            warn!(url, reason = %reason, "media download failed");
            Error::DownloadFailed {
                url: url.to_string(),
                reason,
            }
        };

        let mut response = self
            .client
            .get(url)
            .timeout(self.options.download_timeout)
            .send()
            .await
            .map_err(|e| download_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(download_failed(format!("HTTP {}", response.status().as_u16())));
        }

        let content_type = header_str(response.headers(), CONTENT_TYPE)
            .map(mime_type)
            .or(probed_type)
            .unwrap_or_default();
        if !self.options.allows_type(&content_type) {
            warn!(url, content_type = %content_type, "media type rejected");
            return Err(Error::UnsupportedMediaType(content_type));
        }
        self.check_size(url, content_length(response.headers()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| download_failed(e.to_string()))? {
            bytes.extend_from_slice(&chunk);
            self.check_size(url, Some(u64::try_from(bytes.len()).unwrap_or(u64::MAX)))?;
        }

        Ok(DownloadedMedia {
            url: url.to_string(),
            filename: filename_from_url(url),
            content_type,
            bytes,
        })
    }

    /// Download `url` and hand it to `store`.
    ///
    /// # Errors
    ///
    /// Any error from [`MediaSideloader::download`] or the store.
    pub async fn sideload(&self, store: &dyn ContentStore, url: &str, post_id: u64) -> Result<MediaRef> {
        let media = self.download(url).await?;
        let media = store.sideload_media(media, post_id).await?;
        info!(url, media_id = media.id, post_id, "media sideloaded");
        Ok(media)
    }

    /// Sideload the images referenced by `<img>` tags in `content`.
    ///
    /// Only sources ending in an image extension are tried. A successful
    /// sideload rewrites `src` inside that tag only, leaving links to the
    /// original elsewhere untouched. Failed sideloads leave the tag as is.
    pub async fn side_load_images(&self, store: &dyn ContentStore, post_id: u64, content: &str) -> String {
        let tags: Vec<String> = IMG_TAG.find_iter(content).map(|m| m.as_str().to_string()).collect();
        let mut content = content.to_string();
        let mut stored: HashMap<String, String> = HashMap::new();

        for tag in tags {
            let Some(src) = IMG_TAG_SRC.captures(&tag).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
            else {
                continue;
            };
            if !SIDELOADABLE_IMAGE_SRC.is_match(&src) {
                continue;
            }

            let new_src = match stored.get(&src) {
                Some(new_src) => new_src.clone(),
                None => {
                    let remote = html_escape::decode_html_entities(&src);
                    match self.sideload(store, &remote, post_id).await {
                        Ok(media) => {
                            let new_src = html_escape::encode_double_quoted_attribute(&media.url).into_owned();
                            stored.insert(src.clone(), new_src.clone());
                            new_src
                        }
                        Err(err) => {
                            debug!(src = %src, code = err.code(), "keeping original image");
                            continue;
                        }
                    }
                }
            };

            let new_tag = tag.replace(&src, &new_src);
            content = content.replace(&tag, &new_tag);
        }

        content
    }

    /// HEAD pre-check. Returns the probed MIME type, if any.
    async fn probe(&self, url: &str) -> Result<Option<String>> {
        let response = match self.client.head(url).timeout(self.options.head_timeout).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(url, status = response.status().as_u16(), "HEAD probe unsuccessful, continuing");
                return Ok(None);
            }
            Err(e) => {
                debug!(url, error = %e, "HEAD probe failed, continuing");
                return Ok(None);
            }
        };

        let content_type = header_str(response.headers(), CONTENT_TYPE).map(mime_type);
        if let Some(content_type) = content_type.as_deref().filter(|t| !t.is_empty()) {
            if !self.options.allows_type(content_type) {
                warn!(url, content_type, "media type rejected by HEAD probe");
                return Err(Error::UnsupportedMediaType(content_type.to_string()));
            }
        }
        self.check_size(url, content_length(response.headers()))?;

        Ok(content_type.filter(|t| !t.is_empty()))
    }

    fn check_size(&self, url: &str, size: Option<u64>) -> Result<()> {
        match size {
            Some(size) if size > self.options.max_size => {
                warn!(url, size, max = self.options.max_size, "media too large");
                Err(Error::MediaTooLarge {
                    size,
                    max: self.options.max_size,
                })
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Draft saving
// =============================================================================

/// Unsanitized save request as submitted by the editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftRequest {
    pub post_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Requested status; only `publish` and `pending` change the default.
    pub status: Option<String>,
    pub format: Option<String>,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The author may publish directly. Publish requests downgrade to pending otherwise.
    #[serde(default)]
    pub can_publish: bool,
}

/// Saves posts through the content store.
pub struct DraftPublisher<'a> {
    store: &'a dyn ContentStore,
    sideloader: &'a MediaSideloader,
}

impl<'a> DraftPublisher<'a> {
    #[must_use]
    pub fn new(store: &'a dyn ContentStore, sideloader: &'a MediaSideloader) -> Self {
        Self { store, sideloader }
    }

    /// Sanitize `request`, sideload its content images and save it.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingPost`] without a post ID
    /// - Any error from [`ContentStore::create_or_update_draft`]
    pub async fn save(&self, request: DraftRequest) -> Result<PostRef> {
        let id = request.post_id.filter(|id| *id > 0).ok_or(Error::MissingPost)?;

        let status = match request.status.as_deref().map(str::trim) {
            Some("publish") if request.can_publish => PostStatus::Publish,
            Some("publish" | "pending") => PostStatus::Pending,
            _ => PostStatus::Draft,
        };

        let content = self
            .sideloader
            .side_load_images(self.store, id, request.content.trim())
            .await;

        let post = DraftPost {
            id,
            title: sanitize_text_field(request.title.trim()),
            content,
            status,
            format: request
                .format
                .as_deref()
                .map(|f| PostFormat::from_name(&sanitize_text_field(f)))
                .unwrap_or_default(),
            categories: request
                .categories
                .iter()
                .filter_map(|c| u64::try_from(*c).ok())
                .filter(|c| *c > 0)
                .collect(),
            tags: request
                .tags
                .iter()
                .map(|t| sanitize_text_field(t))
                .filter(|t| !t.is_empty())
                .collect(),
        };

        debug!(post_id = id, status = status.as_str(), format = post.format.as_str(), "saving post");
        self.store.create_or_update_draft(post).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::{BlockReason, Resolver};
    use std::net::IpAddr;
    use std::sync::Mutex;

    struct StaticResolver(Vec<IpAddr>);

    #[async_trait]
    impl Resolver for StaticResolver {
        async fn resolve(&self, _host: &str) -> std::io::Result<Vec<IpAddr>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        posts: Mutex<Vec<DraftPost>>,
        media: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContentStore for MemoryStore {
        async fn create_or_update_draft(&self, post: DraftPost) -> Result<PostRef> {
            let id = post.id;
            self.posts.lock().unwrap().push(post);
            Ok(PostRef { id, url: None })
        }

        async fn sideload_media(&self, media: DownloadedMedia, _post_id: u64) -> Result<MediaRef> {
            self.media.lock().unwrap().push(media.url);
            Ok(MediaRef {
                id: 1,
                url: "https://mysite.test/uploads/a.jpg".to_string(),
            })
        }
    }

    fn private_validator() -> UrlValidator {
        UrlValidator::new(Arc::new(StaticResolver(vec!["10.0.0.8".parse().unwrap()])))
    }

    #[tokio::test]
    async fn test_fetch_disabled() {
        let mut options = Options::default();
        options.fetch.enabled = false;
        let fetcher = PageFetcher::with_validator(options, private_validator()).unwrap();
        let err = fetcher.fetch_and_extract("https://example.com/").await.unwrap_err();
        assert!(matches!(err, Error::ProxyDisabled));
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_fetch_blocked_before_network() {
        let fetcher = PageFetcher::with_validator(Options::default(), private_validator()).unwrap();

        let err = fetcher.fetch_and_extract("http://localhost:8080/").await.unwrap_err();
        assert!(matches!(err, Error::SecurityBlocked(BlockReason::Localhost)));

        let err = fetcher.fetch_and_extract("https://intranet.example/").await.unwrap_err();
        assert!(matches!(err, Error::SecurityBlocked(BlockReason::PrivateIp)));

        let err = fetcher.fetch_and_extract("ftp://example.com/").await.unwrap_err();
        assert!(matches!(err, Error::SecurityBlocked(BlockReason::InvalidScheme)));
    }

    #[tokio::test]
    async fn test_download_rejects_malformed_url() {
        let sideloader = MediaSideloader::with_validator(&Options::default(), private_validator()).unwrap();
        let err = sideloader.download("not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidMediaUrl(_)));
        assert_eq!(err.code(), "invalid_url");
    }

    #[tokio::test]
    async fn test_side_load_images_keeps_blocked_tags() {
        let sideloader = MediaSideloader::with_validator(&Options::default(), private_validator()).unwrap();
        let store = MemoryStore::default();
        let content = r#"<p><img src="http://127.0.0.1/a.jpg" alt=""> <img src="https://x.example/page"></p>"#;
        let out = sideloader.side_load_images(&store, 7, content).await;
        assert_eq!(out, content);
        assert!(store.media.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_sanitizes_request() {
        let sideloader = MediaSideloader::with_validator(&Options::default(), private_validator()).unwrap();
        let store = MemoryStore::default();
        let publisher = DraftPublisher::new(&store, &sideloader);

        let request = DraftRequest {
            post_id: Some(42),
            title: "  <b>Hello</b>\nWorld ".to_string(),
            content: "  <p>Body</p>  ".to_string(),
            status: Some("publish".to_string()),
            format: Some("quote".to_string()),
            categories: vec![3, 0, -1, 9],
            tags: vec!["rust".to_string(), "<i></i>".to_string()],
            can_publish: false,
        };
        let saved = publisher.save(request).await.unwrap();
        assert_eq!(saved.id, 42);

        let posts = store.posts.lock().unwrap();
        let post = &posts[0];
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.content, "<p>Body</p>");
        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.format, PostFormat::Quote);
        assert_eq!(post.categories, vec![3, 9]);
        assert_eq!(post.tags, vec!["rust"]);
    }

    #[tokio::test]
    async fn test_save_requires_post_id() {
        let sideloader = MediaSideloader::with_validator(&Options::default(), private_validator()).unwrap();
        let store = MemoryStore::default();
        let err = DraftPublisher::new(&store, &sideloader)
            .save(DraftRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingPost));
    }

    #[tokio::test]
    async fn test_guarded_resolver_refuses_private_addresses() {
        for ip in ["169.254.169.254", "10.0.0.1", "::ffff:7f00:1", "fd00::2"] {
            let resolver = GuardedResolver::new(Arc::new(StaticResolver(vec![ip.parse().unwrap()])));
            let err = resolver.lookup("rebound.example").await.unwrap_err();
            assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied, "{ip}");
        }

        let mixed = vec!["93.184.216.34".parse().unwrap(), "10.0.0.1".parse().unwrap()];
        let resolver = GuardedResolver::new(Arc::new(StaticResolver(mixed)));
        assert!(resolver.lookup("split.example").await.is_err());

        let resolver = GuardedResolver::new(Arc::new(StaticResolver(Vec::new())));
        let err = resolver.lookup("nowhere.example").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_guarded_resolver_passes_public_addresses() {
        let public: IpAddr = "93.184.216.34".parse().unwrap();
        let resolver = GuardedResolver::new(Arc::new(StaticResolver(vec![public])));
        let addrs = resolver.lookup("example.com").await.unwrap();
        assert_eq!(addrs, vec![SocketAddr::new(public, 0)]);
    }

    #[test]
    fn test_redirect_targets_checked_without_dns() {
        for hop in [
            "http://169.254.169.254/latest/meta-data/",
            "http://10.0.0.1/",
            "http://[::ffff:7f00:1]/",
            "http://localhost:8080/",
            "file:///etc/passwd",
        ] {
            let url = reqwest::Url::parse(hop).unwrap();
            assert!(literal_block_reason(&url).is_some(), "{hop}");
        }
        let url = reqwest::Url::parse("https://cdn.example.com/next").unwrap();
        assert_eq!(literal_block_reason(&url), None);
    }

    #[test]
    fn test_fetched_page_resolves_against_final_url() {
        let page = FetchedPage {
            final_url: "https://moved.example/new/post".to_string(),
            html: r#"<html><body><div id="content"><img src="photo.jpg" width="640" height="480"></div></body></html>"#
                .to_string(),
        };
        let meta = page.extract(&Options::default());
        assert_eq!(meta.images, vec!["https://moved.example/new/photo.jpg"]);
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("Image/JPEG; charset=binary"), "image/jpeg");
        assert_eq!(mime_type(""), "");
    }
}
