//! Error types for press-scrape.
//!
//! Only safety-policy violations, upstream I/O failures and content-store
//! failures surface as errors. Sanitization and classification never fail:
//! they produce empty or filtered values instead.

use crate::safety::BlockReason;

/// Error type for fetch, sideload and store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL failed the safety validator.
    #[error("URL blocked: {0}")]
    SecurityBlocked(BlockReason),

    /// Server-side URL fetching is turned off.
    #[error("URL fetching is disabled")]
    ProxyDisabled,

    /// Transport failure or timeout while fetching.
    #[error("Fetch of {url} failed: {reason}")]
    FetchFailed {
        /// URL that was requested.
        url: String,
        /// Transport-level diagnostic.
        reason: String,
    },

    /// Upstream answered with a status outside 2xx/3xx.
    #[error("Fetch of {url} returned HTTP {status}")]
    HttpStatus {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Media URL is not a well-formed http(s) URL.
    #[error("Invalid media URL: {0}")]
    InvalidMediaUrl(String),

    /// Media content type is not in the allow-list.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Media exceeds the configured size limit.
    #[error("Media too large: {size} bytes (max {max})")]
    MediaTooLarge {
        /// Reported or downloaded size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// Downloading media failed.
    #[error("Media download from {url} failed: {reason}")]
    DownloadFailed {
        /// Media URL.
        url: String,
        /// Transport-level diagnostic.
        reason: String,
    },

    /// The HTTP client could not be configured.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// A draft save named no post.
    #[error("Missing post ID")]
    MissingPost,

    /// The external content store rejected an operation.
    #[error("Content store error: {0}")]
    Store(String),
}

impl Error {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SecurityBlocked(_) => "url_blocked",
            Self::ProxyDisabled => "proxy_disabled",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::HttpStatus { .. } => "http_error",
            Self::InvalidMediaUrl(_) => "invalid_url",
            Self::UnsupportedMediaType(_) => "invalid_image_type",
            Self::MediaTooLarge { .. } => "file_too_large",
            Self::DownloadFailed { .. } => "download_failed",
            Self::Client(_) => "client_error",
            Self::MissingPost => "invalid_post",
            Self::Store(_) => "sideload_failed",
        }
    }

    /// Generic message safe to show an end user.
    ///
    /// Never includes upstream diagnostics; those only go to the log.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SecurityBlocked(_) => "This URL cannot be accessed for security reasons.",
            Self::ProxyDisabled => "Fetching remote pages is disabled.",
            Self::FetchFailed { .. } | Self::HttpStatus { .. } => {
                "Unable to fetch the requested URL."
            }
            Self::InvalidMediaUrl(_) => "The media URL is not valid.",
            Self::UnsupportedMediaType(_) => "The file type is not allowed.",
            Self::MediaTooLarge { .. } => "The file is too large.",
            Self::DownloadFailed { .. } => "Unable to download the media file.",
            Self::Client(_) => "Unable to fetch the requested URL.",
            Self::MissingPost => "Missing post ID.",
            Self::Store(_) => "Unable to save the media file.",
        }
    }

    /// HTTP status a transport layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SecurityBlocked(_)
            | Self::InvalidMediaUrl(_)
            | Self::UnsupportedMediaType(_)
            | Self::MediaTooLarge { .. }
            | Self::MissingPost => 400,
            Self::ProxyDisabled => 403,
            Self::FetchFailed { .. } | Self::HttpStatus { .. } | Self::DownloadFailed { .. } => 502,
            Self::Client(_) | Self::Store(_) => 500,
        }
    }
}

/// Result type alias for press-scrape operations.
pub type Result<T> = std::result::Result<T, Error>;
