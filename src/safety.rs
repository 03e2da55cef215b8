//! URL safety validator (SSRF defense).
//!
//! Gates every server-side fetch and every media sideload. Checks run in a
//! fixed order: scheme, host, localhost patterns (before any DNS), DNS
//! resolution, private/reserved ranges, then the injected policies.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use url::{Host, Url};

use crate::patterns::{LOCALHOST_NAMES, LOOPBACK_MAPPED_V6, LOOPBACK_V4};

/// Why a URL was blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// Scheme is not `http` or `https`.
    InvalidScheme,
    /// URL has no host.
    MissingHost,
    /// Host matches a localhost pattern.
    Localhost,
    /// Host resolves into a private or reserved range.
    PrivateIp,
    /// Host name does not resolve.
    UnresolvableHost,
    /// A policy hook denied the URL.
    PolicyDenied(String),
}

impl BlockReason {
    /// Stable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidScheme => "invalid-scheme",
            Self::MissingHost => "missing-host",
            Self::Localhost => "localhost",
            Self::PrivateIp => "private-ip",
            Self::UnresolvableHost => "unresolvable-host",
            Self::PolicyDenied(_) => "policy-denied",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of [`UrlValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The URL may be fetched.
    Allowed,
    /// The URL must not be fetched.
    Blocked(BlockReason),
}

impl ValidationResult {
    /// `true` for [`ValidationResult::Allowed`].
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert into a `Result`, mapping a block to [`Error::SecurityBlocked`](crate::Error::SecurityBlocked).
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            Self::Allowed => Ok(()),
            Self::Blocked(reason) => Err(crate::Error::SecurityBlocked(reason)),
        }
    }
}

/// Host name resolution used by the validator.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `host` to its addresses. An error or an empty list means unresolvable.
    async fn resolve(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the system resolver, with a per-lookup timeout.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    /// Create a resolver that gives up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        let lookup = tokio::net::lookup_host((host, 80));
        let addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "DNS lookup timed out"))??;
        Ok(addrs.map(|a| a.ip()).collect())
    }
}

/// Extra rule applied to URLs that passed the built-in checks.
///
/// Policies can only block; they never re-allow a blocked URL.
pub trait UrlPolicy: Send + Sync {
    /// Return a denial reason to block `url`.
    fn deny_reason(&self, url: &Url) -> Option<String>;
}

impl<F> UrlPolicy for F
where
    F: Fn(&Url) -> Option<String> + Send + Sync,
{
    fn deny_reason(&self, url: &Url) -> Option<String> {
        self(url)
    }
}

/// Classifies URLs as fetchable or blocked.
#[derive(Clone)]
pub struct UrlValidator {
    resolver: Arc<dyn Resolver>,
    policies: Vec<Arc<dyn UrlPolicy>>,
}

impl fmt::Debug for UrlValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlValidator")
            .field("policies", &self.policies.len())
            .finish_non_exhaustive()
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(Arc::new(SystemResolver::default()))
    }
}

impl UrlValidator {
    /// Create a validator with the given resolver and no policies.
    #[must_use]
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self { resolver, policies: Vec::new() }
    }

    /// Add a policy hook. Policies run in insertion order.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn UrlPolicy>) -> Self {
        self.policies.push(policy);
        self
    }

    /// The resolver used for host lookups.
    #[must_use]
    pub fn resolver(&self) -> Arc<dyn Resolver> {
        Arc::clone(&self.resolver)
    }

    /// Classify `url`.
    pub async fn validate(&self, url: &str) -> ValidationResult {
        let result = self.check(url).await;
        if let ValidationResult::Blocked(reason) = &result {
            info!(url, reason = reason.code(), "URL blocked");
        }
        result
    }

    async fn check(&self, raw: &str) -> ValidationResult {
        let raw = raw.trim();
        let scheme = raw.split_once(':').map(|(s, _)| s.to_ascii_lowercase());
        if !matches!(scheme.as_deref(), Some("http" | "https")) {
            return ValidationResult::Blocked(BlockReason::InvalidScheme);
        }

        let Ok(url) = Url::parse(raw) else {
            return ValidationResult::Blocked(BlockReason::MissingHost);
        };

        if let Some(reason) = literal_block_reason(&url) {
            return ValidationResult::Blocked(reason);
        }

        if let Some(Host::Domain(domain)) = url.host() {
            let addrs = match self.resolver.resolve(domain).await {
                Ok(addrs) if !addrs.is_empty() => addrs,
                Ok(_) => return ValidationResult::Blocked(BlockReason::UnresolvableHost),
                Err(err) => {
                    debug!(host = domain, error = %err, "DNS resolution failed");
                    return ValidationResult::Blocked(BlockReason::UnresolvableHost);
                }
            };
            if addrs.iter().any(|ip| is_private_ip(*ip)) {
                return ValidationResult::Blocked(BlockReason::PrivateIp);
            }
        }

        for policy in &self.policies {
            if let Some(reason) = policy.deny_reason(&url) {
                return ValidationResult::Blocked(BlockReason::PolicyDenied(reason));
            }
        }

        ValidationResult::Allowed
    }
}

/// The checks that need no DNS lookup: scheme, host presence, localhost
/// patterns and, for IP-literal hosts, the private ranges.
///
/// Applied to the initial URL and to every redirect hop.
#[must_use]
pub fn literal_block_reason(url: &Url) -> Option<BlockReason> {
    if !matches!(url.scheme(), "http" | "https") {
        return Some(BlockReason::InvalidScheme);
    }
    let Some(host) = url.host() else {
        return Some(BlockReason::MissingHost);
    };
    let host_text = host.to_string();
    if host_text.is_empty() {
        return Some(BlockReason::MissingHost);
    }
    if is_localhost(&host_text) {
        return Some(BlockReason::Localhost);
    }
    let literal = match host {
        Host::Ipv4(ip) => IpAddr::V4(ip),
        Host::Ipv6(ip) => IpAddr::V6(ip),
        Host::Domain(_) => return None,
    };
    is_private_ip(literal).then_some(BlockReason::PrivateIp)
}

/// Textual localhost check, done before any DNS lookup.
///
/// Accepts bare or bracketed IPv6 forms, including IPv4-mapped loopback
/// written in hex (`::ffff:7f00:1`).
#[must_use]
pub fn is_localhost(host: &str) -> bool {
    let host = host.trim().to_ascii_lowercase();
    let host = host.trim_end_matches('.');

    LOCALHOST_NAMES.contains(&host)
        || host.ends_with(".localhost")
        || LOOPBACK_V4.is_match(host)
        || LOOPBACK_MAPPED_V6.is_match(host)
        || is_mapped_loopback(host)
}

fn is_mapped_loopback(host: &str) -> bool {
    let bare = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
    bare.parse::<Ipv6Addr>()
        .ok()
        .and_then(|ip| ip.to_ipv4_mapped())
        .is_some_and(|v4| v4.is_loopback() || v4.is_unspecified())
}

/// `true` for private, loopback, link-local and otherwise reserved addresses.
#[must_use]
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => is_private_v6(v6),
    }
}

fn is_private_v4(ip: Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || a == 0
        || a >= 240
        // 100.64.0.0/10 shared address space
        || (a == 100 && (64..128).contains(&b))
        // 192.0.0.0/24 protocol assignments
        || (a == 192 && b == 0 && c == 0)
        // 198.18.0.0/15 benchmarking
        || (a == 198 && (b == 18 || b == 19))
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_v4(v4);
    }
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
        // 2001:db8::/32 documentation
        || (first == 0x2001 && ip.segments()[1] == 0x0db8)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticResolver(Vec<IpAddr>);

    #[async_trait]
    impl Resolver for StaticResolver {
        async fn resolve(&self, _host: &str) -> std::io::Result<Vec<IpAddr>> {
            Ok(self.0.clone())
        }
    }

    fn validator(ips: &[&str]) -> UrlValidator {
        let ips = ips.iter().map(|s| s.parse().unwrap()).collect();
        UrlValidator::new(Arc::new(StaticResolver(ips)))
    }

    #[test]
    fn test_is_localhost() {
        for host in ["127.0.0.1", "localhost", "::1", "[::1]", "127.250.1.1", "LOCALHOST", "0.0.0.0"] {
            assert!(is_localhost(host), "{host}");
        }
        for host in ["[::ffff:7f00:1]", "::ffff:7f00:2", "[::ffff:0:0]"] {
            assert!(is_localhost(host), "{host}");
        }
        for host in ["8.8.8.8", "example.com", "128.0.0.1", "localhost.example.com", "[::ffff:a00:1]"] {
            assert!(!is_localhost(host), "{host}");
        }
    }

    #[test]
    fn test_is_private_ip() {
        for ip in ["10.1.2.3", "172.16.0.1", "192.168.1.1", "169.254.169.254", "100.64.0.1", "fd00::1", "fe80::1", "::ffff:10.0.0.1"] {
            assert!(is_private_ip(ip.parse().unwrap()), "{ip}");
        }
        for ip in ["8.8.8.8", "93.184.216.34", "2606:4700::1111"] {
            assert!(!is_private_ip(ip.parse().unwrap()), "{ip}");
        }
    }

    #[tokio::test]
    async fn test_scheme_and_host() {
        let v = validator(&["93.184.216.34"]);
        assert_eq!(v.validate("ftp://example.com/").await, ValidationResult::Blocked(BlockReason::InvalidScheme));
        assert_eq!(v.validate("file:///etc/passwd").await, ValidationResult::Blocked(BlockReason::InvalidScheme));
        assert_eq!(v.validate("http://").await, ValidationResult::Blocked(BlockReason::MissingHost));
        assert_eq!(v.validate("https://example.com/page").await, ValidationResult::Allowed);
    }

    #[tokio::test]
    async fn test_localhost_checked_before_dns() {
        let v = validator(&["93.184.216.34"]);
        assert_eq!(v.validate("http://localhost:8080/").await, ValidationResult::Blocked(BlockReason::Localhost));
        assert_eq!(v.validate("http://[::1]/").await, ValidationResult::Blocked(BlockReason::Localhost));
    }

    #[test]
    fn test_literal_block_reason() {
        let reason = |raw: &str| literal_block_reason(&Url::parse(raw).unwrap());
        assert_eq!(reason("http://169.254.169.254/latest/meta-data/"), Some(BlockReason::PrivateIp));
        assert_eq!(reason("http://10.0.0.1/"), Some(BlockReason::PrivateIp));
        assert_eq!(reason("http://[fd00::1]/"), Some(BlockReason::PrivateIp));
        assert_eq!(reason("http://[::ffff:127.0.0.1]/"), Some(BlockReason::Localhost));
        assert_eq!(reason("http://localhost/"), Some(BlockReason::Localhost));
        assert_eq!(reason("gopher://example.com/"), Some(BlockReason::InvalidScheme));
        assert_eq!(reason("https://example.com/"), None);
        assert_eq!(reason("https://93.184.216.34/"), None);
    }

    #[tokio::test]
    async fn test_mapped_loopback_reason() {
        let v = validator(&[]);
        assert_eq!(
            v.validate("http://[::ffff:7f00:1]/").await,
            ValidationResult::Blocked(BlockReason::Localhost)
        );
    }

    #[tokio::test]
    async fn test_metadata_endpoint_is_private() {
        let v = validator(&[]);
        assert_eq!(
            v.validate("http://169.254.169.254/latest/meta-data").await,
            ValidationResult::Blocked(BlockReason::PrivateIp)
        );
    }

    #[tokio::test]
    async fn test_domain_resolving_to_private_range() {
        let v = validator(&["10.0.0.7"]);
        assert_eq!(
            v.validate("https://intranet.example.com/").await,
            ValidationResult::Blocked(BlockReason::PrivateIp)
        );
    }

    #[tokio::test]
    async fn test_unresolvable() {
        let v = validator(&[]);
        assert_eq!(
            v.validate("https://no-such-host.invalid/").await,
            ValidationResult::Blocked(BlockReason::UnresolvableHost)
        );
    }

    #[tokio::test]
    async fn test_policy_can_block() {
        let policy = |url: &Url| {
            url.host_str()
                .filter(|h| h.ends_with("blocked.example"))
                .map(|_| "denylisted".to_string())
        };
        let v = validator(&["93.184.216.34"]).with_policy(Arc::new(policy));
        assert_eq!(
            v.validate("https://www.blocked.example/").await,
            ValidationResult::Blocked(BlockReason::PolicyDenied("denylisted".to_string()))
        );
        assert!(v.validate("https://fine.example/").await.is_allowed());
    }
}
