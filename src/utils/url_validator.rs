//! Syntactic URL validation.
//!
//! Decides whether a submitted string is an absolute URL worth encoding. Nothing is
//! fetched or resolved; a valid URL carries no reachability guarantee.

use regex::Regex;
use std::sync::LazyLock;
use url::{Host, Url};

/// Longest URL accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Schemes accepted by [`is_valid_url`].
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// A single DNS label in its ASCII (punycode) form.
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").unwrap());

/// Top-level label: alphabetic, or an internationalised `xn--` label.
static TLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z]{2,63}|xn--[a-z0-9]{1,59})$").unwrap());

/// Dotted-quad IPv4 as written by the client, before any numeric normalization.
///
/// Octets with leading zeros are refused; the `url` crate would read them as octal.
static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0|[1-9]\d{0,2})(?:\.(?:0|[1-9]\d{0,2})){3}$").unwrap()
});

/// Returns `true` if `candidate` is a well-formed absolute URL.
///
/// # Rules
///
/// 1. **Length**: non-empty, at most [`MAX_URL_LENGTH`] bytes, no whitespace
/// 2. **Scheme**: one of [`ALLOWED_SCHEMES`], followed by a literal `://`
/// 3. **Authority**: non-empty; optional `user[:password]@` and port
/// 4. **Host**: `localhost`, dotted-quad IPv4, bracketed IPv6, or a domain name
///    with a top-level label
///
/// Never panics; any parse failure yields `false`.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com"));
/// assert!(!is_valid_url("example.com"));
/// assert!(!is_valid_url("https://"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.len() > MAX_URL_LENGTH {
        return false;
    }

    if candidate.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((scheme, rest)) = candidate.split_once("://") else {
        return false;
    };

    if !ALLOWED_SCHEMES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    {
        return false;
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if authority.is_empty() {
        return false;
    }

    let Ok(url) = Url::parse(candidate) else {
        return false;
    };

    match url.host() {
        Some(Host::Domain(domain)) => is_valid_hostname(domain),
        Some(Host::Ipv4(_)) => IPV4_REGEX.is_match(raw_host(authority)),
        Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Strips userinfo and port from a raw authority component.
fn raw_host(authority: &str) -> &str {
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    if host_port.starts_with('[') {
        return host_port;
    }

    host_port
        .rsplit_once(':')
        .map_or(host_port, |(host, _)| host)
}

/// Checks an already-lowercased, punycode-encoded domain name.
fn is_valid_hostname(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    if domain == "localhost" {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };

    !rest.is_empty()
        && TLD_REGEX.is_match(tld)
        && rest.iter().all(|label| LABEL_REGEX.is_match(label))
}
