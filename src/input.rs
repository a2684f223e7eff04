//! Input collection: presence and URL-syntax checks run before any network call.

use std::fmt;
use std::net::IpAddr;

use url::{Host, Url};

use crate::error::{AppError, Result};

/// Per-request inputs that passed validation. Built fresh for every trigger
/// and dropped when the request completes.
#[derive(Clone)]
pub struct RequestContext {
    pub api_key: String,
    pub target_url: Url,
}

impl RequestContext {
    pub fn from_input(api_key: &str, target_url: &str) -> Result<Self> {
        let api_key = api_key.trim();
        let target_url = target_url.trim();

        if api_key.is_empty() || target_url.is_empty() {
            return Err(AppError::MissingInput);
        }

        let target_url = parse_url(target_url)?;

        Ok(RequestContext {
            api_key: api_key.to_string(),
            target_url,
        })
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("api_key", &"<redacted>")
            .field("target_url", &self.target_url.as_str())
            .finish()
    }
}

/// Generic "looks like a URL" check: absolute http(s) URL with a usable host.
pub fn parse_url(raw: &str) -> Result<Url> {
    let invalid = || AppError::InvalidUrl(raw.to_string());

    if raw.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(url),
        Some(Host::Domain(domain)) if is_plausible_domain(domain) => Ok(url),
        _ => Err(invalid()),
    }
}

fn is_plausible_domain(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") || domain.parse::<IpAddr>().is_ok() {
        return true;
    }

    let labels: Vec<&str> = domain.trim_end_matches('.').split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
