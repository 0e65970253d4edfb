//! URL normalisation, domain derivation and order-preserving dedup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use url::Url;

/// Remove duplicates while keeping the first occurrence of each item in order.
pub fn unique<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Normalise a website URL.
///
/// Strips the fragment and any trailing slash, keeps the scheme and any
/// `www.` prefix, and assumes `http://` when no scheme is given. Returns
/// `None` for anything that is not an http(s) URL with a host.
pub fn normalise_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{trimmed}")).ok()?
        }
        Err(_) => return None,
    };
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    url.set_fragment(None);

    let rendered = url.to_string();
    match rendered.strip_suffix('/') {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(rendered),
    }
}

/// Lower-cased hostname of a URL with a leading `www.` removed.
pub fn extract_domain(url: &str) -> Option<String> {
    let candidate = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(strip_www(&host).to_string())
}

/// Resolve a possibly relative href against a base URL.
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match Url::parse(base) {
        Ok(base) => base.join(href).ok().map(|u| u.to_string()),
        Err(_) => Url::parse(href).ok().map(|u| u.to_string()),
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Host of the directory site.
///
/// Links on this host (or any of its subdomains) are directory profile
/// pages; everything else is an organisation's own site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryHost(String);

impl DirectoryHost {
    /// Create from a bare hostname.
    #[must_use]
    pub fn new(host: &str) -> Self {
        Self(strip_www(&host.trim().to_lowercase()).to_string())
    }

    /// Derive from the directory index URL.
    #[must_use]
    pub fn from_index(index: &str) -> Option<Self> {
        let url = Url::parse(index).ok()?;
        url.host_str().map(Self::new)
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the URL points at the directory itself.
    ///
    /// Unparseable URLs are never directory-hosted.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        let Some(host) = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
        else {
            return false;
        };

        let host = strip_www(&host);
        host == self.0 || host.ends_with(&format!(".{}", self.0))
    }
}

impl fmt::Display for DirectoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
