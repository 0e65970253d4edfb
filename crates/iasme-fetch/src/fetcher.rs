//! HTTP fetcher with shared cookie state and retry backoff.

use crate::backoff::backoff_delay;
use crate::error::Result;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::sync::Arc;
use std::time::Duration;

/// Desktop browser identity sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Timeout and retry settings for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Additional attempts after the first failure
    pub retries: u32,
    /// Backoff base in milliseconds
    pub delay_ms: u64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(15_000),
            retries: 3,
            delay_ms: 500,
        }
    }
}

/// Source of page bodies by URL.
///
/// `None` means the page could not be read; it is never an error.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body of a page
    async fn fetch_page(&self, url: &str) -> Option<String>;
}

/// HTTP GET client shared by every fetch in a run.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    policy: FetchPolicy,
}

impl Fetcher {
    /// Create a fetcher with a fresh cookie jar.
    pub fn new(policy: FetchPolicy) -> Result<Self> {
        Self::with_cookie_jar(policy, Arc::new(Jar::default()))
    }

    /// Create a fetcher that reads and writes the given cookie jar.
    pub fn with_cookie_jar(policy: FetchPolicy, cookies: Arc<Jar>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_provider(cookies)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, policy })
    }

    /// Fetch a page with the default policy.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        self.fetch_with(url, self.policy, None).await
    }

    /// Fetch a page, retrying network errors and non-2xx statuses.
    ///
    /// Makes at most `policy.retries + 1` attempts. Every attempt is logged
    /// with its URL, attempt number and status.
    pub async fn fetch_with(
        &self,
        url: &str,
        policy: FetchPolicy,
        headers: Option<&HeaderMap>,
    ) -> Option<String> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let mut request = self.client.get(url).timeout(policy.timeout);
            if let Some(headers) = headers {
                request = request.headers(headers.clone());
            }

            let outcome = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => {
                                tracing::debug!(
                                    url,
                                    attempt,
                                    status = status.as_u16(),
                                    "http_get_succeeded"
                                );
                                return Some(body);
                            }
                            Err(e) => (Some(status.as_u16()), e.to_string()),
                        }
                    } else {
                        (Some(status.as_u16()), format!("HTTP {status}"))
                    }
                }
                Err(e) => (e.status().map(|s| s.as_u16()), e.to_string()),
            };

            let (status, message) = outcome;
            tracing::warn!(
                url,
                attempt,
                retries = policy.retries,
                status = ?status,
                message = %message,
                "http_get_failed"
            );

            if attempt > policy.retries {
                return None;
            }

            tokio::time::sleep(backoff_delay(policy.delay_ms, attempt)).await;
        }
    }
}

#[async_trait::async_trait]
impl PageSource for Fetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        self.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = FetchPolicy::default();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.delay_ms, 500);
        assert_eq!(policy.timeout, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_unreachable_host_returns_none() {
        let fetcher = Fetcher::new(FetchPolicy {
            timeout: Duration::from_millis(200),
            retries: 0,
            delay_ms: 1,
        })
        .expect("build fetcher");

        // Port 9 (discard) on localhost is closed on test machines
        assert!(fetcher.fetch("http://127.0.0.1:9/").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_url_returns_none() {
        let fetcher = Fetcher::new(FetchPolicy {
            retries: 1,
            delay_ms: 1,
            ..FetchPolicy::default()
        })
        .expect("build fetcher");

        assert!(fetcher.fetch("not a url").await.is_none());
    }
}
