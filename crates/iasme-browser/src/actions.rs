use crate::error::Result;
use serde_json::Value;

/// A JSON network response observed while the page was loading.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedResponse {
    /// Request URL
    pub url: String,
    /// Content type reported by the server
    pub content_type: String,
    /// Parsed response body
    pub body: Value,
}

/// Browser interactions the directory collector relies on.
///
/// Every interaction that only affects UI state is non-fatal: a missing
/// selector or an unclickable label is reported as `false`, not an error.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the document to load
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait up to `timeout_ms` for a selector to appear; `false` on timeout
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<bool>;

    /// Trimmed, non-empty text of every element matching the selector
    async fn query_texts(&self, selector: &str) -> Result<Vec<String>>;

    /// Click the first element whose visible text matches `label`; `false` if none
    async fn click_text(&self, label: &str) -> Result<bool>;

    /// Serialized DOM of the current page
    async fn content(&self) -> Result<String>;

    /// Every JSON response captured since the page was opened
    async fn captured_json(&self) -> Vec<CapturedResponse>;
}

/// Whether a content type denotes a JSON payload.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(is_json_content_type("application/ld+json"));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("application/javascript"));
        assert!(!is_json_content_type(""));
    }
}
