use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("query {selector} failed: {reason}")]
    Query { selector: String, reason: String },

    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("response capture failed: {0}")]
    Capture(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::Navigation {
            url: "https://iasme.co.uk".to_string(),
            reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "navigation to https://iasme.co.uk failed: net::ERR_NAME_NOT_RESOLVED"
        );
    }

    #[test]
    fn test_launch_error() {
        let err = BrowserError::Launch("no chrome executable".to_string());
        assert!(err.to_string().contains("no chrome executable"));
    }
}
