use iasme_browser::BrowserError;
use iasme_core::ValidationError;
use thiserror::Error;

/// Errors raised while collecting the directory or building a record.
///
/// Inside the orchestrator every variant is a per-company failure: it is
/// logged and the entry dropped.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Record rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid selector {selector}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Resolution task for {company} did not complete: {reason}")]
    Task { company: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: ScanError = ValidationError::DomainMismatch.into();
        assert!(matches!(err, ScanError::Validation(_)));
        assert!(err.to_string().starts_with("Record rejected"));
    }

    #[test]
    fn test_browser_error_converts() {
        let err: ScanError = BrowserError::Launch("no chrome".to_string()).into();
        assert!(err.to_string().contains("no chrome"));
    }
}
