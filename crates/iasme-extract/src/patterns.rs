//! Named signal patterns.
//!
//! Adding a signal type means adding a [`SignalKind`] variant and a row to
//! the table below; [`crate::signals::extract_signals`] picks it up as is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of signal a pattern produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Email address
    Email,
    /// Phone number, raw form
    Phone,
    /// UK-style postal address
    Address,
    /// LinkedIn company or school page
    LinkedinCompany,
    /// Individual LinkedIn profile
    LinkedinProfile,
}

/// A compiled pattern and how its matches are post-processed.
#[derive(Debug)]
pub struct SignalPattern {
    /// Signal produced by this pattern
    pub kind: SignalKind,
    /// Compiled expression
    pub regex: Regex,
    /// Lower-case every match
    pub lowercase: bool,
    /// Trim surrounding whitespace from every match
    pub trim: bool,
}

impl SignalPattern {
    fn new(kind: SignalKind, pattern: &str, lowercase: bool, trim: bool) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("valid regex"),
            lowercase,
            trim,
        }
    }

    /// Apply this pattern to `text`, in match order.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.regex
            .find_iter(text)
            .map(|m| {
                let value = if self.trim { m.as_str().trim() } else { m.as_str() };
                if self.lowercase {
                    value.to_lowercase()
                } else {
                    value.to_string()
                }
            })
            .filter(|value| !value.is_empty())
            .collect()
    }
}

const EMAIL: &str = r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}";
const PHONE: &str = r"(?:(?:\+|00)\d{1,3}[\s-]?)?(?:\(0\))?(?:\d[\s-]?){7,15}\d";
const ADDRESS: &str = r"(?i)\d+\s+[\w\s]+,?\s+[\w\s]+,?\s+(?:UK|United Kingdom|England|Scotland|Wales|Northern Ireland)";
const LINKEDIN_COMPANY: &str = r"(?i)https?://(?:[\w.-]+\.)?linkedin\.com/(?:company|school)/[\w%\-]+";
const LINKEDIN_PROFILE: &str = r"(?i)https?://(?:[\w.-]+\.)?linkedin\.com/in/[\w%\-]+";

static PATTERNS: Lazy<Vec<SignalPattern>> = Lazy::new(|| {
    vec![
        SignalPattern::new(SignalKind::Email, EMAIL, true, false),
        SignalPattern::new(SignalKind::Phone, PHONE, false, true),
        SignalPattern::new(SignalKind::Address, ADDRESS, false, true),
        SignalPattern::new(SignalKind::LinkedinCompany, LINKEDIN_COMPANY, false, false),
        SignalPattern::new(SignalKind::LinkedinProfile, LINKEDIN_PROFILE, false, false),
    ]
});

/// Every registered pattern.
pub fn patterns() -> &'static [SignalPattern] {
    &PATTERNS
}

/// The pattern registered for `kind`.
pub fn pattern(kind: SignalKind) -> &'static SignalPattern {
    PATTERNS
        .iter()
        .find(|p| p.kind == kind)
        .expect("every signal kind has a pattern")
}
