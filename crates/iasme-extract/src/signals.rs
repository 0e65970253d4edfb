//! Generic signal extraction over the pattern table.

use crate::patterns::{patterns, SignalKind};
use std::collections::BTreeMap;

/// Signals found in one page, grouped by kind, in match order.
///
/// Values are not deduplicated here; aggregation across pages does that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    found: BTreeMap<SignalKind, Vec<String>>,
}

impl Signals {
    /// Matches of one kind.
    pub fn get(&self, kind: SignalKind) -> &[String] {
        self.found.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Lower-cased email addresses.
    pub fn emails(&self) -> &[String] {
        self.get(SignalKind::Email)
    }

    /// Raw phone numbers.
    pub fn phones(&self) -> &[String] {
        self.get(SignalKind::Phone)
    }

    /// UK-style address fragments.
    pub fn addresses(&self) -> &[String] {
        self.get(SignalKind::Address)
    }

    /// LinkedIn company and school pages.
    pub fn linkedin_companies(&self) -> &[String] {
        self.get(SignalKind::LinkedinCompany)
    }

    /// Individual LinkedIn profiles.
    pub fn linkedin_profiles(&self) -> &[String] {
        self.get(SignalKind::LinkedinProfile)
    }

    /// Whether nothing at all was found.
    pub fn is_empty(&self) -> bool {
        self.found.values().all(Vec::is_empty)
    }
}

/// Run every registered pattern over `text`.
pub fn extract_signals(text: &str) -> Signals {
    let found = patterns()
        .iter()
        .map(|pattern| (pattern.kind, pattern.find_all(text)))
        .collect();
    Signals { found }
}
