//! Name and title candidates from flattened page text.

use crate::patterns::{pattern, SignalKind};
use iasme_core::Contact;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tags and entities, replaced with a space rather than parsed.
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>|&[^;]+;").expect("valid regex"));

/// Two or more capitalised words, a separator, then a title up to the line end or a pipe.
static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-z]+(?:\s[A-Z][a-z]+)+)\s*(?:[-\x{2013}\x{2014}|,]\s*)([^\n\r|]{2,120})")
        .expect("valid regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// An unverified person found on a page, used only as scoring input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Capitalised name
    pub name: String,
    /// Title with whitespace collapsed
    pub title: String,
    /// Email inside the same matched span
    pub email: Option<String>,
    /// LinkedIn profile contained in the same matched span
    pub linkedin: Option<String>,
}

impl From<Candidate> for Contact {
    fn from(candidate: Candidate) -> Self {
        Contact {
            name: Some(candidate.name),
            title: Some(candidate.title),
            email: candidate.email,
            linkedin: candidate.linkedin,
        }
    }
}

/// Replace tags and entities with spaces.
pub fn strip_markup(html: &str) -> String {
    MARKUP.replace_all(html, " ").into_owned()
}

/// Candidates from raw page markup.
pub fn extract_candidates_from_html(html: &str) -> Vec<Candidate> {
    extract_candidates(&strip_markup(html))
}

/// Candidates from flattened text, in page order.
pub fn extract_candidates(text: &str) -> Vec<Candidate> {
    let profiles = pattern(SignalKind::LinkedinProfile).find_all(text);
    let email = pattern(SignalKind::Email);

    CANDIDATE
        .captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(0)?.as_str();
            let name = caps.get(1)?.as_str().trim().to_string();
            let title = WHITESPACE
                .replace_all(caps.get(2)?.as_str(), " ")
                .trim()
                .to_string();
            if title.is_empty() {
                return None;
            }

            Some(Candidate {
                name,
                title,
                email: email.find_all(span).into_iter().next(),
                linkedin: profiles.iter().find(|p| span.contains(p.as_str())).cloned(),
            })
        })
        .collect()
}
