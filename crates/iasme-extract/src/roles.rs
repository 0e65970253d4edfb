//! Keyword and seniority scoring of candidates against leadership roles.

use crate::candidates::Candidate;
use serde::{Deserialize, Serialize};
use std::fmt;

const IT_KEYWORDS: &[&str] = &[
    "chief information officer",
    "chief technology officer",
    "cio",
    "cto",
    "it director",
    "head of it",
    "technology director",
    "director of technology",
    "it manager",
    "infrastructure",
    "network",
    "systems",
    "information security",
    "cyber",
];

const HR_KEYWORDS: &[&str] = &[
    "chief people officer",
    "chief human resources officer",
    "people director",
    "hr director",
    "head of people",
    "head of hr",
    "talent",
    "recruiting",
    "people manager",
    "people lead",
    "human resources",
];

/// Most senior first.
const SENIORITY: &[&str] = &[
    "chief",
    "vp",
    "vice president",
    "director",
    "head",
    "lead",
    "manager",
];

const KEYWORD_WEIGHT: usize = 10;
const SENIORITY_WEIGHT: usize = 5;

/// Leadership role a contact is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// IT and technology leadership
    It,
    /// HR and people leadership
    Hr,
}

impl Role {
    /// Keywords that mark a title as belonging to this role.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Role::It => IT_KEYWORDS,
            Role::Hr => HR_KEYWORDS,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::It => write!(f, "it"),
            Role::Hr => write!(f, "hr"),
        }
    }
}

/// Score a title for a role.
///
/// Ten points per role keyword contained in the lower-cased title, plus a
/// seniority bonus for every seniority term it contains, weighted by rank.
pub fn score_title(title: &str, role: Role) -> usize {
    let lower = title.to_lowercase();

    let keywords = role
        .keywords()
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count()
        * KEYWORD_WEIGHT;

    let seniority: usize = SENIORITY
        .iter()
        .enumerate()
        .filter(|(_, rank)| lower.contains(*rank))
        .map(|(index, _)| SENIORITY_WEIGHT * (SENIORITY.len() - index))
        .sum();

    keywords + seniority
}

/// The highest scoring candidate for a role.
///
/// Ties keep the earlier candidate. `None` when nothing scores above zero.
pub fn select_best(candidates: &[Candidate], role: Role) -> Option<&Candidate> {
    let mut best = None;
    let mut best_score = 0;

    for candidate in candidates {
        let score = score_title(&candidate.title, role);
        if score > best_score {
            best = Some(candidate);
            best_score = score;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, title: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            title: title.to_string(),
            email: None,
            linkedin: None,
        }
    }

    #[test]
    fn test_score_combines_keywords_and_seniority() {
        // "it manager" keyword plus "manager" seniority
        assert_eq!(score_title("IT Manager", Role::It), 15);
        // "chief technology officer" keyword plus "chief" seniority
        assert_eq!(score_title("Chief Technology Officer", Role::It), 45);
    }

    #[test]
    fn test_multiple_seniority_terms_add_up() {
        // "head of people" keyword, "head" and "lead" seniority
        assert_eq!(score_title("Head of People, Team Lead", Role::Hr), 10 + 15 + 10);
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // "director" contains "cto"
        assert_eq!(score_title("HR Director", Role::It), 10 + 20);
        assert_eq!(score_title("Head of HR", Role::It), 15);
    }

    #[test]
    fn test_unrelated_title_scores_zero() {
        assert_eq!(score_title("Office Administrator", Role::Hr), 0);
    }

    #[test]
    fn test_tie_keeps_first() {
        let candidates = vec![
            candidate("Ann One", "Network Engineer"),
            candidate("Ben Two", "Systems Engineer"),
        ];
        let best = select_best(&candidates, Role::It).expect("both score");
        assert_eq!(best.name, "Ann One");
    }

    #[test]
    fn test_no_positive_score_is_none() {
        let candidates = vec![candidate("Ann One", "Receptionist")];
        assert!(select_best(&candidates, Role::It).is_none());
        assert!(select_best(&[], Role::Hr).is_none());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::It.to_string(), "it");
        assert_eq!(Role::Hr.to_string(), "hr");
    }
}
