//! Shared types used across the research pipeline.
//!
//! A [`DirectoryEntry`] is what the directory collector discovers; a
//! [`CompanyRecord`] is what the resolver builds from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One organisation as listed in the certification directory, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    /// Organisation name as shown by the directory
    pub company: String,
    /// Directory-hosted detail page
    pub profile_url: Option<String>,
    /// Organisation's own site when the directory links it directly
    pub external_url: Option<String>,
    /// Certification labels
    pub certifications: Vec<String>,
    /// Facet labels or feed URLs the entry was discovered under
    pub filters: Vec<String>,
}

impl DirectoryEntry {
    /// Create an entry with only a company name.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            profile_url: None,
            external_url: None,
            certifications: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Identity key used to merge duplicate listings.
    #[must_use]
    pub fn key(&self) -> String {
        self.company.to_lowercase()
    }
}

/// A person selected for a role on the organisation's site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Person's name
    pub name: Option<String>,
    /// Job title as written on the page
    pub title: Option<String>,
    /// Email found next to the name
    pub email: Option<String>,
    /// Individual LinkedIn profile found next to the name
    pub linkedin: Option<String>,
}

/// Enriched organisation record, one per directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Organisation name
    pub company: String,
    /// Lower-cased host of `website` without `www.`
    pub domain: Option<String>,
    /// Normalised website URL
    pub website: Option<String>,
    /// Lower-cased, deduplicated, in order of first appearance
    pub emails: Vec<String>,
    /// Deduplicated, raw form
    pub phones: Vec<String>,
    /// First postal address found
    pub address: Option<String>,
    /// Company or school LinkedIn page
    pub linkedin_company: Option<String>,
    /// Best IT leadership contact
    pub it_contact: Option<Contact>,
    /// Best HR / people leadership contact
    pub hr_contact: Option<Contact>,
    /// Deduplicated certification labels
    pub certifications: Vec<String>,
    /// Directory-hosted detail page
    pub profile_url: Option<String>,
    /// Every URL consulted while building this record
    pub sources: Vec<String>,
    /// Date the record was built
    pub last_seen: NaiveDate,
}

impl CompanyRecord {
    /// Create a record carrying only the directory-sourced fields.
    pub fn new(company: impl Into<String>, last_seen: NaiveDate) -> Self {
        Self {
            company: company.into(),
            domain: None,
            website: None,
            emails: Vec::new(),
            phones: Vec::new(),
            address: None,
            linkedin_company: None,
            it_contact: None,
            hr_contact: None,
            certifications: Vec::new(),
            profile_url: None,
            sources: Vec::new(),
            last_seen,
        }
    }
}
