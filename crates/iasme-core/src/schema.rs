//! Output schema validation for company records.
//!
//! A record that fails validation is dropped by the orchestrator; it never
//! aborts a run.

use crate::error::ValidationError;
use crate::types::{CompanyRecord, Contact};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
    })
}

fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn check_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if email_regex().is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            field,
            value: value.to_string(),
        })
    }
}

fn check_contact(contact: &Contact) -> Result<(), ValidationError> {
    if let Some(email) = &contact.email {
        check_email("contact.email", email)?;
    }
    if let Some(linkedin) = &contact.linkedin {
        check_url("contact.linkedin", linkedin)?;
    }
    Ok(())
}

impl CompanyRecord {
    /// Check the record against the output schema.
    ///
    /// Returns the record unchanged when it conforms.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.company.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "company" });
        }

        if let Some(website) = &self.website {
            check_url("website", website)?;
        }
        if self.domain.is_some() != self.website.is_some() {
            return Err(ValidationError::DomainMismatch);
        }

        for email in &self.emails {
            check_email("emails", email)?;
        }

        if let Some(linkedin) = &self.linkedin_company {
            check_url("linkedin_company", linkedin)?;
        }
        if let Some(profile_url) = &self.profile_url {
            check_url("profile_url", profile_url)?;
        }

        for contact in [&self.it_contact, &self.hr_contact].into_iter().flatten() {
            check_contact(contact)?;
        }

        if self.sources.is_empty() {
            return Err(ValidationError::EmptyField { field: "sources" });
        }
        for source in &self.sources {
            check_url("sources", source)?;
        }

        Ok(self)
    }
}
