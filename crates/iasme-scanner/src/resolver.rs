//! Website resolution and enrichment for a single directory entry.
//!
//! Resolution is a short-circuiting cascade: a known external link, then
//! the directory profile page, then a web search. Whatever website it
//! settles on is crawled at a fixed set of paths and the pages pooled for
//! extraction.

use crate::error::Result;
use crate::parser::{filter_search_results, parse_profile_website, parse_search_results};
use futures::stream::{self, StreamExt};
use iasme_core::config::DEFAULT_SEARCH_URL;
use iasme_core::{
    extract_domain, normalise_url, unique, CompanyRecord, Contact, DirectoryEntry, DirectoryHost,
};
use iasme_extract::{extract_candidates_from_html, extract_signals, select_best, Candidate, Role, Signals};
use iasme_fetch::PageSource;
use std::sync::Arc;
use url::Url;

/// Paths crawled on every resolved website; `""` is the homepage.
pub const FETCH_PATHS: &[&str] = &[
    "",
    "/contact",
    "/about",
    "/team",
    "/leadership",
    "/people",
    "/careers",
    "/jobs",
    "/privacy",
    "/impressum",
];

/// Sub-page fetches in flight per company.
const PAGE_CONCURRENCY: usize = 2;

/// Homepage plus every crawl path, deduplicated and URL-valid only.
pub fn fetch_targets(website: &str) -> Vec<String> {
    let base = website.trim_end_matches('/');
    unique(
        FETCH_PATHS
            .iter()
            .map(|path| format!("{base}{path}"))
            .filter(|url| Url::parse(url).is_ok()),
    )
}

/// Whether an email's domain part is `domain` or one of its subdomains.
pub fn email_matches_domain(email: &str, domain: &str) -> bool {
    email.rsplit_once('@').is_some_and(|(_, email_domain)| {
        email_domain == domain || email_domain.ends_with(&format!(".{domain}"))
    })
}

/// Builds one [`CompanyRecord`] per directory entry.
pub struct CompanyResolver {
    pages: Arc<dyn PageSource>,
    index_url: String,
    search_url: String,
    host: DirectoryHost,
}

impl CompanyResolver {
    #[must_use]
    pub fn new(pages: Arc<dyn PageSource>, index_url: impl Into<String>, host: DirectoryHost) -> Self {
        Self {
            pages,
            index_url: index_url.into(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            host,
        }
    }

    /// Search results page used as the last resolution step.
    #[must_use]
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Resolve, crawl and extract one entry.
    ///
    /// Unreachable pages never fail the record; the result is validated by
    /// the caller.
    pub async fn resolve(&self, entry: &DirectoryEntry) -> Result<CompanyRecord> {
        let mut sources = vec![self.index_url.clone()];

        let resolved = self
            .resolve_website(entry, &mut sources)
            .await?
            .and_then(|website| extract_domain(&website).map(|domain| (website, domain)));

        let mut record = CompanyRecord::new(entry.company.clone(), chrono::Local::now().date_naive());
        record.certifications = unique(entry.certifications.iter().cloned());
        record.profile_url = entry.profile_url.clone();

        if let Some((website, domain)) = resolved {
            sources.push(website.clone());

            let pages = self.fetch_pages(fetch_targets(&website)).await;
            sources.extend(pages.iter().map(|(url, _)| url.clone()));

            let signals: Vec<Signals> = pages.iter().map(|(_, html)| extract_signals(html)).collect();
            let candidates: Vec<Candidate> = pages
                .iter()
                .flat_map(|(_, html)| extract_candidates_from_html(html))
                .collect();

            record.emails = select_emails(&signals, &domain);
            record.phones = unique(signals.iter().flat_map(|s| s.phones().iter().cloned()));
            record.address = signals
                .iter()
                .flat_map(|s| s.addresses().iter())
                .next()
                .cloned();
            record.linkedin_company = signals
                .iter()
                .find_map(|s| s.linkedin_companies().first().cloned());
            record.it_contact = select_best(&candidates, Role::It).cloned().map(Contact::from);
            record.hr_contact = select_best(&candidates, Role::Hr).cloned().map(Contact::from);
            record.website = Some(website);
            record.domain = Some(domain);
        }

        record.sources = unique(sources);
        Ok(record)
    }

    /// Run the cascade, recording every consulted page in `sources`.
    async fn resolve_website(
        &self,
        entry: &DirectoryEntry,
        sources: &mut Vec<String>,
    ) -> Result<Option<String>> {
        if let Some(website) = entry
            .external_url
            .as_deref()
            .filter(|url| !self.host.contains(url))
            .and_then(normalise_url)
        {
            return Ok(Some(website));
        }

        if let Some(profile_url) = &entry.profile_url {
            if let Some(html) = self.pages.fetch_page(profile_url).await {
                sources.push(profile_url.clone());

                if let Some(website) =
                    parse_profile_website(&html, profile_url, &self.host)?.and_then(|url| normalise_url(&url))
                {
                    tracing::info!(company = %entry.company, url = %website, "website_found_profile");
                    return Ok(Some(website));
                }
            }
        }

        let Some(search_url) = self.search_query_url(&entry.company) else {
            tracing::warn!(search_url = %self.search_url, "Search URL is not valid, skipping search");
            return Ok(None);
        };
        let Some(html) = self.pages.fetch_page(&search_url).await else {
            return Ok(None);
        };

        let results = filter_search_results(parse_search_results(&html)?);
        let Some(first) = results.first() else {
            tracing::debug!(company = %entry.company, "No usable search results");
            return Ok(None);
        };
        sources.push(search_url);

        let website = normalise_url(first);
        if let Some(website) = &website {
            tracing::info!(company = %entry.company, url = %website, "website_found_search");
        }
        Ok(website)
    }

    fn search_query_url(&self, company: &str) -> Option<String> {
        let mut url = Url::parse(&self.search_url).ok()?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{company} official site"));
        Some(url.to_string())
    }

    /// Fetch every target two at a time, keeping target order and dropping misses.
    async fn fetch_pages(&self, targets: Vec<String>) -> Vec<(String, String)> {
        stream::iter(targets)
            .map(|url| async move {
                let page = self.pages.fetch_page(&url).await;
                (url, page)
            })
            .buffered(PAGE_CONCURRENCY)
            .filter_map(|(url, page)| async move {
                if page.is_none() {
                    tracing::debug!(url = %url, "page_fetch_failed");
                }
                page.map(|html| (url, html))
            })
            .collect()
            .await
    }
}

/// Emails on the company's own domain, or every email when none match.
fn select_emails(signals: &[Signals], domain: &str) -> Vec<String> {
    let all = unique(signals.iter().flat_map(|s| s.emails().iter().cloned()));
    let matching: Vec<String> = all
        .iter()
        .filter(|email| email_matches_domain(email, domain))
        .cloned()
        .collect();

    if matching.is_empty() {
        all
    } else {
        matching
    }
}
