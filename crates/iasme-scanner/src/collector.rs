//! Directory collection across both discovery strategies.

use crate::error::Result;
use crate::feed::entries_from_feed;
use crate::parser::DirectoryTableParser;
use iasme_browser::BrowserActions;
use iasme_core::{unique, DirectoryEntry, DirectoryHost};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

const LETTER_SELECTOR: &str = "[data-letter], [data-filter-letter], .az-filter button, .az-filter a";
const CERTIFICATION_SELECTOR: &str = "[data-certification], [data-filter-certification], .certification-filter button, .certification-filter a";

/// Certification facet used when the page declares none.
const ALL_CERTIFICATIONS: &str = "All";

/// Wait after navigation for client-side rendering to start.
const DEFAULT_SETTLE: Duration = Duration::from_millis(1000);

/// Enumerates every organisation listed in the directory.
pub struct DirectoryCollector {
    browser: Arc<dyn BrowserActions>,
    index_url: String,
    host: DirectoryHost,
    facet_delay: Duration,
    table_timeout_ms: u64,
    settle: Duration,
}

impl DirectoryCollector {
    #[must_use]
    pub fn new(browser: Arc<dyn BrowserActions>, index_url: impl Into<String>, host: DirectoryHost) -> Self {
        Self {
            browser,
            index_url: index_url.into(),
            host,
            facet_delay: Duration::from_millis(500),
            table_timeout_ms: 15_000,
            settle: DEFAULT_SETTLE,
        }
    }

    /// Delay between selecting a facet and reading the table.
    #[must_use]
    pub fn with_facet_delay(mut self, delay: Duration) -> Self {
        self.facet_delay = delay;
        self
    }

    /// How long to wait for the listing table to appear.
    #[must_use]
    pub fn with_table_timeout(mut self, timeout_ms: u64) -> Self {
        self.table_timeout_ms = timeout_ms;
        self
    }

    /// Wait after navigation before looking for the table.
    #[must_use]
    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Load the directory and return deduplicated entries, feed-derived first.
    ///
    /// Failing to load the index page is an error; everything after that
    /// (missing table, unclickable facets, unparseable feeds) only narrows
    /// what is found.
    pub async fn collect(&self) -> Result<Vec<DirectoryEntry>> {
        self.browser.navigate(&self.index_url).await?;
        tokio::time::sleep(self.settle).await;

        if !self
            .browser
            .wait_for_selector("table", self.table_timeout_ms)
            .await?
        {
            tracing::warn!(index = %self.index_url, "directory_table_wait_failed");
        }

        let table_entries = self.scrape_facets().await?;
        let feed_entries = self.feed_entries().await;

        let entries = merge_entries(feed_entries.into_iter().chain(table_entries));
        tracing::info!(count = entries.len(), "directory_entries_collected");
        Ok(entries)
    }

    async fn feed_entries(&self) -> Vec<DirectoryEntry> {
        let feeds = self.browser.captured_json().await;

        let entries: Vec<DirectoryEntry> = feeds
            .iter()
            .flat_map(|feed| entries_from_feed(feed, &self.index_url, &self.host))
            .collect();

        if !entries.is_empty() {
            let urls: Vec<&str> = feeds.iter().map(|feed| feed.url.as_str()).collect();
            tracing::info!(feeds = ?urls, count = entries.len(), "directory_json_feed_used");
        }
        entries
    }

    /// Read the table under every letter and certification facet pair.
    async fn scrape_facets(&self) -> Result<Vec<DirectoryEntry>> {
        let letters = self
            .facet_labels(LETTER_SELECTOR, || {
                ('A'..='Z').map(String::from).collect()
            })
            .await?;
        let certifications = self
            .facet_labels(CERTIFICATION_SELECTOR, || vec![ALL_CERTIFICATIONS.to_string()])
            .await?;

        tracing::debug!(
            letters = letters.len(),
            certifications = certifications.len(),
            "Scraping directory facets"
        );

        let parser = DirectoryTableParser::new(&self.index_url, &self.host);
        let mut visited = HashSet::new();
        let mut entries = Vec::new();

        for letter in &letters {
            self.select_facet(letter).await;

            for certification in &certifications {
                if !visited.insert((letter.as_str(), certification.as_str())) {
                    continue;
                }

                self.select_facet(certification).await;
                tokio::time::sleep(self.facet_delay).await;

                let html = self.browser.content().await?;
                let filters = [letter.clone(), certification.clone()];
                let rows = parser.parse(&html, &filters)?;
                tracing::debug!(letter = %letter, certification = %certification, rows = rows.len(), "Read directory table");
                entries.extend(rows);
            }
        }

        Ok(entries)
    }

    async fn facet_labels<F>(&self, selector: &str, fallback: F) -> Result<Vec<String>>
    where
        F: FnOnce() -> Vec<String>,
    {
        let labels = self.browser.query_texts(selector).await?;
        Ok(if labels.is_empty() { fallback() } else { labels })
    }

    async fn select_facet(&self, label: &str) {
        match self.browser.click_text(label).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!(label, "Facet control not found"),
            Err(e) => tracing::debug!(label, error = %e, "filter_click_failed"),
        }
    }
}

/// Deduplicate entries by lower-cased company name, keeping first-seen order.
///
/// The first occurrence keeps its name and links; later occurrences only
/// fill links the first lacked and add certifications and filters.
pub fn merge_entries<I>(entries: I) -> Vec<DirectoryEntry>
where
    I: IntoIterator<Item = DirectoryEntry>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<DirectoryEntry> = Vec::new();

    for entry in entries {
        match index.get(&entry.key()) {
            Some(&position) => {
                let existing = &mut merged[position];
                if existing.profile_url.is_none() {
                    existing.profile_url = entry.profile_url;
                }
                if existing.external_url.is_none() {
                    existing.external_url = entry.external_url;
                }
                let certifications = std::mem::take(&mut existing.certifications);
                existing.certifications = unique(certifications.into_iter().chain(entry.certifications));
                let filters = std::mem::take(&mut existing.filters);
                existing.filters = unique(filters.into_iter().chain(entry.filters));
            }
            None => {
                index.insert(entry.key(), merged.len());
                merged.push(entry);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(company: &str, certifications: &[&str], filters: &[&str]) -> DirectoryEntry {
        let mut entry = DirectoryEntry::new(company);
        entry.certifications = certifications.iter().map(ToString::to_string).collect();
        entry.filters = filters.iter().map(ToString::to_string).collect();
        entry
    }

    #[test]
    fn test_merge_unions_certifications() {
        let merged = merge_entries(vec![
            entry("Acme Ltd", &["Cyber Essentials"], &["A"]),
            entry("ACME LTD", &["IASME Governance"], &["B"]),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].company, "Acme Ltd");
        assert_eq!(
            merged[0].certifications,
            vec!["Cyber Essentials", "IASME Governance"]
        );
        assert_eq!(merged[0].filters, vec!["A", "B"]);
    }

    #[test]
    fn test_merge_links_first_wins() {
        let mut first = entry("Acme", &[], &[]);
        first.profile_url = Some("https://iasme.co.uk/directory/acme".to_string());
        let mut second = entry("acme", &[], &[]);
        second.profile_url = Some("https://iasme.co.uk/directory/acme-2".to_string());
        second.external_url = Some("https://acme.test/".to_string());

        let merged = merge_entries(vec![first, second]);
        assert_eq!(
            merged[0].profile_url.as_deref(),
            Some("https://iasme.co.uk/directory/acme")
        );
        assert_eq!(merged[0].external_url.as_deref(), Some("https://acme.test/"));
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let merged = merge_entries(vec![
            entry("Globex", &[], &[]),
            entry("Acme", &[], &[]),
            entry("globex", &[], &[]),
            entry("Initech", &[], &[]),
        ]);
        let names: Vec<_> = merged.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(names, vec!["Globex", "Acme", "Initech"]);
    }

    #[test]
    fn test_merge_is_exact_on_lowercased_name() {
        let merged = merge_entries(vec![entry("Acme Ltd", &[], &[]), entry("Acme Ltd.", &[], &[])]);
        assert_eq!(merged.len(), 2);
    }
}
