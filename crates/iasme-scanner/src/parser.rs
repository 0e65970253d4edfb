use crate::error::{Result, ScanError};
use iasme_core::{resolve_url, unique, DirectoryEntry, DirectoryHost};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Hosts never accepted as an organisation's website from search results.
pub const EXCLUDED_SEARCH_HOSTS: &[&str] = &["linkedin.com", "facebook.com", "twitter.com", "x.com"];

/// Search ad redirects.
const SEARCH_AD_MARKER: &str = "duckduckgo.com/y.js";

/// Anchor text that marks a link to the organisation's own site.
const WEBSITE_LINK_TEXT: &[&str] = &["Website", "Visit"];

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses the directory listing table into entries.
pub struct DirectoryTableParser<'a> {
    base_url: &'a str,
    host: &'a DirectoryHost,
}

impl<'a> DirectoryTableParser<'a> {
    pub fn new(base_url: &'a str, host: &'a DirectoryHost) -> Self {
        Self { base_url, host }
    }

    /// One entry per table row with a company name, tagged with `filters`.
    pub fn parse(&self, html: &str, filters: &[String]) -> Result<Vec<DirectoryEntry>> {
        let document = Html::parse_document(html);
        let row_selector = selector("table tbody tr")?;
        let cell_selector = selector("td")?;
        let link_selector = selector("a")?;
        let badge_cell_selector = selector("td:nth-child(2)")?;
        let badge_selector = selector("span, img, .badge")?;

        let mut entries = Vec::new();
        for row in document.select(&row_selector) {
            let Some(company_cell) = row.select(&cell_selector).next() else {
                continue;
            };
            let company = element_text(&company_cell);
            if company.is_empty() {
                continue;
            }

            let mut entry = DirectoryEntry::new(company);

            let href = company_cell
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve_url(self.base_url, href));
            if let Some(href) = href {
                if self.host.contains(&href) {
                    entry.profile_url = Some(href);
                } else {
                    entry.external_url = Some(href);
                }
            }

            if let Some(badge_cell) = row.select(&badge_cell_selector).next() {
                let labels = badge_cell.select(&badge_selector).filter_map(|badge| {
                    let text = element_text(&badge);
                    if text.is_empty() {
                        badge.value().attr("alt").map(|alt| alt.trim().to_string())
                    } else {
                        Some(text)
                    }
                });
                entry.certifications = unique(labels.filter(|label| !label.is_empty()));
            }

            entry.filters = filters.to_vec();
            entries.push(entry);
        }

        Ok(entries)
    }
}

/// First off-directory website linked from a directory profile page.
///
/// Anchors are tried before `og:url` and canonical metadata.
pub fn parse_profile_website(
    html: &str,
    base_url: &str,
    host: &DirectoryHost,
) -> Result<Option<String>> {
    let document = Html::parse_document(html);

    let anchor_groups = [
        selector("a[href*='http']")?,
        selector("a.profile-website")?,
    ];
    let mut hrefs: Vec<&str> = anchor_groups
        .iter()
        .flat_map(|group| document.select(group))
        .filter_map(|a| a.value().attr("href"))
        .collect();

    let anchors = selector("a")?;
    hrefs.extend(
        document
            .select(&anchors)
            .filter(|a| {
                let text = element_text(a);
                WEBSITE_LINK_TEXT.iter().any(|label| text.contains(label))
            })
            .filter_map(|a| a.value().attr("href")),
    );

    let meta = selector(r#"meta[property="og:url"], link[rel="canonical"]"#)?;
    hrefs.extend(
        document
            .select(&meta)
            .filter_map(|el| el.value().attr("content").or_else(|| el.value().attr("href"))),
    );

    Ok(hrefs
        .into_iter()
        .filter_map(|href| resolve_url(base_url, href))
        .find(|url| is_web_url(url) && !host.contains(url)))
}

/// Result links from a search results page, in page order.
///
/// Redirect wrappers are unwrapped and ad links skipped; no host filtering
/// is applied here.
pub fn parse_search_results(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let result_selector = selector("a.result__a")?;

    Ok(document
        .select(&result_selector)
        .filter_map(|a| a.value().attr("href"))
        .map(unwrap_redirect)
        .filter(|url| !url.contains(SEARCH_AD_MARKER))
        .collect())
}

/// Drop results that are unparseable or on a social network.
pub fn filter_search_results(results: Vec<String>) -> Vec<String> {
    results
        .into_iter()
        .filter(|result| {
            let Some(host) = Url::parse(result)
                .ok()
                .and_then(|u| u.host_str().map(str::to_lowercase))
            else {
                return false;
            };
            !EXCLUDED_SEARCH_HOSTS
                .iter()
                .any(|excluded| host == *excluded || host.ends_with(&format!(".{excluded}")))
        })
        .collect()
}

/// Value of the `uddg` parameter if present, otherwise the href itself.
fn unwrap_redirect(href: &str) -> String {
    let Some(start) = href.find("uddg=") else {
        return href.to_string();
    };
    let param = href[start..].split('&').next().unwrap_or_default();

    url::form_urlencoded::parse(param.as_bytes())
        .next()
        .map_or_else(|| href.to_string(), |(_, value)| value.into_owned())
}

fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
