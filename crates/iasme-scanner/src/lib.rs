//! IASME Scanner - Directory collection and company enrichment.
//!
//! This crate drives the research pipeline end to end: it enumerates the
//! certification directory through the browser, resolves each listed
//! organisation's website, crawls a fixed set of pages on it and builds a
//! validated [`iasme_core::CompanyRecord`] per entry.
//!
//! # Features
//!
//! - Dual-source directory discovery (captured JSON feeds and facetted table scraping)
//! - Website resolution cascade: external link, profile page, web search
//! - Pooled extraction across sub-pages fetched two at a time
//! - Bounded-concurrency orchestration with per-company failure isolation
//!
//! # Example
//!
//! ```rust,ignore
//! use iasme_scanner::{CompanyResolver, DirectoryCollector, EnrichmentOrchestrator};
//! use std::sync::Arc;
//!
//! let entries = DirectoryCollector::new(browser, index_url.clone(), host.clone())
//!     .collect()
//!     .await?;
//!
//! let resolver = CompanyResolver::new(Arc::new(fetcher), index_url, host);
//! let records = EnrichmentOrchestrator::new(Arc::new(resolver))
//!     .with_concurrency(4)
//!     .run(entries)
//!     .await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod collector;
#[allow(missing_docs)]
pub mod error;
pub mod feed;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;
#[allow(missing_docs)]
pub mod resolver;

// Re-export commonly used types
pub use collector::{merge_entries, DirectoryCollector};
pub use error::{Result, ScanError};
pub use feed::{entries_from_feed, looks_like_company, walk_for_items};
pub use orchestrator::EnrichmentOrchestrator;
pub use parser::{
    filter_search_results, parse_profile_website, parse_search_results, DirectoryTableParser,
};
pub use resolver::{email_matches_domain, fetch_targets, CompanyResolver, FETCH_PATHS};
