//! One complete research run.

use crate::output::write_output;
use anyhow::{Context, Result};
use iasme_browser::BrowserEngine;
use iasme_core::{load_rename_map, AppConfig, CompanyRecord};
use iasme_fetch::{FetchPolicy, Fetcher};
use iasme_scanner::{CompanyResolver, DirectoryCollector, EnrichmentOrchestrator};
use std::sync::Arc;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Entries found in the directory
    pub discovered: usize,
    /// Entries handed to the resolver after `max_companies`
    pub attempted: usize,
    /// Validated records, in completion order
    pub records: Vec<CompanyRecord>,
}

/// Collect the directory, enrich every entry and write the output.
///
/// Configuration problems and browser launch failures abort the run before
/// any company is processed. Individual companies that fail are only logged.
pub async fn run(config: &AppConfig) -> Result<RunSummary> {
    config.validate().context("invalid configuration")?;
    let host = config.directory_host()?;
    let rename_map = config
        .output
        .map_file
        .as_deref()
        .map(load_rename_map)
        .transpose()
        .context("failed to load rename map")?;

    let fetcher = Fetcher::new(FetchPolicy {
        timeout: config.scanning.timeout(),
        retries: config.scanning.retries,
        delay_ms: config.scanning.delay_ms,
    })
    .context("failed to build HTTP client")?;

    let engine = Arc::new(
        BrowserEngine::launch(config.browser.headless)
            .await
            .context("failed to launch browser")?,
    );

    let collected = DirectoryCollector::new(engine.clone(), config.directory.index.clone(), host.clone())
        .with_facet_delay(config.scanning.delay())
        .with_table_timeout(config.scanning.timeout_ms)
        .collect()
        .await;

    match Arc::try_unwrap(engine) {
        Ok(engine) => {
            if let Err(e) = engine.close().await {
                tracing::warn!(error = %e, "Failed to close browser");
            }
        }
        Err(_) => tracing::warn!("Browser still referenced, leaving it to drop"),
    }

    let mut entries = collected.context("failed to collect directory entries")?;
    let discovered = entries.len();
    if let Some(max) = config.scanning.max_companies.filter(|max| *max > 0) {
        entries.truncate(max);
    }
    let attempted = entries.len();

    let resolver = CompanyResolver::new(Arc::new(fetcher), config.directory.index.clone(), host)
        .with_search_url(config.directory.search_url.clone());
    let records = EnrichmentOrchestrator::new(Arc::new(resolver))
        .with_concurrency(config.scanning.concurrency)
        .with_start_delay(config.scanning.delay())
        .run(entries)
        .await;

    match &config.output.path {
        Some(path) if !config.output.dry_run => {
            write_output(path, &records, config.output.format, rename_map.as_ref())?;
        }
        Some(path) => tracing::info!(path = %path.display(), "Dry run, output not written"),
        None => tracing::debug!("No output path configured"),
    }

    tracing::info!(
        discovered,
        attempted,
        processed = records.len(),
        "Run complete"
    );

    Ok(RunSummary {
        discovered,
        attempted,
        records,
    })
}
