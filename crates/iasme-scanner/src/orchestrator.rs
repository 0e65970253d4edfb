//! Bounded-concurrency enrichment of directory entries.
//!
//! This module provides the `EnrichmentOrchestrator`, which runs the
//! [`CompanyResolver`] over every entry, validates each record and collects
//! the survivors. A failure in one entry is logged and dropped; it never
//! affects another entry or aborts the batch.

use crate::error::ScanError;
use crate::resolver::CompanyResolver;
use futures::stream::{FuturesUnordered, StreamExt};
use iasme_core::{CompanyRecord, DirectoryEntry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};

/// Default number of companies resolved at once.
const DEFAULT_CONCURRENCY: usize = 4;

/// Runs company resolution across all entries.
pub struct EnrichmentOrchestrator {
    /// Resolver shared by every task
    resolver: Arc<CompanyResolver>,
    /// Maximum concurrent resolutions
    concurrency: usize,
    /// Politeness delay before each resolution starts
    start_delay: Duration,
}

impl EnrichmentOrchestrator {
    /// Create a new orchestrator.
    #[must_use]
    pub fn new(resolver: Arc<CompanyResolver>) -> Self {
        Self {
            resolver,
            concurrency: DEFAULT_CONCURRENCY,
            start_delay: Duration::ZERO,
        }
    }

    /// Set the maximum number of concurrent resolutions.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Wait this long before each resolution starts.
    #[must_use]
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Resolve and validate every entry.
    ///
    /// Records are returned in completion order. Entries that fail are
    /// absent from the result.
    pub async fn run(&self, entries: Vec<DirectoryEntry>) -> Vec<CompanyRecord> {
        let total = entries.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let records = Arc::new(Mutex::new(Vec::with_capacity(total)));
        let processed = Arc::new(AtomicUsize::new(0));

        let mut tasks = FuturesUnordered::new();

        for entry in entries {
            let company = entry.company.clone();
            let resolver = self.resolver.clone();
            let semaphore = semaphore.clone();
            let records = records.clone();
            let processed = processed.clone();
            let start_delay = self.start_delay;

            let handle = tokio::spawn(async move {
                let outcome = async {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| ScanError::Task {
                            company: entry.company.clone(),
                            reason: e.to_string(),
                        })?;

                    if !start_delay.is_zero() {
                        tokio::time::sleep(start_delay).await;
                    }

                    let record = resolver.resolve(&entry).await?.validate()?;
                    records.lock().await.push(record);
                    Ok::<_, ScanError>(())
                }
                .await;

                match outcome {
                    Ok(()) => {
                        let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
                        tracing::info!(
                            company = %entry.company,
                            processed = done,
                            total,
                            "company_processed"
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            company = %entry.company,
                            error = %e,
                            "company_processing_failed"
                        );
                    }
                }
            });

            tasks.push(async move { (company, handle.await) });
        }

        while let Some((company, joined)) = tasks.next().await {
            if let Err(e) = joined {
                let error = ScanError::Task {
                    company: company.clone(),
                    reason: e.to_string(),
                };
                tracing::error!(company = %company, error = %error, "company_processing_failed");
            }
        }

        let mut records = records.lock().await;
        std::mem::take(&mut *records)
    }
}
