mod common;

use async_trait::async_trait;
use common::CannedPages;
use iasme_core::{DirectoryEntry, DirectoryHost};
use iasme_fetch::PageSource;
use iasme_scanner::{CompanyResolver, EnrichmentOrchestrator};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const INDEX: &str = "https://iasme.co.uk/network-directory/";

fn orchestrator(pages: CannedPages, concurrency: usize) -> EnrichmentOrchestrator {
    let resolver = CompanyResolver::new(Arc::new(pages), INDEX, DirectoryHost::new("iasme.co.uk"))
        .with_search_url("https://search.test/html/");
    EnrichmentOrchestrator::new(Arc::new(resolver)).with_concurrency(concurrency)
}

fn entry_with_site(company: &str, site: &str) -> DirectoryEntry {
    let mut entry = DirectoryEntry::new(company);
    entry.external_url = Some(site.to_string());
    entry
}

#[tokio::test]
async fn test_failed_entry_does_not_abort_batch() {
    let pages = CannedPages::default()
        .with_page("https://acme.test", "info@acme.test")
        .with_page("https://globex.test/contact", "sales@globex.test");

    let entries = vec![
        entry_with_site("Acme Ltd", "https://acme.test/"),
        // Blank names fail record validation
        DirectoryEntry::new("   "),
        entry_with_site("Globex", "https://globex.test"),
    ];

    let mut records = orchestrator(pages, 2).run(entries).await;
    records.sort_by(|a, b| a.company.cmp(&b.company));

    let names: Vec<_> = records.iter().map(|r| r.company.as_str()).collect();
    assert_eq!(names, vec!["Acme Ltd", "Globex"]);
    assert_eq!(records[0].emails, vec!["info@acme.test"]);
    assert_eq!(records[1].emails, vec!["sales@globex.test"]);
}

#[tokio::test]
async fn test_empty_input_yields_no_records() {
    let records = orchestrator(CannedPages::default(), 4).run(Vec::new()).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_sequential_run_with_start_delay() {
    let entries: Vec<_> = ["Alpha", "Beta", "Gamma"]
        .iter()
        .map(|name| DirectoryEntry::new(*name))
        .collect();

    let records = orchestrator(CannedPages::default(), 1)
        .with_start_delay(Duration::from_millis(5))
        .run(entries)
        .await;

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.website.is_none()));
    assert!(records.iter().all(|r| r.sources == vec![INDEX.to_string()]));
}

/// Slow pages that record the peak number of requests in flight.
#[derive(Default)]
struct InFlightPages {
    state: Mutex<InFlight>,
}

#[derive(Default)]
struct InFlight {
    total: usize,
    per_host: HashMap<String, usize>,
    max_total: usize,
    max_per_host: usize,
}

impl InFlightPages {
    fn peaks(&self) -> (usize, usize) {
        let state = self.state.lock().expect("lock state");
        (state.max_total, state.max_per_host)
    }
}

fn host_of(url: &str) -> String {
    url.split('/').nth(2).unwrap_or_default().to_string()
}

#[async_trait]
impl PageSource for InFlightPages {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let host = host_of(url);
        {
            let mut state = self.state.lock().expect("lock state");
            state.total += 1;
            let count = state.per_host.entry(host.clone()).or_default();
            *count += 1;
            let count = *count;
            state.max_total = state.max_total.max(state.total);
            state.max_per_host = state.max_per_host.max(count);
        }

        tokio::time::sleep(Duration::from_millis(20)).await;

        let mut state = self.state.lock().expect("lock state");
        state.total -= 1;
        if let Some(count) = state.per_host.get_mut(&host) {
            *count -= 1;
        }
        Some(format!("Contact team@{host}"))
    }
}

#[tokio::test]
async fn test_company_and_page_concurrency_are_bounded() {
    let pages = Arc::new(InFlightPages::default());
    let resolver = CompanyResolver::new(pages.clone(), INDEX, DirectoryHost::new("iasme.co.uk"));
    let entries: Vec<_> = (0..8)
        .map(|i| entry_with_site(&format!("Company {i}"), &format!("https://company{i}.test")))
        .collect();

    let records = EnrichmentOrchestrator::new(Arc::new(resolver))
        .with_concurrency(3)
        .run(entries)
        .await;

    assert_eq!(records.len(), 8);
    let (max_total, max_per_host) = pages.peaks();
    assert!(max_total <= 3 * 2, "{max_total} requests in flight across companies");
    assert_eq!(max_per_host, 2);
    assert!(records.iter().all(|r| r.emails.len() == 1));
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock logs").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_company_is_logged_as_error() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let records = orchestrator(CannedPages::default(), 1)
        .run(vec![DirectoryEntry::new("  ")])
        .await;

    assert!(records.is_empty());
    let output = String::from_utf8(logs.0.lock().expect("lock logs").clone()).expect("utf-8 logs");
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("company_processing_failed"), "{output}");
}
