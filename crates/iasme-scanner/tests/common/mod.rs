use async_trait::async_trait;
use iasme_fetch::PageSource;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages and records every URL requested.
#[derive(Default)]
pub struct CannedPages {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl CannedPages {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("lock requested").clone()
    }
}

#[async_trait]
impl PageSource for CannedPages {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        self.requested
            .lock()
            .expect("lock requested")
            .push(url.to_string());
        self.pages.get(url).cloned()
    }
}
