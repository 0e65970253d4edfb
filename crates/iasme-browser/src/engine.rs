use crate::actions::{is_json_content_type, BrowserActions, CapturedResponse};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFinished, EventResponseReceived, GetResponseBodyParams, RequestId, Response,
};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Interval between selector polls.
const SELECTOR_POLL_MS: u64 = 250;

/// JSON responses whose headers arrived but whose body is still loading.
type PendingResponses = Arc<Mutex<HashMap<String, (String, String)>>>;

/// Browser automation engine
pub struct BrowserEngine {
    browser: Mutex<Browser>,
    page: Page,
    captured: Arc<Mutex<Vec<CapturedResponse>>>,
    tasks: Vec<JoinHandle<()>>,
}

impl BrowserEngine {
    /// Launch a browser with a randomized fingerprint.
    pub async fn launch(headless: bool) -> Result<Self> {
        Self::with_fingerprint(FingerprintConfig::randomized(), headless).await
    }

    /// Launch a browser with a specific fingerprint and open a capturing page.
    pub async fn with_fingerprint(fingerprint: FingerprintConfig, headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .args(fingerprint.launch_args());
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let captured = Arc::new(Mutex::new(Vec::new()));
        let mut tasks = Self::spawn_capture(&page, captured.clone()).await?;
        tasks.push(handler_task);

        tracing::info!(
            headless,
            user_agent = %fingerprint.user_agent,
            "Browser launched"
        );

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            captured,
            tasks,
        })
    }

    /// Record JSON responses as they finish loading.
    ///
    /// Response bodies are only retrievable once loading has finished, so
    /// headers and completion are tracked by two listeners sharing a pending map.
    async fn spawn_capture(
        page: &Page,
        captured: Arc<Mutex<Vec<CapturedResponse>>>,
    ) -> Result<Vec<JoinHandle<()>>> {
        let mut received = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| BrowserError::Capture(e.to_string()))?;
        let mut finished = page
            .event_listener::<EventLoadingFinished>()
            .await
            .map_err(|e| BrowserError::Capture(e.to_string()))?;

        let pending: PendingResponses = Arc::new(Mutex::new(HashMap::new()));

        let pending_received = pending.clone();
        let headers_task = tokio::spawn(async move {
            while let Some(event) = received.next().await {
                let content_type = response_content_type(&event.response);
                if is_json_content_type(&content_type) {
                    pending_received.lock().await.insert(
                        event.request_id.inner().clone(),
                        (event.response.url.clone(), content_type),
                    );
                }
            }
        });

        let body_page = page.clone();
        let body_task = tokio::spawn(async move {
            while let Some(event) = finished.next().await {
                let request_id = event.request_id.inner().clone();
                let Some((url, content_type)) = pending.lock().await.remove(&request_id) else {
                    continue;
                };

                let params = GetResponseBodyParams::new(RequestId::new(request_id));
                let body = match body_page.execute(params).await {
                    Ok(response) => response.result,
                    Err(e) => {
                        tracing::debug!(url = %url, error = %e, "json_feed_capture_failed");
                        continue;
                    }
                };
                if body.base64_encoded {
                    tracing::debug!(url = %url, "Skipping base64-encoded JSON body");
                    continue;
                }

                match serde_json::from_str(&body.body) {
                    Ok(parsed) => captured.lock().await.push(CapturedResponse {
                        url,
                        content_type,
                        body: parsed,
                    }),
                    Err(e) => tracing::debug!(url = %url, error = %e, "json_feed_capture_failed"),
                }
            }
        });

        Ok(vec![headers_task, body_task])
    }

    /// Close the browser and stop background tasks.
    pub async fn close(self) -> Result<()> {
        let mut browser = self.browser.into_inner();
        browser
            .close()
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        for task in self.tasks {
            task.abort();
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<bool> {
        let poll = async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
            }
        };

        match tokio::time::timeout(Duration::from_millis(timeout_ms), poll).await {
            Ok(()) => Ok(true),
            Err(_) => {
                tracing::debug!(selector, timeout_ms, "Selector wait timed out");
                Ok(false)
            }
        }
    }

    async fn query_texts(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::Query {
                selector: selector.to_string(),
                reason: e.to_string(),
            })?;

        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            if let Ok(Some(text)) = element.inner_text().await {
                let text = text.trim();
                if !text.is_empty() {
                    texts.push(text.to_string());
                }
            }
        }
        Ok(texts)
    }

    async fn click_text(&self, label: &str) -> Result<bool> {
        let label_literal =
            serde_json::to_string(label).map_err(|e| BrowserError::Evaluation(e.to_string()))?;
        let script = format!(
            r#"(() => {{
                const label = {label_literal};
                const nodes = Array.from(document.querySelectorAll(
                    'a, button, li, span, label, option, [role="button"], [data-letter], [data-certification]'
                ));
                const text = (n) => (n.textContent || '').trim();
                const hit = nodes.find((n) => text(n) === label)
                    || nodes.find((n) => text(n).includes(label));
                if (!hit) {{ return false; }}
                try {{ hit.click(); return true; }} catch (e) {{ return false; }}
            }})()"#
        );

        let clicked = match self.page.evaluate(script).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            Err(e) => {
                tracing::debug!(label, error = %e, "filter_click_failed");
                false
            }
        };
        Ok(clicked)
    }

    async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    async fn captured_json(&self) -> Vec<CapturedResponse> {
        self.captured.lock().await.clone()
    }
}

/// Content type from the response's MIME type, falling back to its headers.
fn response_content_type(response: &Response) -> String {
    if !response.mime_type.is_empty() {
        return response.mime_type.clone();
    }

    response
        .headers
        .inner()
        .as_object()
        .and_then(|headers| {
            headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        })
        .and_then(|(_, value)| value.as_str())
        .unwrap_or_default()
        .to_string()
}
