use iasme_browser::{BrowserActions, BrowserEngine};

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_launch() {
    let engine = BrowserEngine::launch(true).await;
    assert!(engine.is_ok(), "Failed to launch browser engine");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation_and_content() {
    let engine = BrowserEngine::launch(true).await.unwrap();

    engine.navigate("https://example.com").await.unwrap();
    let html = engine.content().await.unwrap();
    assert!(html.contains("Example Domain"));

    let headings = engine.query_texts("h1").await.unwrap();
    assert_eq!(headings, vec!["Example Domain".to_string()]);

    engine.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_missing_selector_is_not_fatal() {
    let engine = BrowserEngine::launch(true).await.unwrap();

    engine.navigate("https://example.com").await.unwrap();
    assert!(!engine.wait_for_selector("table", 500).await.unwrap());
    assert!(!engine.click_text("No Such Filter").await.unwrap());

    engine.close().await.unwrap();
}
