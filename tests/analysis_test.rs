//! Analysis boundary: summary, prompt, fallbacks and the Gemini client.

mod common;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use chainwatch::analysis::{
    ChainSummary, EMPTY_MESSAGE, FAILURE_MESSAGE, GeminiClient, MISSING_KEY_MESSAGE,
    NO_DATA_MESSAGE, TextCompletion, analyze_chain, build_prompt,
};
use chainwatch::config::GeminiConfig;
use chainwatch::tls::build_tls_config;
use chainwatch::{ChainError, Result};

/// Canned completion backend that records what it was asked.
struct MockCompletion {
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    reply: fn() -> Result<String>,
}

impl MockCompletion {
    fn new(reply: fn() -> Result<String>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            reply,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextCompletion for MockCompletion {
    async fn complete(&self, _api_key: &str, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        (self.reply)()
    }
}

#[test]
fn test_summary_of_fixture() {
    let summary = ChainSummary::from_chain(&common::fixture_chain()).unwrap();

    assert_eq!(summary.spot, dec!(21412.8));
    assert_eq!(summary.atm_strike, dec!(21400));
    assert_eq!(summary.atm_ce_price, dec!(212.35));
    assert_eq!(summary.atm_pe_price, dec!(198));
    assert_eq!(summary.atm_ce_iv, 14.6);
    assert_eq!(summary.max_ce_oi_strike, dec!(21450));
    assert_eq!(summary.max_pe_oi_strike, dec!(21400));
    assert_eq!(summary.pcr_label(), "0.92");

    let prompt = build_prompt(&summary);
    assert!(prompt.contains("Symbol: FINNIFTY"));
    assert!(prompt.contains("PCR (Put Call Ratio): 0.92"));
    assert!(prompt.contains("ATM Strike: 21400"));
    assert!(prompt.contains("Max CE OI Strike: 21450"));
    assert!(prompt.contains("Markdown"));
}

#[test]
fn test_pcr_without_call_open_interest() {
    let mut chain = common::fixture_chain();
    for row in &mut chain.rows {
        row.ce.open_interest = 0;
    }
    let summary = ChainSummary::from_chain(&chain).unwrap();
    assert_eq!(summary.pcr, None);
    assert!(build_prompt(&summary).contains("PCR (Put Call Ratio): N/A"));
}

#[tokio::test]
async fn test_empty_key_never_calls_service() {
    let service = MockCompletion::new(|| Ok("unused".into()));
    let chain = common::fixture_chain();

    assert_eq!(analyze_chain(&chain, "", &service).await, MISSING_KEY_MESSAGE);
    assert_eq!(analyze_chain(&chain, "   ", &service).await, MISSING_KEY_MESSAGE);
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_successful_analysis_passes_prompt() {
    let service = MockCompletion::new(|| Ok("## Neutral\nSupport at 21400.".into()));
    let chain = common::fixture_chain();

    let text = analyze_chain(&chain, "key", &service).await;
    assert_eq!(text, "## Neutral\nSupport at 21400.");
    assert_eq!(service.calls(), 1);
    let prompt = service.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Current Spot Price: 21412.8"));
}

#[tokio::test]
async fn test_failures_become_fallback_text() {
    let chain = common::fixture_chain();

    let failing = MockCompletion::new(|| Err(ChainError::Analysis("quota exceeded".into())));
    assert_eq!(analyze_chain(&chain, "key", &failing).await, FAILURE_MESSAGE);

    let empty = MockCompletion::new(|| Ok("  \n".into()));
    assert_eq!(analyze_chain(&chain, "key", &empty).await, EMPTY_MESSAGE);
}

#[tokio::test]
async fn test_empty_chain_is_not_sent() {
    let service = MockCompletion::new(|| Ok("unused".into()));
    let mut chain = common::fixture_chain();
    chain.rows.clear();

    assert_eq!(analyze_chain(&chain, "key", &service).await, NO_DATA_MESSAGE);
    assert_eq!(service.calls(), 0);
}

fn gemini_config(api_url: String) -> GeminiConfig {
    GeminiConfig {
        api_url,
        model: "gemini-test".to_string(),
        api_key: None,
        timeout: Duration::from_secs(5),
    }
}

/// Accepts one connection, captures the request head and answers `status`
/// with `body`.
async fn serve_once(listener: TcpListener, status: &'static str, body: &'static str) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        request.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&request);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let length = text[..head_end]
                .lines()
                .find_map(|l| {
                    l.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap())
                })
                .unwrap_or(0);
            if request.len() >= head_end + 4 + length || n == 0 {
                break;
            }
        }
        if n == 0 {
            break;
        }
    }

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    String::from_utf8_lossy(&request).into_owned()
}

#[tokio::test]
async fn test_gemini_client_posts_generate_content() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_once(
        listener,
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"Bearish tilt."}]}}]}"#,
    ));

    let client = GeminiClient::new(
        &gemini_config(format!("http://{addr}/v1beta/")),
        build_tls_config(None).unwrap(),
    )
    .unwrap();
    let text = client.complete("test-key", "hello").await.unwrap();
    assert_eq!(text, "Bearish tilt.");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent"));
    assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(request.contains(r#""text":"hello""#));
}

#[tokio::test]
async fn test_gemini_error_status_falls_back() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_once(
        listener,
        "403 Forbidden",
        r#"{"error":{"code":403,"message":"API key not valid"}}"#,
    ));

    let client = GeminiClient::new(
        &gemini_config(format!("http://{addr}/v1beta")),
        build_tls_config(None).unwrap(),
    )
    .unwrap();
    let text = analyze_chain(&common::fixture_chain(), "bad-key", &client).await;
    assert_eq!(text, FAILURE_MESSAGE);
    server.await.unwrap();
}
