//! Integration tests for the reqwest transport against a local HTTP server.
//!
//! Each test spawns a one-shot server on 127.0.0.1 that captures the request
//! and streams a canned response back in several chunks.

use std::collections::HashMap;
use std::time::Duration;

use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha512;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use coinpayments::prelude::*;

const PUBLIC_KEY: &str = "public-key";
const PRIVATE_KEY: &str = "private-key";

/// What the server saw.
struct CapturedRequest {
    request_line: String,
    headers: HashMap<String, String>,
    body: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn no_proxy_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn client_with_agent(agent: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .user_agent(agent)
        .build()
        .unwrap()
}

fn client_for(url: &str) -> CoinpaymentsClient {
    CoinpaymentsClient::builder(Credentials::new(PUBLIC_KEY, PRIVATE_KEY))
        .api_url(url)
        .http_client(no_proxy_client())
        .build()
        .unwrap()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut tmp).await.unwrap();
        assert!(n > 0, "client closed the connection before sending headers");
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8(buf[..header_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .map(|v| v.parse().unwrap())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut tmp).await.unwrap();
        assert!(n > 0, "client closed the connection mid-body");
        buf.extend_from_slice(&tmp[..n]);
    }

    CapturedRequest {
        request_line,
        headers,
        body: String::from_utf8(buf[header_end..header_end + content_length].to_vec()).unwrap(),
    }
}

/// Serve one request, answering with `status` and a chunked body.
async fn spawn_server(
    status: &'static str,
    chunks: Vec<&'static str>,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut socket).await;

        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
            status
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        for chunk in chunks {
            let frame = format!("{:x}\r\n{}\r\n", chunk.len(), chunk);
            socket.write_all(frame.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        socket.write_all(b"0\r\n\r\n").await.unwrap();
        let _ = socket.shutdown().await;

        captured
    });

    (format!("http://{}/api.php", addr), handle)
}

#[tokio::test]
async fn test_sends_signed_form_body() {
    init_tracing();
    let (url, server) = spawn_server(
        "200 OK",
        vec![r#"{"error":"ok","#, r#""result":{"x":"#, "1}}"],
    )
    .await;
    let client = client_for(&url);

    let request = CoinpaymentsRequest::new("rates").with("short", 1i64);
    let result: Value = client.call(&request).await.unwrap();
    assert_eq!(result, json!({ "x": 1 }));

    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "POST /api.php HTTP/1.1");
    assert_eq!(
        captured.body,
        "cmd=rates&short=1&version=1&format=json&key=public-key"
    );
    assert_eq!(
        captured.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );

    let mut mac = Hmac::<Sha512>::new_from_slice(PRIVATE_KEY.as_bytes()).unwrap();
    mac.update(captured.body.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());
    assert_eq!(captured.headers.get("hmac"), Some(&expected));
}

#[tokio::test]
async fn test_chunked_non_json_body() {
    init_tracing();
    let (url, server) = spawn_server("200 OK", vec!["not-", "json"]).await;
    let client = client_for(&url);

    let err = client
        .call::<Value>(&CoinpaymentsRequest::new("rates"))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Invalid response");
    assert_eq!(err.context(), Some(ErrorContext::Raw("not-json".to_string())));
    server.await.unwrap();
}

#[tokio::test]
async fn test_error_status_body_is_still_interpreted() {
    init_tracing();
    let (url, server) = spawn_server(
        "500 Internal Server Error",
        vec![r#"{"error":"ERROR: Invalid API Key"}"#],
    )
    .await;
    let client = client_for(&url);

    let err = client.get_basic_info().await.unwrap_err();
    assert!(err.is_api_error());
    assert_eq!(err.message(), "ERROR: Invalid API Key");
    server.await.unwrap();
}

#[tokio::test]
async fn test_credentials_client_takes_precedence() {
    init_tracing();
    let (url, server) = spawn_server("200 OK", vec![r#"{"error":"ok","result":[]}"#]).await;

    let client = CoinpaymentsClient::builder(
        Credentials::new(PUBLIC_KEY, PRIVATE_KEY).with_client(client_with_agent("reused-handle")),
    )
    .api_url(url)
    .http_client(client_with_agent("transport-default"))
    .build()
    .unwrap();

    let ids = client.get_tx_ids(TxIdsParams::new()).await.unwrap();
    assert!(ids.is_empty());

    let captured = server.await.unwrap();
    assert_eq!(
        captured.headers.get("user-agent").map(String::as_str),
        Some("reused-handle")
    );
}

#[tokio::test]
async fn test_transport_client_without_handle() {
    init_tracing();
    let (url, server) = spawn_server("200 OK", vec![r#"{"error":"ok","result":[]}"#]).await;

    let client = CoinpaymentsClient::builder(Credentials::new(PUBLIC_KEY, PRIVATE_KEY))
        .api_url(url)
        .http_client(client_with_agent("transport-default"))
        .build()
        .unwrap();

    client.get_tx_ids(TxIdsParams::new()).await.unwrap();

    let captured = server.await.unwrap();
    assert_eq!(
        captured.headers.get("user-agent").map(String::as_str),
        Some("transport-default")
    );
}

#[tokio::test]
async fn test_connection_refused_is_passed_through() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/api.php", addr));
    let err = client
        .call::<Value>(&CoinpaymentsRequest::new("rates"))
        .await
        .unwrap_err();

    match &err {
        CoinpaymentsError::Transport(inner) => {
            assert!(inner.is_connect());
            assert_eq!(err.to_string(), inner.to_string());
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_applies_to_custom_client() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        // never answer
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let client = CoinpaymentsClient::builder(Credentials::new(PUBLIC_KEY, PRIVATE_KEY))
        .api_url(format!("http://{}/api.php", addr))
        .http_client(no_proxy_client())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client
        .call::<Value>(&CoinpaymentsRequest::new("rates"))
        .await
        .unwrap_err();

    match err {
        CoinpaymentsError::Transport(inner) => assert!(inner.is_timeout()),
        other => panic!("expected transport timeout, got {:?}", other),
    }
    server.abort();
}
