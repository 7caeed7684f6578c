//! Integration tests for the ServiceClient using mockito for HTTP mocking.

use mockito::Server;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use w3protocol_probe::client::{INVOCATION_CONTENT_TYPE, RECEIPT_CONTENT_TYPE};
use w3protocol_probe::{
    AsyncServiceClient, AsyncServiceClientImpl, ServiceClient, ServiceEndpoint, ServiceError,
};

fn client_for(url: String) -> ServiceClient {
    ServiceClient::with_timeout(ServiceEndpoint::new("did:web:test.web3.storage", url), 5)
}

/// Accept one connection, read the request, write `reply` verbatim and keep
/// the socket open for `hold` before closing it.
fn serve_raw_once(reply: &'static [u8], hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(reply);
            let _ = stream.flush();
            thread::sleep(hold);
        }
    });
    format!("http://{}", addr)
}

#[test]
fn test_post_invocation() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/")
        .match_header("content-type", INVOCATION_CONTENT_TYPE)
        .match_header("accept", RECEIPT_CONTENT_TYPE)
        .match_body("encoded-invocation")
        .with_status(200)
        .with_header("content-type", RECEIPT_CONTENT_TYPE)
        .with_body([0xa1u8, 0x61, 0x6f, 0xf5])
        .create();

    let client = client_for(server.url());
    let receipts = client.post_invocation(b"encoded-invocation").unwrap();

    mock.assert();
    assert_eq!(receipts, vec![0xa1, 0x61, 0x6f, 0xf5]);
    assert_eq!(client.metrics().invocations_sent_total(), 1);
    assert_eq!(client.metrics().bytes_sent_total(), 18);
    assert_eq!(client.metrics().http_errors_total(), 0);
}

#[test]
fn test_post_invocation_server_error() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("HandlerExecutionError")
        .create();

    let client = client_for(server.url());
    let result = client.post_invocation(b"x");

    mock.assert();
    match result {
        Err(ServiceError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "HandlerExecutionError");
        }
        other => panic!("Expected Status error, got: {:?}", other),
    }
    assert_eq!(client.metrics().http_errors_total(), 1);
    assert_eq!(client.metrics().invocations_sent_total(), 0);
}

#[test]
fn test_post_invocation_unauthorized() {
    let mut server = Server::new();

    let mock = server.mock("POST", "/").with_status(401).create();

    let client = client_for(server.url());
    let result = client.post_invocation(b"x");

    mock.assert();
    assert!(matches!(result, Err(ServiceError::Unauthorized)));
}

#[test]
fn test_probe_parses_version() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"access-api","version":"5.0.0","did":"did:web:test.web3.storage"}"#)
        .create();

    let client = client_for(server.url());
    let report = client.probe().unwrap();

    mock.assert();
    assert_eq!(report.status, 200);
    assert_eq!(report.endpoint.audience, "did:web:test.web3.storage");
    let version = report.version.expect("version body should be JSON");
    assert_eq!(version["version"], "5.0.0");
    assert_eq!(client.metrics().http_requests_total(), 1);
}

#[test]
fn test_probe_plain_text_body() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/version")
        .with_status(200)
        .with_body("ok")
        .create();

    let client = client_for(server.url());
    let report = client.probe().unwrap();

    mock.assert();
    assert!(report.version.is_none());
    assert_eq!(report.body, "ok");
}

#[test]
fn test_probe_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/version")
        .with_status(404)
        .with_body("no such route")
        .create();

    let client = client_for(server.url());
    let result = client.probe();

    mock.assert();
    match result {
        Err(ServiceError::NotFound(message)) => assert_eq!(message, "no such route"),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[test]
fn test_probe_rate_limited() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/version").with_status(429).create();

    let client = client_for(server.url());
    assert!(matches!(client.probe(), Err(ServiceError::RateLimited)));
}

#[test]
fn test_connection_refused() {
    let client = client_for("http://127.0.0.1:1".to_string());
    let result = client.probe();
    assert!(matches!(result, Err(ServiceError::Http(_))), "got {:?}", result);
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_stalled_response_is_timeout() {
    let url = serve_raw_once(b"", Duration::from_secs(4));
    let client =
        ServiceClient::with_timeout(ServiceEndpoint::new("did:web:test.web3.storage", url), 1);

    let result = client.probe();
    assert!(matches!(result, Err(ServiceError::Timeout)), "got {:?}", result);
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_closed_without_response_is_not_timeout() {
    let url = serve_raw_once(b"", Duration::ZERO);
    let client = client_for(url);

    let result = client.probe();
    assert!(matches!(result, Err(ServiceError::Http(_))), "got {:?}", result);
}

#[test]
fn test_truncated_version_body_counts_as_error() {
    let url = serve_raw_once(
        b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
        Duration::ZERO,
    );
    let client = client_for(url);

    let result = client.probe();
    assert!(matches!(result, Err(ServiceError::Http(_))), "got {:?}", result);

    let summary = client.metrics().summary();
    assert_eq!(summary.http_requests_total, 1);
    assert_eq!(summary.http_errors_total, 1);
}

#[tokio::test]
async fn test_async_post_and_probe() {
    let mut server = Server::new_async().await;

    let post = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("receipts")
        .create_async()
        .await;
    let version = server
        .mock("GET", "/version")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = AsyncServiceClientImpl::new(client_for(server.url()));
    let receipts = client.post_invocation(b"batch".to_vec()).await.unwrap();
    let report = client.probe().await.unwrap();

    post.assert_async().await;
    version.assert_async().await;
    assert_eq!(receipts, b"receipts".to_vec());
    assert_eq!(report.status, 200);
    assert_eq!(client.inner().metrics().http_requests_total(), 2);

    let summary = client.metrics().summary();
    assert_eq!(summary.invocations_sent_total, 1);
    assert_eq!(summary.bytes_sent_total, 5);
    assert_eq!(summary.http_errors_total, 0);
}
