use crate::{init_logger, parse_signature_headers, signer, signing_key, verify, FIELDS};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use httpsig_cesr_core::{Context, ErrorKind, HttpSend};
use httpsig_cesr_signify::SignedClient;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// Records every request it receives and answers `201 Created`.
#[derive(Debug, Clone, Default)]
struct RecordingHttpSend {
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl RecordingHttpSend {
    fn requests(&self) -> Vec<http::Request<Bytes>> {
        self.requests.lock().unwrap().drain(..).collect()
    }
}

#[async_trait]
impl HttpSend for RecordingHttpSend {
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
    ) -> httpsig_cesr_core::Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);
        Ok(http::Response::builder()
            .status(StatusCode::CREATED)
            .body(Bytes::from_static(b"{\"id\":1}"))?)
    }
}

fn client(fields: &[&str]) -> (SignedClient, RecordingHttpSend) {
    let http = RecordingHttpSend::default();
    let ctx = Context::new().with_http_send(http.clone());
    (SignedClient::new(ctx, signer(fields)), http)
}

#[tokio::test]
async fn test_send_json_dispatches_signed_request() -> Result<()> {
    init_logger();

    let (client, http) = client(FIELDS);
    let resp = client
        .send_json(
            Method::POST,
            "https://example.com/api/items",
            &serde_json::json!({"a": 1}),
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.body().as_ref(), b"{\"id\":1}");

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method(), &Method::POST);
    assert_eq!(req.uri(), "https://example.com/api/items");
    assert_eq!(req.headers()["content-type"], "application/json");
    assert_eq!(parse_signature_headers(req).fields, FIELDS);
    assert!(verify(req, &signing_key().verifying_key()));
    Ok(())
}

#[tokio::test]
async fn test_send_bytes_dispatches_signed_request() -> Result<()> {
    let (client, http) = client(&["@method", "@path", "@query", "content-digest"]);
    client
        .send_bytes(Method::GET, "https://example.com/api/items?page=2", "")
        .await?;

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body().is_empty());
    assert!(verify(&requests[0], &signing_key().verifying_key()));
    Ok(())
}

#[tokio::test]
async fn test_signing_failure_is_never_dispatched() {
    let (client, http) = client(&["@method", "@not-a-field"]);
    let err = client
        .send_json(Method::POST, "https://example.com/api/items", &[1, 2])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnknownDerivedField);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_missing_headers_sign_as_empty() -> Result<()> {
    let (client, http) = client(&["@method", "x-not-present", "content-digest"]);
    client
        .send_json(Method::PUT, "https://example.com/api/items/1", &())
        .await?;

    let requests = http.requests();
    assert!(!requests[0].headers().contains_key("x-not-present"));
    assert!(verify(&requests[0], &signing_key().verifying_key()));
    Ok(())
}
