use crate::{init_logger, parse_signature_headers, signer, signing_key, verify, FIELDS};
use anyhow::Result;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use http::{HeaderValue, Method};
use httpsig_cesr_core::hash::{content_digest, DigestAlgorithm};
use httpsig_cesr_core::time::DateTime;
use httpsig_cesr_core::{Context, SigningRequest};
use httpsig_cesr_signify::SignedClient;
use pretty_assertions::assert_eq;

fn client() -> SignedClient {
    SignedClient::new(Context::new(), signer(FIELDS))
}

fn test_time() -> DateTime {
    Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
}

/// Sign a request for `POST https://example.com/api/items` at a fixed time.
fn sign_at(body: &[u8], time: DateTime) -> Result<http::Request<Bytes>> {
    let signer = signer(FIELDS);
    let (mut parts, ()) = http::Request::builder()
        .method(Method::POST)
        .uri("https://example.com/api/items")
        .header(
            "content-digest",
            content_digest(DigestAlgorithm::Sha256, body, false),
        )
        .header("signify-resource", signer.key_id())
        .body(())?
        .into_parts();

    let mut req = SigningRequest::build(&mut parts)?;
    signer.sign_at(&mut req, time)?;
    req.apply(&mut parts)?;
    Ok(http::Request::from_parts(parts, Bytes::copy_from_slice(body)))
}

#[test]
fn test_end_to_end_signature_verifies() -> Result<()> {
    init_logger();

    let client = client();
    let req = client.sign_json(
        Method::POST,
        "https://example.com/api/items",
        &serde_json::json!({"a": 1}),
    )?;

    assert_eq!(req.body().as_ref(), b"{\"a\":1}");
    let received = parse_signature_headers(&req);
    assert_eq!(received.fields, FIELDS);
    assert_eq!(received.keyid, client.signer().key_id());
    assert_eq!(received.keyid, req.headers()["signify-resource"]);
    assert_eq!(received.signature.len(), 64);
    assert!(received.params.ends_with(";alg=\"ed25519\""));

    assert!(verify(&req, &signing_key().verifying_key()));
    Ok(())
}

#[test]
fn test_tampered_request_fails_verification() -> Result<()> {
    let key = signing_key().verifying_key();
    let headers = ["content-digest", "origin-date", "signify-resource"];

    for name in headers {
        let mut req = sign_at(b"{\"a\":1}", test_time())?;
        assert!(verify(&req, &key));

        req.headers_mut()
            .insert(name, HeaderValue::from_static("tampered"));
        assert!(!verify(&req, &key), "tampering {name} must be detected");
    }

    let mut req = sign_at(b"{\"a\":1}", test_time())?;
    *req.method_mut() = Method::PUT;
    assert!(!verify(&req, &key));

    let mut req = sign_at(b"{\"a\":1}", test_time())?;
    *req.uri_mut() = "https://example.com/api/other".parse()?;
    assert!(!verify(&req, &key));
    Ok(())
}

#[test]
fn test_signature_changes_iff_input_changes() -> Result<()> {
    let a = sign_at(b"{\"a\":1}", test_time())?;
    let b = sign_at(b"{\"a\":1}", test_time())?;
    assert_eq!(a.headers()["signature"], b.headers()["signature"]);
    assert_eq!(a.headers()["signature-input"], b.headers()["signature-input"]);

    let body_changed = sign_at(b"{\"a\":2}", test_time())?;
    assert_ne!(a.headers()["signature"], body_changed.headers()["signature"]);

    let time_changed = sign_at(b"{\"a\":1}", test_time() + chrono::TimeDelta::seconds(1))?;
    assert_ne!(a.headers()["signature"], time_changed.headers()["signature"]);
    assert_ne!(
        a.headers()["signature-input"],
        time_changed.headers()["signature-input"]
    );
    Ok(())
}

#[test]
fn test_signing_twice_keeps_structure() -> Result<()> {
    let client = client();
    let first = client.sign_json(Method::POST, "https://example.com/api/items", &1)?;
    let second = client.sign_json(Method::POST, "https://example.com/api/items", &1)?;

    let first = parse_signature_headers(&first);
    let second = parse_signature_headers(&second);
    assert_eq!(first.fields, second.fields);

    let created = |params: &str| -> i64 {
        params
            .split(';')
            .find_map(|v| v.strip_prefix("created="))
            .expect("created must be present")
            .parse()
            .expect("created must be an integer")
    };
    assert!(created(&second.params) >= created(&first.params));
    Ok(())
}

#[test]
fn test_origin_date_format() -> Result<()> {
    let req = sign_at(b"", test_time())?;
    assert_eq!(
        req.headers()["origin-date"],
        "2024-05-06T07:08:09.000000+00:00"
    );
    assert!(req.headers()["signature-input"]
        .to_str()?
        .contains(&format!(";created={};", test_time().timestamp())));
    Ok(())
}

#[test]
fn test_concurrent_signing_with_shared_signer() -> Result<()> {
    let client = client();
    let key = signing_key().verifying_key();

    std::thread::scope(|s| -> Result<()> {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = &client;
                s.spawn(move || {
                    client.sign_json(
                        Method::POST,
                        &format!("https://example.com/api/items/{i}"),
                        &serde_json::json!({ "i": i }),
                    )
                })
            })
            .collect();

        for handle in handles {
            let req = handle.join().expect("thread must not panic")?;
            assert!(verify(&req, &key));
        }
        Ok(())
    })
}
