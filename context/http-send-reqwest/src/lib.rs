//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! ```no_run
//! use httpsig_cesr_core::Context;
//! use httpsig_cesr_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use httpsig_cesr_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// ReqwestHttpSend sends signed requests with a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request for reqwest").with_source(e)
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpsig_cesr_core::{Context, ErrorKind};

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());

        // Port 9 (discard) on localhost is closed in test environments.
        let req = http::Request::builder()
            .method("POST")
            .uri("http://127.0.0.1:9/api/items")
            .body(Bytes::from_static(b"{}"))
            .expect("request must be valid");

        let err = ctx.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.is_signing_error());
    }
}
