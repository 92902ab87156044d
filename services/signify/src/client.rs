// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use httpsig_cesr_core::hash::{content_digest, DigestAlgorithm, CONTENT_DIGEST};
use httpsig_cesr_core::{Context, Error, Result, SigningRequest};
use log::debug;
use serde::Serialize;

use crate::constants::*;
use crate::{Config, RequestSigner};

/// SignedClient builds, signs and sends requests on behalf of one key.
///
/// Every request carries `content-digest` and `signify-resource` before it is
/// signed, so both can be covered by the signature. A request that fails to
/// sign is never sent.
#[derive(Debug)]
pub struct SignedClient {
    ctx: Context,
    signer: RequestSigner,
    digest_algorithm: DigestAlgorithm,
    digest_url_safe: bool,
}

impl SignedClient {
    /// Create a new client using `sha-256` digests with standard base64.
    pub fn new(ctx: Context, signer: RequestSigner) -> Self {
        Self {
            ctx,
            signer,
            digest_algorithm: DigestAlgorithm::default(),
            digest_url_safe: false,
        }
    }

    /// Create a client from config.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let signer = RequestSigner::new(config.key_pair()?, config.signature_fields()?);
        Ok(Self::new(ctx, signer).with_digest(
            config.digest_algorithm()?,
            config.digest_url_safe()?,
        ))
    }

    /// Set the digest algorithm and encoding of `content-digest`.
    pub fn with_digest(mut self, algorithm: DigestAlgorithm, url_safe_no_pad: bool) -> Self {
        self.digest_algorithm = algorithm;
        self.digest_url_safe = url_safe_no_pad;
        self
    }

    /// The signer used by this client.
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Build a signed request with a JSON body.
    pub fn sign_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        uri: &str,
        body: &T,
    ) -> Result<http::Request<Bytes>> {
        let body = serde_json::to_vec(body)
            .map_err(|e| Error::body_serialization("failed to serialize body").with_source(e))?;
        self.sign_request(
            method,
            uri,
            Bytes::from(body),
            Some(HeaderValue::from_static(CONTENT_TYPE_JSON)),
        )
    }

    /// Build a signed request with a raw body.
    ///
    /// No `content-type` is attached, the digest still covers the body even
    /// if it is empty.
    pub fn sign_bytes(
        &self,
        method: Method,
        uri: &str,
        body: impl Into<Bytes>,
    ) -> Result<http::Request<Bytes>> {
        self.sign_request(method, uri, body.into(), None)
    }

    /// Sign a JSON request and send it.
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        uri: &str,
        body: &T,
    ) -> Result<http::Response<Bytes>> {
        let req = self.sign_json(method, uri, body)?;
        self.send(req).await
    }

    /// Sign a request with raw body and send it.
    pub async fn send_bytes(
        &self,
        method: Method,
        uri: &str,
        body: impl Into<Bytes>,
    ) -> Result<http::Response<Bytes>> {
        let req = self.sign_bytes(method, uri, body)?;
        self.send(req).await
    }

    fn sign_request(
        &self,
        method: Method,
        uri: &str,
        body: Bytes,
        content_type: Option<HeaderValue>,
    ) -> Result<http::Request<Bytes>> {
        let (mut parts, ()) = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(())?
            .into_parts();

        let mut req = SigningRequest::build(&mut parts)?;
        req.headers.insert(
            CONTENT_DIGEST,
            HeaderValue::from_str(&content_digest(
                self.digest_algorithm,
                &body,
                self.digest_url_safe,
            ))?,
        );
        if let Some(v) = content_type {
            req.headers.insert(CONTENT_TYPE, v);
        }
        req.headers
            .insert(SIGNIFY_RESOURCE, HeaderValue::from_str(self.signer.key_id())?);

        debug!(
            "signing request {} {} with fields {:?}",
            req.method,
            req.path,
            self.signer.fields()
        );
        self.signer.sign(&mut req)?;
        req.apply(&mut parts)?;

        Ok(http::Request::from_parts(parts, body))
    }

    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let method = req.method().clone();
        let uri = req.uri().clone();

        let resp = self.ctx.http_send(req).await.map_err(|e| {
            Error::transport(format!("failed to send {method} {uri}")).with_source(e)
        })?;

        debug!("{method} {uri} responded with {}", resp.status());
        Ok(resp)
    }
}
