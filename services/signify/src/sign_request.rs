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

use http::request::Parts;
use http::HeaderValue;
use httpsig_cesr_core::cesr::{self, Code};
use httpsig_cesr_core::time::{format_origin_date, now, unix_timestamp, DateTime};
use httpsig_cesr_core::{Result, SigningRequest};

use crate::constants::*;
use crate::{KeyPair, SignatureFields, SignatureParams};

/// RequestSigner signs requests with HTTP Message Signatures.
///
/// It owns the key pair and the field list and never changes them after
/// construction, so one signer can sign many requests concurrently.
///
/// Signing attaches three headers:
///
/// ```text
/// origin-date: 2024-01-02T03:04:05.000006+00:00
/// signature-input: signify=("@method" "@path");created=1704164645;keyid="D...";alg="ed25519"
/// signature: indexed="?0";signify="0B..."
/// ```
#[derive(Debug)]
pub struct RequestSigner {
    key: KeyPair,
    fields: SignatureFields,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new(key: KeyPair, fields: SignatureFields) -> Self {
        Self { key, fields }
    }

    /// Key id of the signing key.
    pub fn key_id(&self) -> &str {
        self.key.key_id()
    }

    /// Fields covered by signatures of this signer.
    pub fn fields(&self) -> &SignatureFields {
        &self.fields
    }

    /// Fresh signature params created now.
    pub fn params(&self) -> SignatureParams<'_> {
        self.params_at(now())
    }

    /// Signature params created at given time.
    pub fn params_at(&self, created: DateTime) -> SignatureParams<'_> {
        SignatureParams::new(&self.fields, self.key.key_id(), unix_timestamp(created))
    }

    /// Sign the request now.
    pub fn sign(&self, req: &mut SigningRequest) -> Result<()> {
        self.sign_at(req, now())
    }

    /// Sign the request as if the current time were `now`.
    ///
    /// Signing happens in two phases:
    ///
    /// 1. Attach headers produced by signing itself (`origin-date`), because
    ///    the field list may cover them.
    /// 2. Build the signature base, sign it and attach `signature-input` and
    ///    `signature`.
    ///
    /// If phase 2 fails, `origin-date` is restored to its previous state and
    /// no signature header is attached.
    pub fn sign_at(&self, req: &mut SigningRequest, now: DateTime) -> Result<()> {
        let origin_date = HeaderValue::from_str(&format_origin_date(now))?;
        let previous = req.headers.insert(ORIGIN_DATE, origin_date);

        match self.signature_headers(req, now) {
            Ok((signature_input, signature)) => {
                req.headers.insert(SIGNATURE_INPUT, signature_input);
                req.headers.insert(SIGNATURE, signature);
                Ok(())
            }
            Err(err) => {
                match previous {
                    Some(v) => req.headers.insert(ORIGIN_DATE, v),
                    None => req.headers.remove(ORIGIN_DATE),
                };
                Err(err)
            }
        }
    }

    /// Sign the request parts now.
    pub fn sign_parts(&self, parts: &mut Parts) -> Result<()> {
        let mut req = SigningRequest::build(parts)?;
        let signed = self.sign(&mut req);
        // Headers are moved out by build, always put them back.
        req.apply(parts)?;
        signed
    }

    fn signature_headers(
        &self,
        req: &SigningRequest,
        now: DateTime,
    ) -> Result<(HeaderValue, HeaderValue)> {
        let params = self.params_at(now);
        let base = params.signature_base(req)?;

        let signature = self.key.sign(base.as_bytes());
        let signature = cesr::encode(&signature, Code::Ed25519Sig)?;

        let signature_input =
            HeaderValue::from_str(&format!("{SIGNATURE_LABEL}={}", params.trailer()))?;
        let signature = HeaderValue::from_str(&format!(
            "indexed=\"?0\";{SIGNATURE_LABEL}=\"{signature}\""
        ))?;
        Ok((signature_input, signature))
    }
}
