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

//! Hash related utils.

use std::fmt;
use std::str::FromStr;

use base64::prelude::BASE64_STANDARD;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::Digest;
use sha2::Sha256;
use sha2::Sha512;

use crate::Error;

/// Header carrying the body digest.
pub const CONTENT_DIGEST: &str = "content-digest";

/// Digest algorithms supported for the `content-digest` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    /// `sha-256`
    #[default]
    Sha256,
    /// `sha-512`
    Sha512,
}

impl DigestAlgorithm {
    /// Algorithm tag used as the dictionary key of the header value.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha-256",
            DigestAlgorithm::Sha512 => "sha-512",
        }
    }

    fn digest(&self, content: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha256 => Sha256::digest(content).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(content).to_vec(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha-512" => Ok(DigestAlgorithm::Sha512),
            v => Err(Error::digest_computation(format!(
                "unsupported digest algorithm {v}"
            ))),
        }
    }
}

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 url-safe encode without padding
pub fn base64_url_safe_encode(content: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(content)
}

/// Build the `content-digest` header value for the given body.
///
/// ```text
/// sha-256=:X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=:
/// ```
///
/// The hash is standard base64 with padding, or url-safe base64 without
/// padding when `url_safe_no_pad` is set.
pub fn content_digest(algorithm: DigestAlgorithm, body: &[u8], url_safe_no_pad: bool) -> String {
    let hash = algorithm.digest(body);
    let encoded = if url_safe_no_pad {
        base64_url_safe_encode(&hash)
    } else {
        base64_encode(&hash)
    };

    format!("{}=:{}:", algorithm.as_str(), encoded)
}
