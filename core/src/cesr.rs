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

//! CESR text encoding for fixed size primitives.
//!
//! A primitive is rendered as its derivation code followed by the url-safe
//! base64 (no padding) of the raw bytes, prefixed with as many zero bytes as
//! needed to align the raw size to 3 bytes. The code replaces the leading
//! characters produced by those zero bytes, so the qb64 text is always a
//! multiple of 4 characters.
//!
//! Only one and two character codes are supported.
//!
//! ## Reference
//!
//! - [Composable Event Streaming Representation](https://trustoverip.github.io/tswg-cesr-specification/)

use std::fmt;
use std::str::FromStr;

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;

use crate::{Error, Result};

/// Derivation codes known by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    /// `A`: Ed25519 256 bit random seed for private key.
    Ed25519Seed,
    /// `B`: Ed25519 non-transferable prefix public verification key.
    Ed25519N,
    /// `D`: Ed25519 public verification key.
    Ed25519,
    /// `0B`: Ed25519 signature.
    Ed25519Sig,
}

impl Code {
    /// Text form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Ed25519Seed => "A",
            Code::Ed25519N => "B",
            Code::Ed25519 => "D",
            Code::Ed25519Sig => "0B",
        }
    }

    /// Size of the raw primitive in bytes.
    pub fn raw_size(&self) -> usize {
        match self {
            Code::Ed25519Seed | Code::Ed25519N | Code::Ed25519 => 32,
            Code::Ed25519Sig => 64,
        }
    }

    /// Size of the fully qualified text primitive.
    pub fn qb64_size(&self) -> usize {
        (self.raw_size() + pad_size(self.raw_size())) / 3 * 4
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" => Ok(Code::Ed25519Seed),
            "B" => Ok(Code::Ed25519N),
            "D" => Ok(Code::Ed25519),
            "0B" => Ok(Code::Ed25519Sig),
            v => Err(Error::encoding_invalid(format!("unknown derivation code {v}"))),
        }
    }
}

#[inline]
fn pad_size(raw_size: usize) -> usize {
    (3 - raw_size % 3) % 3
}

/// Encode raw bytes into qb64 text with given code.
pub fn encode(raw: &[u8], code: Code) -> Result<String> {
    if raw.len() != code.raw_size() {
        return Err(Error::encoding_invalid(format!(
            "code {code} expects {} raw bytes, got {}",
            code.raw_size(),
            raw.len()
        )));
    }

    let ps = pad_size(raw.len());
    debug_assert_eq!(ps, code.as_str().len());

    let mut padded = Vec::with_capacity(ps + raw.len());
    padded.resize(ps, 0);
    padded.extend_from_slice(raw);
    let b64 = BASE64_URL_SAFE_NO_PAD.encode(&padded);

    let mut s = String::with_capacity(code.qb64_size());
    s.push_str(code.as_str());
    s.push_str(&b64[ps..]);
    Ok(s)
}

/// Decode qb64 text into its code and raw bytes.
pub fn decode(qb64: &str) -> Result<(Code, Vec<u8>)> {
    // `0` selects the two character code table.
    let cs = match qb64.as_bytes().first() {
        None => return Err(Error::encoding_invalid("empty input")),
        Some(b'0') => 2,
        Some(_) => 1,
    };
    let hard = qb64
        .get(..cs)
        .ok_or_else(|| Error::encoding_invalid(format!("truncated code in {qb64}")))?;
    let code = Code::from_str(hard)?;

    if qb64.len() != code.qb64_size() {
        return Err(Error::encoding_invalid(format!(
            "code {code} expects {} characters, got {}",
            code.qb64_size(),
            qb64.len()
        )));
    }

    let ps = pad_size(code.raw_size());
    let mut b64 = "A".repeat(cs);
    b64.push_str(&qb64[cs..]);
    let padded = BASE64_URL_SAFE_NO_PAD
        .decode(b64.as_bytes())
        .map_err(|e| Error::encoding_invalid("base64 decode failed").with_source(e))?;

    if padded[..ps].iter().any(|b| *b != 0) {
        return Err(Error::encoding_invalid(format!(
            "non-zero pad bits in {qb64}"
        )));
    }

    Ok((code, padded[ps..].to_vec()))
}
