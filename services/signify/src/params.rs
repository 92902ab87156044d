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

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use httpsig_cesr_core::{Error, Result, SigningRequest};

use crate::constants::*;
use crate::field::evaluate_field;

/// Ordered list of fields covered by the signature.
///
/// The order is both the evaluation order of the signature base and the order
/// announced in `signature-input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureFields(Vec<String>);

impl SignatureFields {
    /// Create a field list, keeping the given order.
    ///
    /// Names must be non-empty visible ASCII without `"` or `\`. Unknown derived
    /// names are accepted here and rejected when the base is built.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect::<Vec<String>>();
        for field in &fields {
            if field.is_empty() {
                return Err(Error::config_invalid("signature field name is empty"));
            }
            if !field
                .bytes()
                .all(|b| b.is_ascii_graphic() && b != b'"' && b != b'\\')
            {
                return Err(Error::config_invalid(format!(
                    "signature field name {field:?} contains invalid characters"
                )));
            }
        }

        Ok(Self(fields))
    }

    /// Iterate field names in signing order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no field is covered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `field` is covered.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|v| v == field)
    }
}

impl Default for SignatureFields {
    fn default() -> Self {
        Self(
            DEFAULT_SIGNATURE_FIELDS
                .iter()
                .map(|v| v.to_string())
                .collect(),
        )
    }
}

/// Parse a comma separated list like `@method, @path, origin-date`.
impl FromStr for SignatureFields {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self(Vec::new()));
        }
        Self::new(s.split(',').map(str::trim))
    }
}

/// Parameters of one signing operation.
///
/// Created fresh for every request so that `created` is never reused.
#[derive(Debug, Clone, Copy)]
pub struct SignatureParams<'a> {
    fields: &'a SignatureFields,
    key_id: &'a str,
    created: i64,
}

impl<'a> SignatureParams<'a> {
    /// Create signature params.
    pub fn new(fields: &'a SignatureFields, key_id: &'a str, created: i64) -> Self {
        Self {
            fields,
            key_id,
            created,
        }
    }

    /// Creation time in seconds since unix epoch.
    pub fn created(&self) -> i64 {
        self.created
    }

    /// Fields covered by these params.
    pub fn fields(&self) -> &'a SignatureFields {
        self.fields
    }

    /// Render the params trailer.
    ///
    /// ```text
    /// ("@method" "@path");created=1618884473;keyid="Dabc";alg="ed25519"
    /// ```
    pub fn trailer(&self) -> String {
        self.to_string()
    }

    /// Build the signature base for the request.
    ///
    /// ## Format
    ///
    /// ```text
    /// "@method": POST
    /// "@path": /api/items
    /// "@signature-params": ("@method" "@path");created=1618884473;keyid="Dabc";alg="ed25519"
    /// ```
    ///
    /// Lines are joined with `\n` and there is no trailing newline.
    pub fn signature_base(&self, req: &SigningRequest) -> Result<String> {
        let mut s = String::new();
        for field in self.fields.iter() {
            let value = evaluate_field(field, req)?;
            writeln!(s, "\"{field}\": {value}")?;
        }
        write!(s, "\"{SIGNATURE_PARAMS}\": {self}")?;
        Ok(s)
    }
}

impl fmt::Display for SignatureParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        for (idx, field) in self.fields.iter().enumerate() {
            if idx != 0 {
                f.write_char(' ')?;
            }
            write!(f, "\"{field}\"")?;
        }
        write!(
            f,
            ");created={};keyid=\"{}\";alg=\"{SIGNATURE_ALGORITHM}\"",
            self.created, self.key_id
        )
    }
}
