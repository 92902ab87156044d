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

use std::borrow::Cow;

use httpsig_cesr_core::{Error, Result, SigningRequest};

use crate::constants::DERIVED_FIELD_PREFIX;

type Evaluator = fn(&SigningRequest) -> Result<Cow<'_, str>>;

/// Derived fields and how to compute them from the request.
///
/// Adding a field here is enough to make it signable.
const DERIVED_FIELDS: &[(&str, Evaluator)] = &[
    ("@method", method),
    ("@path", path),
    ("@target-uri", target_uri),
    ("@authority", authority),
    ("@scheme", scheme),
    ("@request-target", request_target),
    ("@query", query),
];

/// Names of all supported derived fields.
pub fn derived_fields() -> impl Iterator<Item = &'static str> {
    DERIVED_FIELDS.iter().map(|(name, _)| *name)
}

/// Evaluate the canonical value of `field` for the request.
///
/// - Names starting with `@` are derived from the request line. An unknown
///   derived name fails with [`httpsig_cesr_core::ErrorKind::UnknownDerivedField`].
/// - Any other name is a header lookup returning the first value.
///
/// A missing header evaluates to an empty string instead of an error.
pub fn evaluate_field<'a>(field: &str, req: &'a SigningRequest) -> Result<Cow<'a, str>> {
    if !field.starts_with(DERIVED_FIELD_PREFIX) {
        return Ok(Cow::Borrowed(req.header_get_or_default(field)?));
    }

    let (_, eval) = DERIVED_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .ok_or_else(|| Error::unknown_derived_field(field))?;
    eval(req)
}

fn method(req: &SigningRequest) -> Result<Cow<'_, str>> {
    Ok(Cow::Borrowed(req.method.as_str()))
}

fn path(req: &SigningRequest) -> Result<Cow<'_, str>> {
    req.path_percent_decoded()
}

/// Same as `@request-target`: a bare `?` with an empty query is dropped.
fn target_uri(req: &SigningRequest) -> Result<Cow<'_, str>> {
    request_target(req)
}

fn authority(req: &SigningRequest) -> Result<Cow<'_, str>> {
    let host = req.authority.host().to_ascii_lowercase();
    Ok(match req.authority.port_u16() {
        Some(port) if Some(port) != req.default_port() => Cow::Owned(format!("{host}:{port}")),
        _ => Cow::Owned(host),
    })
}

fn scheme(req: &SigningRequest) -> Result<Cow<'_, str>> {
    Ok(Cow::Borrowed(req.scheme.as_str()))
}

fn request_target(req: &SigningRequest) -> Result<Cow<'_, str>> {
    Ok(match req.query_non_empty() {
        None => Cow::Borrowed(req.path.as_str()),
        Some(q) => Cow::Owned(format!("{}?{q}", req.path)),
    })
}

fn query(req: &SigningRequest) -> Result<Cow<'_, str>> {
    Ok(match req.query_non_empty() {
        None => Cow::Borrowed(""),
        Some(q) => Cow::Owned(format!("?{q}")),
    })
}
