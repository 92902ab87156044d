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

use httpsig_cesr_core::hash::CONTENT_DIGEST;

// Headers
pub const ORIGIN_DATE: &str = "origin-date";
pub const SIGNATURE: &str = "signature";
pub const SIGNATURE_INPUT: &str = "signature-input";
pub const SIGNIFY_RESOURCE: &str = "signify-resource";

// Signature parameters
pub const SIGNATURE_LABEL: &str = "signify";
pub const SIGNATURE_ALGORITHM: &str = "ed25519";
pub const SIGNATURE_PARAMS: &str = "@signature-params";
pub const DERIVED_FIELD_PREFIX: char = '@';

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Fields signed by default, in signing order.
pub const DEFAULT_SIGNATURE_FIELDS: &[&str] = &[
    "@method",
    "@path",
    ORIGIN_DATE,
    SIGNIFY_RESOURCE,
    CONTENT_DIGEST,
];

// Env values used by Config
pub const HTTPSIG_KEY_ID: &str = "HTTPSIG_KEY_ID";
pub const HTTPSIG_PRIVATE_KEY: &str = "HTTPSIG_PRIVATE_KEY";
pub const HTTPSIG_SIGNATURE_FIELDS: &str = "HTTPSIG_SIGNATURE_FIELDS";
pub const HTTPSIG_DIGEST_ALGORITHM: &str = "HTTPSIG_DIGEST_ALGORITHM";
pub const HTTPSIG_DIGEST_URL_SAFE: &str = "HTTPSIG_DIGEST_URL_SAFE";
