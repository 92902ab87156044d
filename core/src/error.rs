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
use thiserror::Error;

/// The error type for httpsig-cesr operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configured field starts with `@` but is not a known derived field
    UnknownDerivedField,

    /// Request body could not be turned into bytes
    BodySerialization,

    /// Content digest could not be computed (unsupported algorithm, etc.)
    DigestComputation,

    /// CESR input is malformed or uses an unknown code
    EncodingInvalid,

    /// Key material is missing or malformed
    KeyInvalid,

    /// Request cannot be signed (missing authority, invalid header values, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Dispatching the signed request failed
    Transport,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error happened while producing the signature.
    ///
    /// Transport failures are not signing errors: the request was signed
    /// but could not be delivered.
    pub fn is_signing_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnknownDerivedField
                | ErrorKind::BodySerialization
                | ErrorKind::DigestComputation
                | ErrorKind::EncodingInvalid
                | ErrorKind::KeyInvalid
                | ErrorKind::RequestInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an unknown derived field error
    pub fn unknown_derived_field(field: impl AsRef<str>) -> Self {
        Self::new(
            ErrorKind::UnknownDerivedField,
            format!("unknown field {}", field.as_ref()),
        )
    }

    /// Create a body serialization error
    pub fn body_serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BodySerialization, message)
    }

    /// Create a digest computation error
    pub fn digest_computation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DigestComputation, message)
    }

    /// Create an encoding invalid error
    pub fn encoding_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodingInvalid, message)
    }

    /// Create a key invalid error
    pub fn key_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnknownDerivedField => write!(f, "unknown derived field"),
            ErrorKind::BodySerialization => write!(f, "body serialization failed"),
            ErrorKind::DigestComputation => write!(f, "digest computation failed"),
            ErrorKind::EncodingInvalid => write!(f, "invalid encoding"),
            ErrorKind::KeyInvalid => write!(f, "invalid key"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::body_serialization(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::method::InvalidMethod> for Error {
    fn from(err: http::method::InvalidMethod) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_errors_are_distinguishable_from_transport() {
        assert!(Error::unknown_derived_field("@bogus").is_signing_error());
        assert!(Error::digest_computation("sha-1 unsupported").is_signing_error());
        assert!(!Error::transport("connection refused").is_signing_error());
        assert!(!Error::config_invalid("missing key").is_signing_error());
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = Error::unknown_derived_field("@bogus");
        assert_eq!(err.kind(), ErrorKind::UnknownDerivedField);
        assert_eq!(err.to_string(), "unknown derived field: unknown field @bogus");
    }

    #[test]
    fn test_serde_json_error_is_body_serialization() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = Error::from(err);
        assert_eq!(err.kind(), ErrorKind::BodySerialization);
    }
}
