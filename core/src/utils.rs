//! Utility functions and types.

use std::fmt::Debug;

/// Redacts sensitive text in `Debug` output.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 characters renders as `***`.
/// - Longer input keeps the first and last three characters, so distinct
///   values can still be told apart in logs.
///
/// Raw bytes are never shown, only their length.
pub enum Redact<'a> {
    /// Text value such as a key id or an encoded seed.
    Text(&'a str),
    /// Raw secret bytes.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact::Text(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::Text(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact::Text(value.as_deref().unwrap_or_default())
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact::Bytes(value)
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Redact::Bytes(bs) => write!(f, "<{} bytes redacted>", bs.len()),
            Redact::Text(s) if s.is_empty() => f.write_str("EMPTY"),
            Redact::Text(s) if s.len() < 12 || !s.is_ascii() => f.write_str("***"),
            Redact::Text(s) => write!(f, "{}***{}", &s[..3], &s[s.len() - 3..]),
        }
    }
}
