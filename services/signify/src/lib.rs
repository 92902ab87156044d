//! Signify flavoured HTTP Message Signatures.
//!
//! Requests are signed with Ed25519 over a signature base built from an
//! ordered field list, and the signature travels CESR encoded:
//!
//! ```text
//! signature-input: signify=("@method" "@path" "origin-date" "signify-resource" "content-digest");created=1704164645;keyid="D...";alg="ed25519"
//! signature: indexed="?0";signify="0B..."
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use httpsig_cesr_core::{Context, OsEnv};
//! use httpsig_cesr_signify::{Config, SignedClient};
//!
//! # async fn example() -> httpsig_cesr_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let client = SignedClient::from_config(ctx, &config)?;
//!
//! let req = client.sign_json(http::Method::POST, "https://example.com/api/items", &[1, 2, 3])?;
//! assert!(req.headers().contains_key("signature"));
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    DEFAULT_SIGNATURE_FIELDS, ORIGIN_DATE, SIGNATURE, SIGNATURE_INPUT, SIGNIFY_RESOURCE,
};

mod field;
pub use field::{derived_fields, evaluate_field};

mod params;
pub use params::{SignatureFields, SignatureParams};

mod key;
pub use key::KeyPair;

mod sign_request;
pub use sign_request::RequestSigner;

mod config;
pub use config::Config;

mod client;
pub use client::SignedClient;
