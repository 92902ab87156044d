//! Core components for signing HTTP requests.
//!
//! This crate provides the foundational types shared by the httpsig-cesr
//! ecosystem.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **SigningRequest**: The request components a signature is computed over
//! - **Error**: A single error type whose [`ErrorKind`] tells signing failures from transport failures
//!
//! ## Example
//!
//! ```
//! use httpsig_cesr_core::SigningRequest;
//!
//! # fn example() -> httpsig_cesr_core::Result<()> {
//! let mut parts = http::Request::builder()
//!     .method("POST")
//!     .uri("https://example.com/api/items?page=2")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! let req = SigningRequest::build(&mut parts)?;
//! assert_eq!(req.path, "/api/items");
//! assert_eq!(req.query.as_deref(), Some("page=2"));
//!
//! req.apply(&mut parts)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`cesr`]: CESR text encoding of keys and signatures
//! - [`hash`]: Content digest computation
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod cesr;
pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::SigningRequest;
