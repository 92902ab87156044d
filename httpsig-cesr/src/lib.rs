#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use httpsig_cesr_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::DefaultContext;

#[cfg(feature = "signify")]
pub mod signify {
    pub use httpsig_cesr_signify::*;
}
