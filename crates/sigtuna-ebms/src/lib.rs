#![forbid(unsafe_code)]

//! ebMS 3.0 / AS4 envelope construction.
//!
//! Builds the unsigned SOAP envelope for a Peppol AS4 user message
//! from a validated [`EbmsConfig`], with generated message ids and an
//! empty Security header ready for signing.

pub mod config;
pub mod envelope;
pub mod ids;

pub use config::EbmsConfig;
pub use envelope::{build_envelope, part_info_href, Envelope};
