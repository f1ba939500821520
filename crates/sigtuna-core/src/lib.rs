#![forbid(unsafe_code)]

//! Core types for the Sigtuna AS4 signing library.
//!
//! Error taxonomy, XML namespace constants, and the algorithm URIs of the
//! fixed signing profile (exclusive C14N, SHA-256, RSA-SHA256).

pub mod algorithm;
pub mod error;
pub mod ns;

pub use error::{Error, Result};
