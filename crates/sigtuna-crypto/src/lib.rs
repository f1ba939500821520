#![forbid(unsafe_code)]

//! Cryptographic algorithm implementations for the Sigtuna AS4 signing
//! library.
//!
//! The signing profile is fixed: SHA-256 digests and RSA-SHA256
//! (PKCS#1 v1.5) signatures, both selected by their XML-DSig algorithm
//! URIs.

pub mod digest;
pub mod sign;

pub use digest::DigestAlgorithm;
pub use sign::{SignatureAlgorithm, SigningKey};
