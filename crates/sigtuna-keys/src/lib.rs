#![forbid(unsafe_code)]

//! Key and certificate management for signing.
//!
//! Loads RSA private keys from PKCS#8 or PKCS#1 files (with optional
//! PKCS#8 encryption) and pairs them with X.509 certificates after
//! checking that the certificate's public key matches.

pub mod key;
pub mod loader;

pub use key::{Key, KeyData, KeyUsage};
pub use loader::{attach_certificate, load_certificate_der, load_key_file};
