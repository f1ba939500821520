#![forbid(unsafe_code)]

//! WS-Security header construction for AS4 envelopes.
//!
//! The signing pipeline: compute reference digests for the SOAP Body,
//! the ebMS Messaging header, and the external document, assemble the
//! SignedInfo as literal text, sign those bytes with RSA-SHA256, and
//! splice a BinarySecurityToken plus Signature into the envelope's
//! `wsse:Security` header without disturbing any signed octets.

pub mod hash;
pub mod reference;
pub mod reflist;
pub mod sign;
pub mod signed_info;
pub mod token;

pub use sign::{sign_envelope, sign_envelope_with_files};
pub use signed_info::signed_info;
