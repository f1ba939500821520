#![forbid(unsafe_code)]

//! Signature algorithm implementations.

use sigtuna_core::{algorithm, Error};
use signature::SignatureEncoding;

/// Key material for signature operations.
pub enum SigningKey {
    Rsa(rsa::RsaPrivateKey),
    RsaPublic(rsa::RsaPublicKey),
}

/// Trait for signature algorithms.
pub trait SignatureAlgorithm: Send + std::fmt::Debug {
    fn uri(&self) -> &'static str;
    fn sign(&self, key: &SigningKey, data: &[u8]) -> Result<Vec<u8>, Error>;
    fn verify(&self, key: &SigningKey, data: &[u8], signature: &[u8]) -> Result<bool, Error>;
}

/// Create a signature algorithm from its URI.
pub fn from_uri(uri: &str) -> Result<Box<dyn SignatureAlgorithm>, Error> {
    match uri {
        algorithm::RSA_SHA256 => Ok(Box::new(RsaSha256)),
        _ => Err(Error::UnsupportedAlgorithm(format!(
            "signature algorithm: {uri}"
        ))),
    }
}

// ── RSA PKCS#1 v1.5 with SHA-256 ─────────────────────────────────────

/// RSA-SHA256 with PKCS#1 v1.5 padding.  Deterministic: signing the same
/// bytes with the same key yields byte-identical output.
#[derive(Debug)]
struct RsaSha256;

impl SignatureAlgorithm for RsaSha256 {
    fn uri(&self) -> &'static str {
        algorithm::RSA_SHA256
    }

    fn sign(&self, key: &SigningKey, data: &[u8]) -> Result<Vec<u8>, Error> {
        use signature::Signer;
        let SigningKey::Rsa(private_key) = key else {
            return Err(Error::Signing("RSA private key required".to_string()));
        };
        let sk = rsa::pkcs1v15::SigningKey::<sha2::Sha256>::new(private_key.clone());
        let sig = sk
            .try_sign(data)
            .map_err(|e| Error::Signing(format!("RSA-SHA256: {e}")))?;
        Ok(sig.to_vec())
    }

    fn verify(&self, key: &SigningKey, data: &[u8], sig_bytes: &[u8]) -> Result<bool, Error> {
        use signature::Verifier;
        let public_key = match key {
            SigningKey::Rsa(pk) => pk.to_public_key(),
            SigningKey::RsaPublic(pk) => pk.clone(),
        };
        let sig = rsa::pkcs1v15::Signature::try_from(sig_bytes)
            .map_err(|e| Error::Signing(format!("invalid RSA signature: {e}")))?;
        let vk = rsa::pkcs1v15::VerifyingKey::<sha2::Sha256>::new(public_key);
        Ok(vk.verify(data, &sig).is_ok())
    }
}
