#![forbid(unsafe_code)]

//! Loading keys and certificates from PEM and DER files.

use std::path::Path;

use sigtuna_core::{Error, Result};

use crate::key::{Key, KeyData, KeyUsage};

/// Load an RSA private key from unencrypted PEM data.
///
/// Accepts both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1
/// (`BEGIN RSA PRIVATE KEY`) encodings.
pub fn load_rsa_private_pem(pem_data: &str) -> Result<Key> {
    use rsa::pkcs8::DecodePrivateKey;
    let private = match rsa::RsaPrivateKey::from_pkcs8_pem(pem_data) {
        Ok(pk) => pk,
        Err(_) => {
            use rsa::pkcs1::DecodeRsaPrivateKey;
            rsa::RsaPrivateKey::from_pkcs1_pem(pem_data).map_err(|e| {
                Error::KeyLoad(format!("not a PKCS#8 or PKCS#1 private key: {e}"))
            })?
        }
    };
    let public = private.to_public_key();
    Ok(Key::new(
        KeyData::Rsa {
            private: Some(private),
            public,
        },
        KeyUsage::Sign,
    ))
}

/// Load an RSA private key from an encrypted PKCS#8 PEM
/// (`BEGIN ENCRYPTED PRIVATE KEY`).
pub fn load_encrypted_pem(pem_data: &str, password: &str) -> Result<Key> {
    use rsa::pkcs8::DecodePrivateKey;
    let private = rsa::RsaPrivateKey::from_pkcs8_encrypted_pem(pem_data, password.as_bytes())
        .map_err(|e| Error::KeyLoad(format!("failed to decrypt private key: {e}")))?;
    let public = private.to_public_key();
    Ok(Key::new(
        KeyData::Rsa {
            private: Some(private),
            public,
        },
        KeyUsage::Sign,
    ))
}

/// Load a private key from PEM data, detecting encryption from the
/// PEM label.
pub fn load_pem_auto(pem_data: &str, password: Option<&str>) -> Result<Key> {
    const MARKER: &[u8] = b"ENCRYPTED PRIVATE KEY";
    let encrypted = pem_data
        .as_bytes()
        .windows(MARKER.len())
        .any(|w| w == MARKER);
    if encrypted {
        let password = password.ok_or_else(|| {
            Error::KeyLoad("encrypted private key requires a password".into())
        })?;
        return load_encrypted_pem(pem_data, password);
    }
    load_rsa_private_pem(pem_data)
}

/// Load a private key from a file, accepting PEM or DER input.
pub fn load_key_file(path: &Path, password: Option<&str>) -> Result<Key> {
    let data = std::fs::read(path)
        .map_err(|e| Error::KeyLoad(format!("{}: {e}", path.display())))?;
    if data.starts_with(b"-----BEGIN") {
        let pem = std::str::from_utf8(&data)
            .map_err(|e| Error::KeyLoad(format!("key file is not valid UTF-8: {e}")))?;
        return load_pem_auto(pem, password);
    }
    use rsa::pkcs8::DecodePrivateKey;
    let private = match rsa::RsaPrivateKey::from_pkcs8_der(&data) {
        Ok(pk) => pk,
        Err(_) => {
            use rsa::pkcs1::DecodeRsaPrivateKey;
            rsa::RsaPrivateKey::from_pkcs1_der(&data).map_err(|e| {
                Error::KeyLoad(format!("not a PKCS#8 or PKCS#1 DER private key: {e}"))
            })?
        }
    };
    let public = private.to_public_key();
    Ok(Key::new(
        KeyData::Rsa {
            private: Some(private),
            public,
        },
        KeyUsage::Sign,
    ))
}

/// Decode an X.509 certificate from PEM data, returning its DER bytes.
pub fn load_x509_cert_pem(pem_data: &str) -> Result<Vec<u8>> {
    let (label, der) = pem_rfc7468::decode_vec(pem_data.trim().as_bytes())
        .map_err(|e| Error::CertificateLoad(format!("invalid PEM: {e}")))?;
    if label != "CERTIFICATE" {
        return Err(Error::CertificateLoad(format!(
            "expected CERTIFICATE PEM, found {label}"
        )));
    }
    use der::Decode;
    x509_cert::Certificate::from_der(&der)
        .map_err(|e| Error::CertificateLoad(format!("invalid certificate: {e}")))?;
    Ok(der)
}

/// Load an X.509 certificate from a file, accepting PEM or DER input,
/// and return its DER bytes.
pub fn load_certificate_der(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)
        .map_err(|e| Error::CertificateLoad(format!("{}: {e}", path.display())))?;
    if data.starts_with(b"-----BEGIN") {
        let pem = std::str::from_utf8(&data).map_err(|e| {
            Error::CertificateLoad(format!("certificate file is not valid UTF-8: {e}"))
        })?;
        return load_x509_cert_pem(pem);
    }
    use der::Decode;
    x509_cert::Certificate::from_der(&data)
        .map_err(|e| Error::CertificateLoad(format!("invalid DER certificate: {e}")))?;
    Ok(data)
}

/// Extract the RSA public key from a DER-encoded certificate.
pub fn certificate_public_key(der_bytes: &[u8]) -> Result<rsa::RsaPublicKey> {
    use der::{Decode, Encode};
    let cert = x509_cert::Certificate::from_der(der_bytes)
        .map_err(|e| Error::CertificateLoad(format!("invalid certificate: {e}")))?;
    let spki_der = cert
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| Error::CertificateLoad(format!("cannot extract public key: {e}")))?;
    use spki::DecodePublicKey;
    rsa::RsaPublicKey::from_public_key_der(&spki_der)
        .map_err(|e| Error::CertificateLoad(format!("certificate holds a non-RSA key: {e}")))
}

/// Attach a certificate to a key after checking that the certificate's
/// public key matches the key's own.
///
/// On success the certificate becomes the leaf of `key.x509_chain`. On
/// mismatch the key is left untouched.
pub fn attach_certificate(key: &mut Key, path: &Path) -> Result<()> {
    let der = load_certificate_der(path)?;
    let cert_public = certificate_public_key(&der)?;
    if &cert_public != key.rsa_public_key() {
        return Err(Error::CertificateMismatch(format!(
            "public key in {} differs from the signing key",
            path.display()
        )));
    }
    key.x509_chain = vec![der];
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> std::path::PathBuf {
        std::path::Path::new("../../test-data/keys").join(name)
    }

    #[test]
    fn test_load_pkcs8_pem() {
        let path = fixture("sig-2048-key.pem");
        if !path.exists() {
            eprintln!("skipping test: {path:?} not found");
            return;
        }
        let pem = std::fs::read_to_string(&path).unwrap();
        let key = load_rsa_private_pem(&pem).unwrap();
        assert!(key.rsa_private_key().is_some());
        assert_eq!(key.usage, KeyUsage::Sign);
    }

    #[test]
    fn test_load_pkcs1_pem() {
        let path = fixture("sig-2048-key-pkcs1.pem");
        if !path.exists() {
            eprintln!("skipping test: {path:?} not found");
            return;
        }
        let pem = std::fs::read_to_string(&path).unwrap();
        let key = load_rsa_private_pem(&pem).unwrap();
        assert!(key.rsa_private_key().is_some());
    }

    #[test]
    fn test_load_encrypted_pem() {
        let path = fixture("sig-2048-key-enc.pem");
        if !path.exists() {
            eprintln!("skipping test: {path:?} not found");
            return;
        }
        let pem = std::fs::read_to_string(&path).unwrap();
        let key = load_encrypted_pem(&pem, "secret123").unwrap();
        assert!(key.rsa_private_key().is_some());
    }

    #[test]
    fn test_encrypted_wrong_password() {
        let path = fixture("sig-2048-key-enc.pem");
        if !path.exists() {
            eprintln!("skipping test: {path:?} not found");
            return;
        }
        let pem = std::fs::read_to_string(&path).unwrap();
        let err = load_encrypted_pem(&pem, "wrong").unwrap_err();
        assert!(matches!(err, Error::KeyLoad(_)));
    }

    #[test]
    fn test_load_pem_auto_detects_encryption() {
        let enc_path = fixture("sig-2048-key-enc.pem");
        let plain_path = fixture("sig-2048-key.pem");
        if !enc_path.exists() || !plain_path.exists() {
            eprintln!("skipping test: fixtures not found");
            return;
        }
        let enc = std::fs::read_to_string(&enc_path).unwrap();
        let plain = std::fs::read_to_string(&plain_path).unwrap();
        assert!(load_pem_auto(&enc, Some("secret123")).is_ok());
        assert!(load_pem_auto(&enc, None).is_err());
        assert!(load_pem_auto(&plain, None).is_ok());
    }

    #[test]
    fn test_load_key_file() {
        let path = fixture("sig-2048-key.pem");
        if !path.exists() {
            eprintln!("skipping test: {path:?} not found");
            return;
        }
        let key = load_key_file(&path, None).unwrap();
        assert!(key.rsa_private_key().is_some());
    }

    #[test]
    fn test_load_certificate_pem_and_der() {
        let pem_path = fixture("sig-2048-cert.pem");
        let der_path = fixture("sig-2048-cert.der");
        if !pem_path.exists() || !der_path.exists() {
            eprintln!("skipping test: fixtures not found");
            return;
        }
        let from_pem = load_certificate_der(&pem_path).unwrap();
        let from_der = load_certificate_der(&der_path).unwrap();
        assert_eq!(from_pem, from_der);
    }

    #[test]
    fn test_certificate_load_rejects_key_pem() {
        let path = fixture("sig-2048-key.pem");
        if !path.exists() {
            eprintln!("skipping test: {path:?} not found");
            return;
        }
        let err = load_certificate_der(&path).unwrap_err();
        assert!(matches!(err, Error::CertificateLoad(_)));
    }

    #[test]
    fn test_attach_certificate() {
        let key_path = fixture("sig-2048-key.pem");
        let cert_path = fixture("sig-2048-cert.pem");
        if !key_path.exists() || !cert_path.exists() {
            eprintln!("skipping test: fixtures not found");
            return;
        }
        let mut key = load_key_file(&key_path, None).unwrap();
        attach_certificate(&mut key, &cert_path).unwrap();
        assert!(key.certificate_der().is_some());
    }

    #[test]
    fn test_attach_certificate_mismatch() {
        let key_path = fixture("sig-2048-key.pem");
        let cert_path = fixture("other-2048-cert.pem");
        if !key_path.exists() || !cert_path.exists() {
            eprintln!("skipping test: fixtures not found");
            return;
        }
        let mut key = load_key_file(&key_path, None).unwrap();
        let err = attach_certificate(&mut key, &cert_path).unwrap_err();
        assert!(matches!(err, Error::CertificateMismatch(_)));
        assert!(key.x509_chain.is_empty());
    }

    #[test]
    fn test_certificate_public_key_matches_private() {
        let key_path = fixture("sig-2048-key.pem");
        let cert_path = fixture("sig-2048-cert.pem");
        if !key_path.exists() || !cert_path.exists() {
            eprintln!("skipping test: fixtures not found");
            return;
        }
        let key = load_key_file(&key_path, None).unwrap();
        let der = load_certificate_der(&cert_path).unwrap();
        let cert_public = certificate_public_key(&der).unwrap();
        assert_eq!(&cert_public, key.rsa_public_key());
    }
}
