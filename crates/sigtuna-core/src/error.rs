#![forbid(unsafe_code)]

/// Errors produced by the Sigtuna AS4 signing library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("invalid XML structure: {0}")]
    XmlStructure(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("certificate load error: {0}")]
    CertificateLoad(String),

    #[error("key load error: {0}")]
    KeyLoad(String),

    #[error("certificate does not match key: {0}")]
    CertificateMismatch(String),

    #[error("canonicalization error: {0}")]
    Canonicalization(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("missing identifier: {0}")]
    MissingIdentifier(String),

    #[error("missing required element: {0}")]
    MissingElement(String),

    #[error("missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("base64 decode error: {0}")]
    Base64(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
