#![forbid(unsafe_code)]

//! Canonical-form XML fragments.
//!
//! A [`CanonicalXml`] holds bytes whose exact form has cryptographic
//! meaning: SignedInfo, Reference stanzas, and the composed Signature.
//! Such fragments are assembled from fixed textual templates and must
//! never travel back through a parser/serializer pair, because attribute
//! order or whitespace drift would change the signed bytes.  Holding them
//! in this type instead of a plain `String` keeps that rule visible at
//! every function boundary.

use std::fmt;

/// A byte-exact XML fragment in its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalXml(String);

impl CanonicalXml {
    /// Wrap an already-canonical fragment.
    pub fn new(text: String) -> Self {
        Self(text)
    }

    /// The fragment text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The exact bytes to digest or sign.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalXml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CanonicalXml> for String {
    fn from(value: CanonicalXml) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_round_trip() {
        let c = CanonicalXml::new("<a b=\"1\"></a>".to_string());
        assert_eq!(c.as_bytes(), b"<a b=\"1\"></a>");
        assert_eq!(c.to_string(), "<a b=\"1\"></a>");
        assert_eq!(String::from(c), "<a b=\"1\"></a>");
    }
}
