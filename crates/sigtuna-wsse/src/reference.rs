#![forbid(unsafe_code)]

//! Signature Reference stanzas.
//!
//! References are built as literal text with a fixed layout, because
//! the enclosing SignedInfo is signed byte-for-byte and must
//! canonicalize to itself. Inline references point at a `wsu:Id` via
//! `#id` and use the exc-C14N transform; the external document
//! reference keeps its `cid:` URI untouched and uses the SwA
//! attachment content transform.

use sigtuna_core::algorithm;

/// A Reference to an element inside the envelope, by `wsu:Id`.
pub fn inline_reference(id: &str, digest_b64: &str) -> String {
    reference_xml(&format!("#{id}"), algorithm::EXC_C14N, digest_b64)
}

/// A Reference to an external MIME part, by `cid:` URI.
pub fn attachment_reference(uri: &str, digest_b64: &str) -> String {
    reference_xml(uri, algorithm::ATTACHMENT_CONTENT, digest_b64)
}

fn reference_xml(uri: &str, transform: &str, digest_b64: &str) -> String {
    let uri = sigtuna_c14n::escape::attr(uri);
    format!(
        "\n<ds:Reference URI=\"{uri}\">\n \
         <ds:Transforms>\n  \
         <ds:Transform Algorithm=\"{transform}\"></ds:Transform>\n \
         </ds:Transforms>\n \
         <ds:DigestMethod Algorithm=\"{digest_alg}\"></ds:DigestMethod>\n \
         <ds:DigestValue>{digest_b64}</ds:DigestValue>\n\
         </ds:Reference>",
        digest_alg = algorithm::SHA256,
    )
}
