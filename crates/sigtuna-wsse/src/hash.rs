#![forbid(unsafe_code)]

//! Digest computation for signature references.
//!
//! Every reference digest is SHA-256 over Exclusive C14N output (with
//! an empty inclusive prefix list), base64-encoded. Inline elements are
//! canonicalized as subtrees of the envelope; the Messaging header goes
//! through a detach-and-reindent round trip first so that the digest
//! covers the same indentation whitespace the serialized envelope
//! carries.

use sigtuna_c14n::C14nMode;
use sigtuna_core::{algorithm, Result};
use sigtuna_xml::detach_element;

/// Digest an element subtree in place: exc-C14N, SHA-256, base64.
pub fn digest_element(node: roxmltree::Node<'_, '_>) -> Result<String> {
    let canonical = sigtuna_c14n::canonicalize_subtree(node, C14nMode::Exclusive, &[])?;
    let hash = sigtuna_crypto::digest::digest(algorithm::SHA256, &canonical)?;
    use base64::Engine;
    let engine = base64::engine::general_purpose::STANDARD;
    Ok(engine.encode(hash))
}

/// Digest a standalone XML fragment: parse, then exc-C14N the root
/// element, SHA-256, base64.
pub fn digest_fragment(fragment: &str) -> Result<String> {
    let canonical = sigtuna_c14n::canonicalize(fragment, C14nMode::Exclusive, &[])?;
    let hash = sigtuna_crypto::digest::digest(algorithm::SHA256, &canonical)?;
    use base64::Engine;
    let engine = base64::engine::general_purpose::STANDARD;
    Ok(engine.encode(hash))
}

/// Digest raw attachment bytes: SHA-256, base64.
///
/// The SwA content transform digests the attachment octets directly,
/// with no canonicalization step.
pub fn attachment_digest(data: &[u8]) -> Result<String> {
    let hash = sigtuna_crypto::digest::digest(algorithm::SHA256, data)?;
    use base64::Engine;
    let engine = base64::engine::general_purpose::STANDARD;
    Ok(engine.encode(hash))
}

/// Re-indent a detached Messaging fragment to its in-envelope depth.
///
/// The fragment is dedented to column zero by [`detach_element`]; the
/// Messaging header sits two levels deep in the envelope, so four
/// spaces go back onto every non-blank line before hashing. Blank
/// lines stay untouched.
pub fn reindent_messaging(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len() + 64);
    for (i, line) in fragment.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim().is_empty() {
            out.push_str(line);
        } else {
            out.push_str("    ");
            out.push_str(line);
        }
    }
    out
}

/// Compute the Messaging header digest.
///
/// The header is detached from the envelope text, re-indented to its
/// in-envelope depth, re-parsed, and digested. For an envelope in the
/// builder's serialized form this yields the same digest as hashing
/// the subtree in place, because exc-C14N renders identical bytes for
/// both parses.
pub fn messaging_digest(envelope_text: &str, messaging: roxmltree::Node<'_, '_>) -> Result<String> {
    let detached = detach_element(envelope_text, messaging)?;
    let reindented = reindent_messaging(&detached);
    digest_fragment(&reindented)
}
