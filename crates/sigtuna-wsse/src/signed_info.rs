#![forbid(unsafe_code)]

//! SignedInfo assembly.
//!
//! The SignedInfo element is produced once, as text, and those exact
//! bytes are what the RSA signature covers. The layout is chosen so
//! that exclusive canonicalization of the element (with `env` in the
//! inclusive prefix list, as its CanonicalizationMethod declares) is
//! the identity: namespace declarations appear in canonical order,
//! empty elements use explicit close tags, and attribute order matches
//! the canonical sort. A verifier that parses the final envelope and
//! canonicalizes SignedInfo recovers the signed bytes exactly, so the
//! element must never be re-serialized after assembly.

use sigtuna_core::{algorithm, ns};
use sigtuna_xml::CanonicalXml;

use crate::reference;

/// Assemble the SignedInfo for one envelope.
///
/// Reference order is fixed: Body, Messaging, external document.
pub fn signed_info(
    body_id: &str,
    body_digest: &str,
    messaging_id: &str,
    messaging_digest: &str,
    doc_id: &str,
    doc_digest: &str,
) -> CanonicalXml {
    let body_ref = reference::inline_reference(body_id, body_digest);
    let messaging_ref = reference::inline_reference(messaging_id, messaging_digest);
    let doc_ref = reference::attachment_reference(doc_id, doc_digest);
    CanonicalXml::new(format!(
        "<ds:SignedInfo xmlns:ds=\"{ds}\" xmlns:env=\"{env}\">\n \
         <ds:CanonicalizationMethod Algorithm=\"{c14n}\">\n  \
         <ec:InclusiveNamespaces xmlns:ec=\"{c14n}\" PrefixList=\"{env_prefix}\"></ec:InclusiveNamespaces>\n \
         </ds:CanonicalizationMethod>\n \
         <ds:SignatureMethod Algorithm=\"{rsa}\"></ds:SignatureMethod>\
         {body_ref}{messaging_ref}{doc_ref}\n\
         </ds:SignedInfo>",
        ds = ns::DSIG,
        env = ns::ENV,
        c14n = algorithm::EXC_C14N,
        rsa = algorithm::RSA_SHA256,
        env_prefix = ns::prefix::ENV,
    ))
}
