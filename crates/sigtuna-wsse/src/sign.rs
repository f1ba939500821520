#![forbid(unsafe_code)]

//! Envelope signing.
//!
//! Takes a serialized envelope with an empty `wsse:Security` header,
//! computes the three reference digests, signs the assembled
//! SignedInfo bytes, and splices the BinarySecurityToken and Signature
//! into the Security header in a single text edit. Everything outside
//! that edit keeps its original bytes, so the Body and Messaging
//! octets the digests cover are untouched. All inputs are validated
//! and all cryptography happens before the output string is built; on
//! any error the envelope is returned unmodified in the sense that no
//! partially signed text ever escapes.

use std::path::Path;

use sigtuna_core::{algorithm, ns, Error, Result};
use sigtuna_keys::Key;
use sigtuna_xml::document::XmlDocument;

use crate::{hash, signed_info, token};

/// Sign an envelope with a key that already has a certificate
/// attached.
///
/// `doc_digest` is the base64 SHA-256 of the external document, as
/// produced by [`hash::attachment_digest`] over the payload bytes that
/// will travel in the `doc_id` MIME part.
pub fn sign_envelope(
    envelope_text: &str,
    doc_id: &str,
    doc_digest: &str,
    key: &Key,
) -> Result<String> {
    let cert_der = key.certificate_der().ok_or_else(|| {
        Error::Signing("signing key has no certificate attached".into())
    })?;

    let doc =
        roxmltree::Document::parse_with_options(envelope_text, sigtuna_xml::parsing_options())
            .map_err(|e| Error::XmlParse(e.to_string()))?;

    let security = XmlDocument::find_element(&doc, ns::WSSE, ns::node::SECURITY)
        .ok_or_else(|| Error::MissingElement("wsse:Security".into()))?;
    if security.children().any(|n| n.is_element()) {
        return Err(Error::XmlStructure(
            "Security header already has content".into(),
        ));
    }
    let body = XmlDocument::find_element(&doc, ns::ENV, ns::node::BODY)
        .ok_or_else(|| Error::MissingElement("env:Body".into()))?;
    let messaging = XmlDocument::find_element(&doc, ns::EBMS, ns::node::MESSAGING)
        .ok_or_else(|| Error::MissingElement("eb:Messaging".into()))?;

    let body_id = body
        .attribute((ns::WSU, ns::attr::ID))
        .ok_or_else(|| Error::MissingIdentifier("wsu:Id on env:Body".into()))?;
    let messaging_id = messaging
        .attribute((ns::WSU, ns::attr::ID))
        .ok_or_else(|| Error::MissingIdentifier("wsu:Id on eb:Messaging".into()))?;

    let body_digest = hash::digest_element(body)?;
    let messaging_digest = hash::messaging_digest(envelope_text, messaging)?;

    let si = signed_info::signed_info(
        body_id,
        &body_digest,
        messaging_id,
        &messaging_digest,
        doc_id,
        doc_digest,
    );

    let sig_alg = sigtuna_crypto::sign::from_uri(algorithm::RSA_SHA256)?;
    let signature_bytes = sig_alg.sign(&key.to_signing_key(), si.as_bytes())?;
    use base64::Engine;
    let engine = base64::engine::general_purpose::STANDARD;
    let signature_b64 = engine.encode(signature_bytes);

    let security_token = token::build_token(cert_der);
    let key_info = token::build_key_info(&security_token.id);

    let signature = format!(
        "<ds:Signature xmlns:ds=\"{ds}\">\n{si}\n\
         <ds:SignatureValue>{signature_b64}</ds:SignatureValue>\n\
         {key_info}\n</ds:Signature>",
        ds = ns::DSIG,
        si = si.as_str(),
    );

    splice_into_security(envelope_text, security, &security_token.xml, &signature)
}

/// Sign an envelope, loading the key and certificate from files.
///
/// The key is loaded and paired with the certificate before the
/// envelope is looked at, so a bad keyfile, certfile, or password
/// fails without producing any output.
pub fn sign_envelope_with_files(
    envelope_text: &str,
    doc_id: &str,
    doc_digest: &str,
    keyfile: &Path,
    certfile: &Path,
    password: Option<&str>,
) -> Result<String> {
    let mut key = sigtuna_keys::load_key_file(keyfile, password)?;
    sigtuna_keys::attach_certificate(&mut key, certfile)?;
    sign_envelope(envelope_text, doc_id, doc_digest, &key)
}

// ── Splicing ─────────────────────────────────────────────────────────

/// Replace the empty Security element with one holding the token and
/// the signature, in one edit of the envelope text.
fn splice_into_security(
    envelope_text: &str,
    security: roxmltree::Node<'_, '_>,
    token_xml: &str,
    signature_xml: &str,
) -> Result<String> {
    let range = security.range();
    let slice = envelope_text
        .get(range.clone())
        .ok_or_else(|| Error::XmlStructure("Security element range out of bounds".into()))?;

    let qname_len = slice[1..]
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .ok_or_else(|| Error::XmlStructure("malformed Security start tag".into()))?;
    let qname = &slice[1..1 + qname_len];

    let open_tag = if let Some(stripped) = slice.strip_suffix("/>") {
        format!("{stripped}>")
    } else {
        let end = slice
            .find('>')
            .ok_or_else(|| Error::XmlStructure("malformed Security start tag".into()))?;
        slice[..=end].to_string()
    };

    let indent = line_indent(envelope_text, range.start);
    let child_indent = format!("{indent}  ");

    let mut out = String::with_capacity(
        envelope_text.len() + token_xml.len() + signature_xml.len() + 64,
    );
    out.push_str(&envelope_text[..range.start]);
    out.push_str(&open_tag);
    out.push('\n');
    out.push_str(&child_indent);
    out.push_str(token_xml);
    out.push('\n');
    out.push_str(&child_indent);
    out.push_str(signature_xml);
    out.push('\n');
    out.push_str(&indent);
    out.push_str("</");
    out.push_str(qname);
    out.push('>');
    out.push_str(&envelope_text[range.end..]);
    Ok(out)
}

/// The run of spaces between `pos` and the start of its line.
fn line_indent(text: &str, pos: usize) -> String {
    let before = &text[..pos];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let indent = &before[line_start..];
    if indent.chars().all(|c| c == ' ') {
        indent.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigtuna_c14n::C14nMode;
    use sigtuna_xml::document::child_element;

    fn fixture(name: &str) -> std::path::PathBuf {
        std::path::Path::new("../../test-data/keys").join(name)
    }

    fn sample_envelope() -> String {
        format!(
            concat!(
                "<env:Envelope xmlns:env=\"{env}\">\n",
                "  <env:Header>\n",
                "    <ns2:Messaging xmlns:ns2=\"{ebms}\" xmlns:wsu=\"{wsu}\" env:mustUnderstand=\"true\" wsu:Id=\"_m1\">\n",
                "      <ns2:UserMessage>\n",
                "        <ns2:MessageInfo>\n",
                "          <ns2:Timestamp>2026-01-01T00:00:00.000000+00:00</ns2:Timestamp>\n",
                "          <ns2:MessageId>m@example</ns2:MessageId>\n",
                "        </ns2:MessageInfo>\n",
                "      </ns2:UserMessage>\n",
                "    </ns2:Messaging>\n",
                "    <wsse:Security xmlns:wsse=\"{wsse}\" env:mustUnderstand=\"true\"/>\n",
                "  </env:Header>\n",
                "  <env:Body xmlns:wsu=\"{wsu}\" wsu:Id=\"_b1\"/>\n",
                "</env:Envelope>\n"
            ),
            env = sigtuna_core::ns::ENV,
            ebms = sigtuna_core::ns::EBMS,
            wsu = sigtuna_core::ns::WSU,
            wsse = sigtuna_core::ns::WSSE,
        )
    }

    fn sign_sample() -> Option<String> {
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("sig-2048-cert.pem");
        if !keyfile.exists() || !certfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return None;
        }
        let envelope = sample_envelope();
        let digest = hash::attachment_digest(b"payload bytes").unwrap();
        Some(
            sign_envelope_with_files(
                &envelope,
                "cid:doc-1@example",
                &digest,
                &keyfile,
                &certfile,
                None,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_sign_envelope_structure() {
        let Some(signed) = sign_sample() else { return };
        let doc = roxmltree::Document::parse(&signed).unwrap();
        let security = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Security")
            .unwrap();
        let children: Vec<_> = security.children().filter(|n| n.is_element()).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].tag_name().name(), "BinarySecurityToken");
        assert_eq!(children[1].tag_name().name(), "Signature");

        // KeyInfo points at the token that was inserted
        let token_id = children[0]
            .attribute((sigtuna_core::ns::WSU, "Id"))
            .unwrap();
        assert!(signed.contains(&format!("URI=\"#{token_id}\"")));
    }

    #[test]
    fn test_sign_leaves_signed_octets_untouched() {
        let envelope = sample_envelope();
        let Some(signed) = sign_sample() else { return };
        let doc = roxmltree::Document::parse(&envelope).unwrap();
        let body = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Body")
            .unwrap();
        let messaging = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Messaging")
            .unwrap();
        assert!(signed.contains(&envelope[body.range()]));
        assert!(signed.contains(&envelope[messaging.range()]));
    }

    #[test]
    fn test_signature_verifies_against_certificate() {
        let Some(signed) = sign_sample() else { return };
        let doc = roxmltree::Document::parse(&signed).unwrap();
        let signature = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Signature")
            .unwrap();
        let signed_info_node =
            child_element(signature, sigtuna_core::ns::DSIG, "SignedInfo").unwrap();
        let signature_value =
            child_element(signature, sigtuna_core::ns::DSIG, "SignatureValue")
                .unwrap()
                .text()
                .unwrap();

        // Recover the signed octets the way a verifier would
        let canonical = sigtuna_c14n::canonicalize_subtree(
            signed_info_node,
            C14nMode::Exclusive,
            &["env".to_string()],
        )
        .unwrap();

        use base64::Engine;
        let engine = base64::engine::general_purpose::STANDARD;
        let sig_bytes = engine.decode(signature_value).unwrap();

        let cert_der = sigtuna_keys::load_certificate_der(&fixture("sig-2048-cert.pem")).unwrap();
        let public = sigtuna_keys::loader::certificate_public_key(&cert_der).unwrap();
        let alg = sigtuna_crypto::sign::from_uri(algorithm::RSA_SHA256).unwrap();
        let ok = alg
            .verify(
                &sigtuna_crypto::SigningKey::RsaPublic(public),
                &canonical,
                &sig_bytes,
            )
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_reference_digests_match_recomputation() {
        let Some(signed) = sign_sample() else { return };
        let doc = roxmltree::Document::parse(&signed).unwrap();
        let body = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Body")
            .unwrap();
        let expected = hash::digest_element(body).unwrap();
        assert!(signed.contains(&format!("<ds:DigestValue>{expected}</ds:DigestValue>")));
    }

    #[test]
    fn test_sign_requires_empty_security() {
        let Some(signed) = sign_sample() else { return };
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("sig-2048-cert.pem");
        let err = sign_envelope_with_files(&signed, "cid:x@y", "AAAA", &keyfile, &certfile, None)
            .unwrap_err();
        assert!(matches!(err, Error::XmlStructure(_)));
    }

    #[test]
    fn test_sign_missing_security_header() {
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("sig-2048-cert.pem");
        if !keyfile.exists() || !certfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return;
        }
        let envelope = sample_envelope().replace(
            &format!(
                "    <wsse:Security xmlns:wsse=\"{}\" env:mustUnderstand=\"true\"/>\n",
                sigtuna_core::ns::WSSE
            ),
            "",
        );
        let err = sign_envelope_with_files(&envelope, "cid:x@y", "AAAA", &keyfile, &certfile, None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingElement(_)));
    }

    #[test]
    fn test_sign_missing_body_id() {
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("sig-2048-cert.pem");
        if !keyfile.exists() || !certfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return;
        }
        let envelope = sample_envelope().replace(" wsu:Id=\"_b1\"", "");
        let err = sign_envelope_with_files(&envelope, "cid:x@y", "AAAA", &keyfile, &certfile, None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier(_)));
    }

    #[test]
    fn test_mismatched_certificate_fails_before_signing() {
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("other-2048-cert.pem");
        if !keyfile.exists() || !certfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return;
        }
        let envelope = sample_envelope();
        let err = sign_envelope_with_files(
            &envelope,
            "cid:doc-1@example",
            "AAAA",
            &keyfile,
            &certfile,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::CertificateMismatch(_)));
    }

    #[test]
    fn test_bad_certificate_file_fails_before_signing() {
        let keyfile = fixture("sig-2048-key.pem");
        if !keyfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return;
        }
        let envelope = sample_envelope();
        // key PEM handed in as the certificate
        let err = sign_envelope_with_files(
            &envelope,
            "cid:doc-1@example",
            "AAAA",
            &keyfile,
            &keyfile,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::CertificateLoad(_)));
    }

    #[test]
    fn test_signed_envelope_round_trips_messaging_digest() {
        // The Messaging digest in the signed envelope must equal a
        // fresh detach-and-reindent digest computed from the signed
        // text, since signing left those bytes alone.
        let Some(signed) = sign_sample() else { return };
        let doc = roxmltree::Document::parse(&signed).unwrap();
        let messaging = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "Messaging")
            .unwrap();
        let expected = hash::messaging_digest(&signed, messaging).unwrap();
        assert!(signed.contains(&format!("<ds:DigestValue>{expected}</ds:DigestValue>")));
    }
}
