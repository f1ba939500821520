#![forbid(unsafe_code)]

pub use sigtuna_c14n as c14n;
pub use sigtuna_core as core;
pub use sigtuna_crypto as crypto;
pub use sigtuna_ebms as ebms;
pub use sigtuna_keys as keys;
pub use sigtuna_wsse as wsse;
pub use sigtuna_xml as xml;

#[cfg(test)]
mod tests {
    use sigtuna_c14n::C14nMode;
    use sigtuna_ebms::EbmsConfig;

    fn fixture(name: &str) -> std::path::PathBuf {
        std::path::Path::new("../../test-data/keys").join(name)
    }

    fn sample_config() -> EbmsConfig {
        EbmsConfig::from_json(
            r#"{
                "from": { "id": "PDK000592", "type": "urn:fdc:peppol.eu:2017:identifiers:ap" },
                "to": { "id": "PGD000005", "type": "urn:fdc:peppol.eu:2017:identifiers:ap" },
                "agreement_ref": "urn:fdc:peppol.eu:2017:agreements:tia:ap_provider",
                "service": { "value": "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0", "type": "cenbii-procid-ubl" },
                "action": "busdox-docid-qns::urn:oasis:names:specification:ubl:schema:xsd:Invoice-2::Invoice",
                "domain": "ap.example.org",
                "original_sender": { "value": "0096:pdk000592", "type": "iso6523-actorid-upis" },
                "final_recipient": { "value": "9922:ngtbcntrlp1001", "type": "iso6523-actorid-upis" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_sign_verify_pipeline() {
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("sig-2048-cert.pem");
        if !keyfile.exists() || !certfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return;
        }

        let config = sample_config();
        let doc_id = sigtuna_ebms::ids::document_id(&config.domain);
        let envelope = sigtuna_ebms::build_envelope(&config, &doc_id);

        let payload = b"<Invoice>compressed bytes stand in here</Invoice>";
        let doc_digest = sigtuna_wsse::hash::attachment_digest(payload).unwrap();

        let signed = sigtuna_wsse::sign_envelope_with_files(
            envelope.text(),
            &doc_id,
            &doc_digest,
            &keyfile,
            &certfile,
            None,
        )
        .unwrap();

        // The document id must be recoverable from the signed envelope
        assert_eq!(sigtuna_ebms::part_info_href(&signed).unwrap(), doc_id);

        let doc = roxmltree::Document::parse(&signed).unwrap();

        // All three references present, in order
        let uris: Vec<_> = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "Reference")
            .filter_map(|n| n.attribute("URI"))
            .collect();
        assert_eq!(
            uris,
            vec![
                format!("#{}", envelope.body_id()),
                format!("#{}", envelope.messaging_id()),
                doc_id.clone(),
            ]
        );

        // The signature verifies against the certificate in the
        // BinarySecurityToken itself
        let token = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "BinarySecurityToken")
            .unwrap();
        use base64::Engine;
        let engine = base64::engine::general_purpose::STANDARD;
        let cert_der = engine.decode(token.text().unwrap()).unwrap();
        let public = sigtuna_keys::loader::certificate_public_key(&cert_der).unwrap();

        let signed_info = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "SignedInfo")
            .unwrap();
        let canonical = sigtuna_c14n::canonicalize_subtree(
            signed_info,
            C14nMode::Exclusive,
            &["env".to_string()],
        )
        .unwrap();

        let signature_value = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "SignatureValue")
            .unwrap();
        let sig_bytes = engine.decode(signature_value.text().unwrap()).unwrap();

        let alg = sigtuna_crypto::sign::from_uri(sigtuna_core::algorithm::RSA_SHA256).unwrap();
        assert!(alg
            .verify(
                &sigtuna_crypto::SigningKey::RsaPublic(public),
                &canonical,
                &sig_bytes
            )
            .unwrap());

        // And the document digest sits in the attachment reference
        assert!(signed.contains(&format!("<ds:DigestValue>{doc_digest}</ds:DigestValue>")));
    }

    #[test]
    fn test_signing_twice_is_rejected() {
        let keyfile = fixture("sig-2048-key.pem");
        let certfile = fixture("sig-2048-cert.pem");
        if !keyfile.exists() || !certfile.exists() {
            eprintln!("skipping test: key fixtures not found");
            return;
        }
        let config = sample_config();
        let doc_id = sigtuna_ebms::ids::document_id(&config.domain);
        let envelope = sigtuna_ebms::build_envelope(&config, &doc_id);
        let digest = sigtuna_wsse::hash::attachment_digest(b"x").unwrap();
        let signed = sigtuna_wsse::sign_envelope_with_files(
            envelope.text(),
            &doc_id,
            &digest,
            &keyfile,
            &certfile,
            None,
        )
        .unwrap();
        assert!(sigtuna_wsse::sign_envelope_with_files(
            &signed, &doc_id, &digest, &keyfile, &certfile, None
        )
        .is_err());
    }
}
