#![forbid(unsafe_code)]

//! BinarySecurityToken and KeyInfo fragments.
//!
//! Both fragments carry explicit `wsse`/`wsu`/`ds` prefix declarations
//! so the spliced envelope never depends on prefixes invented at
//! serialization time.

use sigtuna_core::ns;

/// A BinarySecurityToken fragment and the `wsu:Id` it carries.
pub struct SecurityToken {
    pub id: String,
    pub xml: String,
}

/// Build a BinarySecurityToken holding the base64 of a DER
/// certificate, with a fresh `BST-{uuid}` id.
pub fn build_token(cert_der: &[u8]) -> SecurityToken {
    build_token_with_id(cert_der, format!("BST-{}", uuid::Uuid::new_v4()))
}

/// Build a BinarySecurityToken with a caller-chosen id.
pub fn build_token_with_id(cert_der: &[u8], id: String) -> SecurityToken {
    use base64::Engine;
    let engine = base64::engine::general_purpose::STANDARD;
    let cert_b64 = engine.encode(cert_der);
    let xml = format!(
        "<wsse:BinarySecurityToken xmlns:wsse=\"{wsse}\" xmlns:wsu=\"{wsu}\" \
         EncodingType=\"{encoding}\" ValueType=\"{value_type}\" wsu:Id=\"{id}\">\
         {cert_b64}</wsse:BinarySecurityToken>",
        wsse = ns::WSSE,
        wsu = ns::WSU,
        encoding = ns::BASE64_BINARY,
        value_type = ns::X509_V3,
    );
    SecurityToken { id, xml }
}

/// Build the KeyInfo fragment pointing at a BinarySecurityToken.
pub fn build_key_info(token_id: &str) -> String {
    format!(
        "<ds:KeyInfo xmlns:ds=\"{ds}\">\
         <wsse:SecurityTokenReference xmlns:wsse=\"{wsse}\" wsse:TokenType=\"{x509}\">\
         <wsse:Reference ValueType=\"{x509}\" URI=\"#{token_id}\"></wsse:Reference>\
         </wsse:SecurityTokenReference></ds:KeyInfo>",
        ds = ns::DSIG,
        wsse = ns::WSSE,
        x509 = ns::X509_V3,
    )
}
