#![forbid(unsafe_code)]

//! XML namespace constants used across the library.

/// SOAP 1.2 envelope namespace
pub const ENV: &str = "http://www.w3.org/2003/05/soap-envelope";

/// ebMS 3.0 core namespace
pub const EBMS: &str = "http://docs.oasis-open.org/ebxml-msg/ebms/v3.0/ns/core/200704/";

/// XML Digital Signature namespace
pub const DSIG: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XML Encryption namespace
pub const ENC: &str = "http://www.w3.org/2001/04/xmlenc#";

/// WS-Security security extension namespace
pub const WSSE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

/// WS-Security utility namespace
pub const WSU: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";

/// Exclusive C14N namespace
pub const EXC_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";

/// XML namespace
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";

// ── WS-Security token profile URIs ───────────────────────────────────

/// EncodingType for base64-encoded binary security tokens
pub const BASE64_BINARY: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-soap-message-security-1.0#Base64Binary";

/// ValueType for X.509 v3 certificate tokens
pub const X509_V3: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-x509-token-profile-1.0#X509v3";

// ── ebMS role URIs ───────────────────────────────────────────────────

pub const ROLE_INITIATOR: &str =
    "http://docs.oasis-open.org/ebxml-msg/ebms/v3.0/ns/core/200704/initiator";
pub const ROLE_RESPONDER: &str =
    "http://docs.oasis-open.org/ebxml-msg/ebms/v3.0/ns/core/200704/responder";

// ── Element names ────────────────────────────────────────────────────

pub mod node {
    // SOAP elements
    pub const ENVELOPE: &str = "Envelope";
    pub const HEADER: &str = "Header";
    pub const BODY: &str = "Body";

    // ebMS Messaging elements
    pub const MESSAGING: &str = "Messaging";
    pub const USER_MESSAGE: &str = "UserMessage";
    pub const MESSAGE_INFO: &str = "MessageInfo";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const MESSAGE_ID: &str = "MessageId";
    pub const PARTY_INFO: &str = "PartyInfo";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const PARTY_ID: &str = "PartyId";
    pub const ROLE: &str = "Role";
    pub const COLLABORATION_INFO: &str = "CollaborationInfo";
    pub const AGREEMENT_REF: &str = "AgreementRef";
    pub const SERVICE: &str = "Service";
    pub const ACTION: &str = "Action";
    pub const CONVERSATION_ID: &str = "ConversationId";
    pub const MESSAGE_PROPERTIES: &str = "MessageProperties";
    pub const PROPERTY: &str = "Property";
    pub const PAYLOAD_INFO: &str = "PayloadInfo";
    pub const PART_INFO: &str = "PartInfo";
    pub const PART_PROPERTIES: &str = "PartProperties";

    // WS-Security elements
    pub const SECURITY: &str = "Security";
    pub const BINARY_SECURITY_TOKEN: &str = "BinarySecurityToken";
    pub const SECURITY_TOKEN_REFERENCE: &str = "SecurityTokenReference";

    // DSig elements
    pub const SIGNATURE: &str = "Signature";
    pub const SIGNED_INFO: &str = "SignedInfo";
    pub const CANONICALIZATION_METHOD: &str = "CanonicalizationMethod";
    pub const SIGNATURE_METHOD: &str = "SignatureMethod";
    pub const SIGNATURE_VALUE: &str = "SignatureValue";
    pub const DIGEST_METHOD: &str = "DigestMethod";
    pub const DIGEST_VALUE: &str = "DigestValue";
    pub const REFERENCE: &str = "Reference";
    pub const TRANSFORMS: &str = "Transforms";
    pub const TRANSFORM: &str = "Transform";
    pub const KEY_INFO: &str = "KeyInfo";
    pub const INCLUSIVE_NAMESPACES: &str = "InclusiveNamespaces";

    // Encryption bookkeeping elements
    pub const ENCRYPTED_KEY: &str = "EncryptedKey";
    pub const ENCRYPTED_DATA: &str = "EncryptedData";
    pub const REFERENCE_LIST: &str = "ReferenceList";
    pub const DATA_REFERENCE: &str = "DataReference";
}

// ── Attribute names ──────────────────────────────────────────────────

pub mod attr {
    pub const ID: &str = "Id";
    pub const URI: &str = "URI";
    pub const TYPE: &str = "type";
    pub const NAME: &str = "name";
    pub const HREF: &str = "href";
    pub const ALGORITHM: &str = "Algorithm";
    pub const VALUE_TYPE: &str = "ValueType";
    pub const ENCODING_TYPE: &str = "EncodingType";
    // wsse-namespaced attribute on SecurityTokenReference
    pub const TOKEN_TYPE: &str = "TokenType";
    pub const MUST_UNDERSTAND: &str = "mustUnderstand";
    pub const PREFIX_LIST: &str = "PrefixList";
}

// ── Fixed namespace prefixes ─────────────────────────────────────────

// Verifiers in the wild match these prefixes textually, so they are part
// of the wire contract, not a serialization choice.
pub mod prefix {
    pub const ENV: &str = "env";
    pub const EBMS: &str = "ns2";
    pub const DSIG: &str = "ds";
    pub const WSSE: &str = "wsse";
    pub const WSU: &str = "wsu";
    pub const EXC_C14N: &str = "ec";
    pub const ENC: &str = "xenc";
}
