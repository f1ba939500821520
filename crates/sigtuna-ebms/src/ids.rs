#![forbid(unsafe_code)]

//! Generated identifiers.
//!
//! Every id is a fresh UUIDv4 in the shape the surrounding standard
//! expects: `wsu:Id` values start with an underscore, message-level
//! ids carry the sender domain, and document ids are `cid:` URIs that
//! double as the MIME Content-ID of the payload part.

use uuid::Uuid;

/// A `wsu:Id` value for Body and Messaging elements.
pub fn wsu_id() -> String {
    format!("_{}", Uuid::new_v4())
}

/// An ebMS MessageId.
pub fn message_id(domain: &str) -> String {
    format!("{}@{}", Uuid::new_v4(), domain)
}

/// An ebMS ConversationId.
pub fn conversation_id(domain: &str) -> String {
    format!("{}@{}", Uuid::new_v4(), domain)
}

/// A `cid:` URI identifying the external document part.
pub fn document_id(domain: &str) -> String {
    format!("cid:{}@{}", Uuid::new_v4(), domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shapes() {
        assert!(wsu_id().starts_with('_'));
        assert!(message_id("ap.example.org").ends_with("@ap.example.org"));
        let doc = document_id("ap.example.org");
        assert!(doc.starts_with("cid:"));
        assert!(doc.ends_with("@ap.example.org"));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(wsu_id(), wsu_id());
        assert_ne!(document_id("d"), document_id("d"));
    }
}
