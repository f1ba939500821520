#![forbid(unsafe_code)]

//! SOAP envelope construction.
//!
//! Builds the unsigned AS4 envelope: an ebMS Messaging header with one
//! UserMessage, an empty `wsse:Security` header for the signing step
//! to fill, and an empty Body. Messaging and Body each carry a fresh
//! `wsu:Id` so the signature can reference them. The serialized text
//! is the artifact; the signing step works on these exact bytes.

use chrono::{Local, SecondsFormat};
use sigtuna_core::{ns, Error, Result};
use sigtuna_xml::{XmlDocument, XmlWriter};

use crate::config::EbmsConfig;
use crate::ids;

/// A built envelope and the generated ids a caller needs afterwards.
#[derive(Debug, Clone)]
pub struct Envelope {
    text: String,
    body_id: String,
    messaging_id: String,
    message_id: String,
    conversation_id: String,
}

impl Envelope {
    /// The serialized envelope.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// `wsu:Id` of the Body element.
    pub fn body_id(&self) -> &str {
        &self.body_id
    }

    /// `wsu:Id` of the Messaging element.
    pub fn messaging_id(&self) -> &str {
        &self.messaging_id
    }

    /// The ebMS MessageId.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// The ebMS ConversationId.
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }
}

/// Build an unsigned envelope for one external document.
///
/// `doc_id` is the `cid:` URI of the payload part, as produced by
/// [`ids::document_id`]; it lands in `PartInfo/@href` and later in the
/// signature's attachment reference.
pub fn build_envelope(config: &EbmsConfig, doc_id: &str) -> Envelope {
    let body_id = ids::wsu_id();
    let messaging_id = ids::wsu_id();
    let message_id = ids::message_id(&config.domain);
    let conversation_id = ids::conversation_id(&config.domain);
    let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Micros, false);

    let mut w = XmlWriter::new();
    w.start_element("env:Envelope", &[("xmlns:env", ns::ENV)]);
    w.start_element("env:Header", &[]);

    w.start_element(
        "ns2:Messaging",
        &[
            ("xmlns:ns2", ns::EBMS),
            ("xmlns:wsu", ns::WSU),
            ("env:mustUnderstand", "true"),
            ("wsu:Id", &messaging_id),
        ],
    );
    write_user_message(
        &mut w,
        config,
        doc_id,
        &timestamp,
        &message_id,
        &conversation_id,
    );
    w.end_element(); // ns2:Messaging

    w.empty_element(
        "wsse:Security",
        &[("xmlns:wsse", ns::WSSE), ("env:mustUnderstand", "true")],
    );
    w.end_element(); // env:Header

    w.empty_element(
        "env:Body",
        &[("xmlns:wsu", ns::WSU), ("wsu:Id", &body_id)],
    );
    w.end_element(); // env:Envelope

    Envelope {
        text: w.into_string(),
        body_id,
        messaging_id,
        message_id,
        conversation_id,
    }
}

/// Read the document id back out of an envelope's `PartInfo/@href`.
pub fn part_info_href(envelope_text: &str) -> Result<String> {
    let doc =
        roxmltree::Document::parse_with_options(envelope_text, sigtuna_xml::parsing_options())
            .map_err(|e| Error::XmlParse(e.to_string()))?;
    let part_info = XmlDocument::find_element(&doc, ns::EBMS, ns::node::PART_INFO)
        .ok_or_else(|| Error::MissingElement("eb:PartInfo".into()))?;
    part_info
        .attribute(ns::attr::HREF)
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingAttribute("href on eb:PartInfo".into()))
}

fn write_user_message(
    w: &mut XmlWriter,
    config: &EbmsConfig,
    doc_id: &str,
    timestamp: &str,
    message_id: &str,
    conversation_id: &str,
) {
    w.start_element("ns2:UserMessage", &[]);

    w.start_element("ns2:MessageInfo", &[]);
    w.text_element("ns2:Timestamp", &[], timestamp);
    w.text_element("ns2:MessageId", &[], message_id);
    w.end_element();

    w.start_element("ns2:PartyInfo", &[]);
    w.start_element("ns2:From", &[]);
    w.text_element("ns2:PartyId", &[("type", &config.from.id_type)], &config.from.id);
    w.text_element("ns2:Role", &[], config.from_role());
    w.end_element();
    w.start_element("ns2:To", &[]);
    w.text_element("ns2:PartyId", &[("type", &config.to.id_type)], &config.to.id);
    w.text_element("ns2:Role", &[], config.to_role());
    w.end_element();
    w.end_element(); // ns2:PartyInfo

    w.start_element("ns2:CollaborationInfo", &[]);
    w.text_element("ns2:AgreementRef", &[], &config.agreement_ref);
    w.text_element(
        "ns2:Service",
        &[("type", &config.service.service_type)],
        &config.service.value,
    );
    w.text_element("ns2:Action", &[], &config.action);
    w.text_element("ns2:ConversationId", &[], conversation_id);
    w.end_element();

    w.start_element("ns2:MessageProperties", &[]);
    w.text_element(
        "ns2:Property",
        &[
            ("name", "originalSender"),
            ("type", &config.original_sender.property_type),
        ],
        &config.original_sender.value,
    );
    w.text_element(
        "ns2:Property",
        &[
            ("name", "finalRecipient"),
            ("type", &config.final_recipient.property_type),
        ],
        &config.final_recipient.value,
    );
    w.end_element();

    w.start_element("ns2:PayloadInfo", &[]);
    w.start_element("ns2:PartInfo", &[("href", doc_id)]);
    w.start_element("ns2:PartProperties", &[]);
    w.text_element("ns2:Property", &[("name", "CompressionType")], &config.compression_type);
    w.text_element("ns2:Property", &[("name", "MimeType")], &config.mime_type);
    w.end_element(); // ns2:PartProperties
    w.end_element(); // ns2:PartInfo
    w.end_element(); // ns2:PayloadInfo

    w.end_element(); // ns2:UserMessage
}
