#![forbid(unsafe_code)]

//! Messaging configuration.
//!
//! Everything the ebMS UserMessage carries that is not generated per
//! message comes from here: party identifiers, collaboration info,
//! routing properties, and the domain used in generated ids.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sigtuna_core::{ns, Error, Result};

/// One side of the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// PartyId text, e.g. `PDK000592`.
    pub id: String,
    /// PartyId type attribute.
    #[serde(rename = "type")]
    pub id_type: String,
    /// Role URI. Defaults to the ebMS initiator/responder role
    /// depending on which side the party is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// The CollaborationInfo Service element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub value: String,
    #[serde(rename = "type")]
    pub service_type: String,
}

/// A routing property (originalSender / finalRecipient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageProperty {
    pub value: String,
    #[serde(rename = "type")]
    pub property_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbmsConfig {
    pub from: Party,
    pub to: Party,
    pub agreement_ref: String,
    pub service: Service,
    pub action: String,
    /// Domain suffix for generated MessageId / ConversationId /
    /// document ids, e.g. `ap.example.org`.
    pub domain: String,
    pub original_sender: MessageProperty,
    pub final_recipient: MessageProperty,
    #[serde(default = "default_compression_type")]
    pub compression_type: String,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_compression_type() -> String {
    "application/gzip".to_string()
}

fn default_mime_type() -> String {
    "application/xml".to_string()
}

impl EbmsConfig {
    /// Parse a configuration from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Check that no required identifier is empty.
    pub fn validate(&self) -> Result<()> {
        require(&self.from.id, "from.id")?;
        require(&self.from.id_type, "from.type")?;
        require(&self.to.id, "to.id")?;
        require(&self.to.id_type, "to.type")?;
        require(&self.agreement_ref, "agreement_ref")?;
        require(&self.service.value, "service.value")?;
        require(&self.service.service_type, "service.type")?;
        require(&self.action, "action")?;
        require(&self.domain, "domain")?;
        require(&self.original_sender.value, "original_sender.value")?;
        require(&self.final_recipient.value, "final_recipient.value")?;
        Ok(())
    }

    /// Role URI for the From party.
    pub fn from_role(&self) -> &str {
        self.from.role.as_deref().unwrap_or(ns::ROLE_INITIATOR)
    }

    /// Role URI for the To party.
    pub fn to_role(&self) -> &str {
        self.to.role.as_deref().unwrap_or(ns::ROLE_RESPONDER)
    }
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{field} must not be empty")));
    }
    Ok(())
}
