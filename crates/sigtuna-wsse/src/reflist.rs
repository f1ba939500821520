#![forbid(unsafe_code)]

//! EncryptedKey reference bookkeeping.
//!
//! When payload parts are encrypted, the `xenc:EncryptedKey` in the
//! Security header lists every `xenc:EncryptedData` it unlocks through
//! a single `xenc:ReferenceList`. Only the bookkeeping lives here; the
//! encryption itself is out of scope.

use sigtuna_core::ns;

/// An EncryptedData element, tracked by its `Id`.
#[derive(Debug, Clone, Default)]
pub struct EncryptedData {
    pub id: Option<String>,
}

impl EncryptedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the element's `Id`, generating one if absent.
    pub fn ensure_id(&mut self) -> &str {
        self.id
            .get_or_insert_with(|| format!("_{}", uuid::Uuid::new_v4()))
    }
}

/// The ReferenceList inside an EncryptedKey.
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    /// DataReference URIs, in insertion order.
    pub data_references: Vec<String>,
}

/// An EncryptedKey element, reduced to the parts the reference
/// bookkeeping needs.
#[derive(Debug, Clone, Default)]
pub struct EncryptedKey {
    pub id: Option<String>,
    pub reference_list: Option<ReferenceList>,
}

impl EncryptedKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ReferenceList, creating it on first use. Calling
    /// this repeatedly never creates a second list.
    pub fn ensure_reference_list(&mut self) -> &mut ReferenceList {
        self.reference_list.get_or_insert_with(ReferenceList::default)
    }

    /// Register one EncryptedData with this key, giving the data an
    /// `Id` if it has none, and return the DataReference URI that was
    /// added.
    pub fn add_data_reference(&mut self, data: &mut EncryptedData) -> String {
        let uri = format!("#{}", data.ensure_id());
        self.ensure_reference_list().data_references.push(uri.clone());
        uri
    }

    /// Serialize the ReferenceList fragment, if any references exist.
    pub fn reference_list_xml(&self) -> Option<String> {
        let list = self.reference_list.as_ref()?;
        if list.data_references.is_empty() {
            return None;
        }
        let mut out = format!(
            "<{p}:ReferenceList xmlns:{p}=\"{uri}\">",
            p = ns::prefix::ENC,
            uri = ns::ENC
        );
        for data_ref in &list.data_references {
            let escaped = sigtuna_c14n::escape::attr(data_ref);
            out.push_str(&format!(
                "<{p}:DataReference URI=\"{escaped}\"></{p}:DataReference>",
                p = ns::prefix::ENC
            ));
        }
        out.push_str(&format!("</{p}:ReferenceList>", p = ns::prefix::ENC));
        Some(out)
    }
}
