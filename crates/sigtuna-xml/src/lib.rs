#![forbid(unsafe_code)]

//! XML document handling for the Sigtuna AS4 signing library.
//!
//! Provides an owned document wrapper over `roxmltree`, the
//! pretty-printing writer used for envelope construction, element
//! detachment for digest computation, and the [`CanonicalXml`] fragment
//! type the signing pipeline passes around.

pub mod canonical;
pub mod detach;
pub mod document;
pub mod writer;

pub use canonical::CanonicalXml;
pub use detach::detach_element;
pub use document::XmlDocument;
pub use writer::XmlWriter;

/// Return roxmltree parsing options that allow DTD.
///
/// Some producers emit a DOCTYPE before the envelope; roxmltree does
/// not fetch external entities either way.
pub fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    }
}
