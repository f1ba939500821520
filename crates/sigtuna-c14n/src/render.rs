#![forbid(unsafe_code)]

//! Shared rendering utilities for C14N output.
//!
//! Both types borrow from the parsed document; canonicalization never
//! copies names or values just to sort them.

use crate::escape;

/// A namespace declaration to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NsDecl<'a> {
    /// The prefix ("" for the default namespace).
    pub prefix: &'a str,
    /// The namespace URI ("" renders the `xmlns=""` un-declaration).
    pub uri: &'a str,
}

impl NsDecl<'_> {
    /// Render this namespace declaration into the output buffer.
    pub fn render_into(&self, out: &mut Vec<u8>) {
        out.push(b' ');
        out.extend_from_slice(b"xmlns");
        if !self.prefix.is_empty() {
            out.push(b':');
            out.extend_from_slice(self.prefix.as_bytes());
        }
        out.extend_from_slice(b"=\"");
        out.extend_from_slice(escape::attr(self.uri).as_bytes());
        out.push(b'"');
    }
}

impl Ord for NsDecl<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Default namespace (empty prefix) sorts first, then by prefix.
        match (self.prefix.is_empty(), other.prefix.is_empty()) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => self.prefix.cmp(other.prefix),
        }
    }
}

impl PartialOrd for NsDecl<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// An attribute to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr<'a> {
    /// The namespace URI of the attribute ("" for no namespace).
    pub ns_uri: &'a str,
    /// The local name.
    pub local_name: &'a str,
    /// The prefix as rendered ("" for unprefixed attributes).
    pub prefix: &'a str,
    /// The attribute value.
    pub value: &'a str,
}

impl Attr<'_> {
    /// Render this attribute into the output buffer.
    pub fn render_into(&self, out: &mut Vec<u8>) {
        out.push(b' ');
        if !self.prefix.is_empty() {
            out.extend_from_slice(self.prefix.as_bytes());
            out.push(b':');
        }
        out.extend_from_slice(self.local_name.as_bytes());
        out.extend_from_slice(b"=\"");
        out.extend_from_slice(escape::attr(self.value).as_bytes());
        out.push(b'"');
    }
}

impl Ord for Attr<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Attributes with no namespace come before those with a namespace.
        // Among those with namespaces, sort by (ns_uri, local_name).
        // Among those without, sort by local_name.
        match (self.ns_uri.is_empty(), other.ns_uri.is_empty()) {
            (true, true) => self.local_name.cmp(other.local_name),
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            (false, false) => self
                .ns_uri
                .cmp(other.ns_uri)
                .then(self.local_name.cmp(other.local_name)),
        }
    }
}

impl PartialOrd for Attr<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
