#![forbid(unsafe_code)]

//! Exclusive Canonical XML 1.0 (exc-C14N).
//!
//! Algorithm URI: `http://www.w3.org/2001/10/xml-exc-c14n#`
//! With comments: `http://www.w3.org/2001/10/xml-exc-c14n#WithComments`
//!
//! Only "visibly utilized" namespace declarations are output.  A namespace
//! is visibly utilized on an element if:
//! 1. Its prefix is used by the element's tag name, OR
//! 2. Its prefix is used by one of the element's attributes, OR
//! 3. The prefix appears in the InclusiveNamespaces PrefixList
//!    (`#default` naming the default namespace).
//!
//! A declaration is rendered only where it differs from what the nearest
//! output ancestor already rendered for the same prefix.
//!
//! roxmltree resolves namespaces but does not keep the authored prefix of
//! a name, so prefixes are recovered from the in-scope bindings (default
//! declaration first, then lowest prefix).  Recovery is exact whenever
//! each namespace URI is bound to a single prefix, which holds for every
//! document this library produces and consumes.

use crate::escape;
use crate::render::{Attr, NsDecl};
use sigtuna_core::{ns, Error};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Canonicalize a whole document using Exclusive C14N 1.0.
pub fn canonicalize(
    doc: &roxmltree::Document<'_>,
    with_comments: bool,
    inclusive_prefixes: &[String],
) -> Result<Vec<u8>, Error> {
    let incl: HashSet<&str> = inclusive_prefixes.iter().map(String::as_str).collect();
    let mut out = Vec::new();
    for child in doc.root().children() {
        process_node(child, with_comments, &incl, &mut out, &BTreeMap::new())?;
    }
    Ok(out)
}

/// Canonicalize a single element subtree using Exclusive C14N 1.0.
///
/// The subtree root starts with an empty rendered-namespace context, so it
/// re-declares every binding it visibly utilizes from its in-scope set.
/// This makes the output independent of whether the element is attached to
/// a larger document or parsed standalone.
pub fn canonicalize_subtree(
    node: roxmltree::Node<'_, '_>,
    with_comments: bool,
    inclusive_prefixes: &[String],
) -> Result<Vec<u8>, Error> {
    if !node.is_element() {
        return Err(Error::Canonicalization(
            "subtree root must be an element".to_string(),
        ));
    }
    let incl: HashSet<&str> = inclusive_prefixes.iter().map(String::as_str).collect();
    let mut out = Vec::new();
    process_element(node, with_comments, &incl, &mut out, &BTreeMap::new())?;
    Ok(out)
}

fn process_node(
    node: roxmltree::Node<'_, '_>,
    with_comments: bool,
    incl: &HashSet<&str>,
    out: &mut Vec<u8>,
    rendered_ns: &BTreeMap<&str, &str>,
) -> Result<(), Error> {
    if node.is_element() {
        return process_element(node, with_comments, incl, out, rendered_ns);
    }

    let at_document_level = node.parent().is_some_and(|p| p.is_root());

    if node.is_text() {
        // Text outside the document element is discarded.
        if !at_document_level {
            if let Some(text) = node.text() {
                out.extend_from_slice(escape::text(text).as_bytes());
            }
        }
    } else if node.is_comment() {
        if with_comments {
            if at_document_level && has_preceding_element(node) {
                out.push(b'\n');
            }
            out.extend_from_slice(b"<!--");
            if let Some(text) = node.text() {
                out.extend_from_slice(text.as_bytes());
            }
            out.extend_from_slice(b"-->");
            if at_document_level && has_following_element(node) {
                out.push(b'\n');
            }
        }
    } else if node.is_pi() {
        if let Some(pi) = node.pi() {
            if at_document_level && has_preceding_element(node) {
                out.push(b'\n');
            }
            out.extend_from_slice(b"<?");
            out.extend_from_slice(pi.target.as_bytes());
            if let Some(value) = pi.value {
                if !value.is_empty() {
                    out.push(b' ');
                    out.extend_from_slice(escape::pi(value).as_bytes());
                }
            }
            out.extend_from_slice(b"?>");
            if at_document_level && has_following_element(node) {
                out.push(b'\n');
            }
        }
    }
    Ok(())
}

fn process_element(
    node: roxmltree::Node<'_, '_>,
    with_comments: bool,
    incl: &HashSet<&str>,
    out: &mut Vec<u8>,
    rendered_ns: &BTreeMap<&str, &str>,
) -> Result<(), Error> {
    let elem_prefix = element_prefix(node)?;

    // Visibly utilized prefixes: tag name, namespaced attributes, PrefixList.
    let mut utilized: BTreeSet<&str> = BTreeSet::new();
    utilized.insert(elem_prefix);
    for attr in node.attributes() {
        if attr.namespace().is_some() {
            utilized.insert(attr_prefix(node, &attr)?);
        }
    }
    for p in incl {
        utilized.insert(if *p == "#default" { "" } else { p });
    }

    let inscope: BTreeMap<&str, &str> = node
        .namespaces()
        .map(|n| (n.name().unwrap_or(""), n.uri()))
        .collect();

    let mut ns_decls: Vec<NsDecl<'_>> = Vec::new();
    for prefix in &utilized {
        if *prefix == "xml" {
            continue;
        }
        if let Some(uri) = inscope.get(prefix) {
            if rendered_ns.get(prefix) != Some(uri) {
                ns_decls.push(NsDecl { prefix, uri });
            }
        } else if prefix.is_empty() {
            // Default namespace no longer in scope: undo an inherited one.
            if rendered_ns.get("").is_some_and(|u| !u.is_empty()) {
                ns_decls.push(NsDecl { prefix: "", uri: "" });
            }
        }
    }
    ns_decls.sort();

    let mut attrs: Vec<Attr<'_>> = Vec::new();
    for attr in node.attributes() {
        let (ns_uri, prefix) = match attr.namespace() {
            None => ("", ""),
            Some(uri) => (uri, attr_prefix(node, &attr)?),
        };
        attrs.push(Attr {
            ns_uri,
            local_name: attr.name(),
            prefix,
            value: attr.value(),
        });
    }
    attrs.sort();

    let local_name = node.tag_name().name();

    out.push(b'<');
    if !elem_prefix.is_empty() {
        out.extend_from_slice(elem_prefix.as_bytes());
        out.push(b':');
    }
    out.extend_from_slice(local_name.as_bytes());
    for decl in &ns_decls {
        decl.render_into(out);
    }
    for attr in &attrs {
        attr.render_into(out);
    }
    out.push(b'>');

    let mut child_rendered = rendered_ns.clone();
    for decl in &ns_decls {
        child_rendered.insert(decl.prefix, decl.uri);
    }
    for child in node.children() {
        process_node(child, with_comments, incl, out, &child_rendered)?;
    }

    out.extend_from_slice(b"</");
    if !elem_prefix.is_empty() {
        out.extend_from_slice(elem_prefix.as_bytes());
        out.push(b':');
    }
    out.extend_from_slice(local_name.as_bytes());
    out.push(b'>');
    Ok(())
}

/// Check if any preceding sibling is an element.
fn has_preceding_element(node: roxmltree::Node<'_, '_>) -> bool {
    let mut sib = node.prev_sibling();
    while let Some(s) = sib {
        if s.is_element() {
            return true;
        }
        sib = s.prev_sibling();
    }
    false
}

/// Check if any following sibling is an element.
fn has_following_element(node: roxmltree::Node<'_, '_>) -> bool {
    let mut sib = node.next_sibling();
    while let Some(s) = sib {
        if s.is_element() {
            return true;
        }
        sib = s.next_sibling();
    }
    false
}

/// Recover the prefix of an element's tag name from its in-scope bindings.
fn element_prefix<'a>(node: roxmltree::Node<'a, '_>) -> Result<&'a str, Error> {
    match node.tag_name().namespace() {
        None => Ok(""),
        Some(uri) if uri == ns::XML => Ok("xml"),
        Some(uri) => {
            let mut named: Option<&str> = None;
            for n in node.namespaces() {
                if n.uri() != uri {
                    continue;
                }
                match n.name() {
                    None => return Ok(""),
                    Some(p) => {
                        if named.map_or(true, |best| p < best) {
                            named = Some(p);
                        }
                    }
                }
            }
            named.ok_or_else(|| {
                Error::Canonicalization(format!("no prefix in scope for namespace {uri}"))
            })
        }
    }
}

/// Recover the prefix of a namespaced attribute.  The default namespace
/// never applies to attributes, so only named bindings qualify.
fn attr_prefix<'a>(
    node: roxmltree::Node<'a, '_>,
    attr: &roxmltree::Attribute<'a, '_>,
) -> Result<&'a str, Error> {
    let uri = match attr.namespace() {
        Some(uri) => uri,
        None => return Ok(""),
    };
    if uri == ns::XML {
        return Ok("xml");
    }
    let mut best: Option<&str> = None;
    for n in node.namespaces() {
        if n.uri() != uri {
            continue;
        }
        if let Some(p) = n.name() {
            if !p.is_empty() && best.map_or(true, |b| p < b) {
                best = Some(p);
            }
        }
    }
    best.ok_or_else(|| {
        Error::Canonicalization(format!(
            "no prefix in scope for attribute namespace {uri}"
        ))
    })
}
