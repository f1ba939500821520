#![forbid(unsafe_code)]

//! Element detachment: slice one element's markup out of its document as
//! a standalone, re-parseable fragment.
//!
//! The fragment is taken verbatim from the document text (the signing
//! pipeline must never re-serialize signed content), then adjusted in two
//! ways that do not alter its canonical form:
//! - namespace bindings inherited from ancestors are declared on the
//!   fragment root, so the fragment parses on its own;
//! - the indentation the element carried at its original depth is
//!   stripped, leaving the fragment at column zero.

use sigtuna_core::Error;
use std::collections::HashSet;

/// Detach an element from `text`, which must be the exact string the
/// node's document was parsed from.
pub fn detach_element(text: &str, node: roxmltree::Node<'_, '_>) -> Result<String, Error> {
    if !node.is_element() {
        return Err(Error::XmlStructure(
            "only elements can be detached".to_string(),
        ));
    }
    let range = node.range();
    let fragment = text.get(range.clone()).ok_or_else(|| {
        Error::XmlStructure("node range does not match document text".to_string())
    })?;

    let mut fragment = fragment.to_string();
    materialize_inherited_ns(&mut fragment, node)?;

    let column = indent_column(text, range.start);
    if column == 0 {
        return Ok(fragment);
    }

    let mut out = String::with_capacity(fragment.len());
    for (i, line) in fragment.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            let strip = line
                .bytes()
                .take_while(|b| *b == b' ')
                .count()
                .min(column);
            out.push_str(&line[strip..]);
        } else {
            out.push_str(line);
        }
    }
    Ok(out)
}

/// Column at which the byte at `pos` sits, counting only a run of spaces
/// back to the start of its line.  Anything but spaces means column zero.
fn indent_column(text: &str, pos: usize) -> usize {
    let before = &text[..pos];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &before[line_start..];
    if !prefix.is_empty() && prefix.bytes().all(|b| b == b' ') {
        prefix.len()
    } else {
        0
    }
}

/// Declare on the fragment root every namespace binding the element
/// inherits from its ancestors, skipping any prefix the start tag already
/// declares literally.
fn materialize_inherited_ns(
    fragment: &mut String,
    node: roxmltree::Node<'_, '_>,
) -> Result<(), Error> {
    let parent = match node.parent() {
        Some(p) if p.is_element() => p,
        _ => return Ok(()),
    };
    let parent_ns: HashSet<(Option<&str>, &str)> =
        parent.namespaces().map(|n| (n.name(), n.uri())).collect();

    let tag_end = fragment.find('>').unwrap_or(fragment.len());
    let start_tag = &fragment[..tag_end];

    let mut decls: Vec<(&str, &str)> = Vec::new();
    for n in node.namespaces() {
        if n.name() == Some("xml") {
            continue;
        }
        // Bindings also in scope on the parent were inherited, not
        // declared here.
        if !parent_ns.contains(&(n.name(), n.uri())) {
            continue;
        }
        let prefix = n.name().unwrap_or("");
        let literal = if prefix.is_empty() {
            " xmlns=".to_string()
        } else {
            format!(" xmlns:{prefix}=")
        };
        if start_tag.contains(&literal) {
            continue;
        }
        decls.push((prefix, n.uri()));
    }
    if decls.is_empty() {
        return Ok(());
    }
    decls.sort();

    let name_end = fragment[1..]
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .map(|i| i + 1)
        .ok_or_else(|| Error::XmlStructure("malformed start tag".to_string()))?;

    let mut insert = String::new();
    for (prefix, uri) in decls {
        if prefix.is_empty() {
            insert.push_str(&format!(" xmlns=\"{}\"", escape_attr(uri)));
        } else {
            insert.push_str(&format!(" xmlns:{}=\"{}\"", prefix, escape_attr(uri)));
        }
    }
    fragment.insert_str(name_end, &insert);
    Ok(())
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('"', "&quot;")
}
