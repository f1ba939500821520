#![forbid(unsafe_code)]

//! Entity escaping for C14N output.
//!
//! Per the C14N spec:
//! - Text nodes: `&` → `&amp;`, `<` → `&lt;`, `>` → `&gt;`, `\r` → `&#xD;`
//! - Attribute values: additionally `"` → `&quot;`, `\t` → `&#x9;`, `\n` → `&#xA;`
//! - PI data: `\r` → `&#xD;`

use std::borrow::Cow;

fn escape_with(s: &str, needs_escape: fn(char) -> bool, push: fn(char, &mut String)) -> Cow<'_, str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        if needs_escape(ch) {
            push(ch, &mut out);
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Escape text node content per C14N rules.
pub fn text(s: &str) -> Cow<'_, str> {
    escape_with(
        s,
        |ch| matches!(ch, '&' | '<' | '>' | '\r'),
        |ch, out| {
            out.push_str(match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                _ => "&#xD;",
            })
        },
    )
}

/// Escape attribute value per C14N rules.
pub fn attr(s: &str) -> Cow<'_, str> {
    escape_with(
        s,
        |ch| matches!(ch, '&' | '<' | '"' | '\t' | '\n' | '\r'),
        |ch, out| {
            out.push_str(match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '"' => "&quot;",
                '\t' => "&#x9;",
                '\n' => "&#xA;",
                _ => "&#xD;",
            })
        },
    )
}

/// Escape processing instruction data.
pub fn pi(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace('\r', "&#xD;"))
    } else {
        Cow::Borrowed(s)
    }
}
