#![forbid(unsafe_code)]

//! Pretty-printing XML writer for envelope construction.
//!
//! The output format is the serialization contract of this library:
//! two-space indentation, each child element on its own line, text-only
//! elements rendered inline, empty elements self-closed, no XML
//! declaration, and a trailing newline after the root element.
//! Attributes keep insertion order.  The signing pipeline depends on
//! this exact shape because digest input includes the indentation
//! whitespace between elements.

/// A streaming pretty-printing XML writer.
///
/// An element may carry either text or child elements, never both.
pub struct XmlWriter {
    out: String,
    stack: Vec<Frame>,
}

struct Frame {
    name: String,
    tag_open: bool,
    has_text: bool,
}

impl XmlWriter {
    /// Create a new XML writer.
    pub fn new() -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
        }
    }

    /// Start an element with the given name and attributes.
    pub fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.close_pending_tag();
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            push_escaped_attr(&mut self.out, value);
            self.out.push('"');
        }
        self.stack.push(Frame {
            name: name.to_owned(),
            tag_open: true,
            has_text: false,
        });
    }

    /// Write an element with no content: `<name attrs/>`.
    pub fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_element(name, attrs);
        self.end_element();
    }

    /// Write an element whose only content is text: `<name>text</name>`.
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) {
        self.start_element(name, attrs);
        self.write_text(text);
        self.end_element();
    }

    /// Write text content into the current element.
    pub fn write_text(&mut self, text: &str) {
        if let Some(frame) = self.stack.last_mut() {
            if frame.tag_open {
                self.out.push('>');
                frame.tag_open = false;
            }
            frame.has_text = true;
        }
        push_escaped_text(&mut self.out, text);
    }

    /// End the current element.
    pub fn end_element(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if frame.tag_open {
            self.out.push_str("/>\n");
        } else if frame.has_text {
            self.out.push_str("</");
            self.out.push_str(&frame.name);
            self.out.push_str(">\n");
        } else {
            for _ in 0..self.stack.len() {
                self.out.push_str("  ");
            }
            self.out.push_str("</");
            self.out.push_str(&frame.name);
            self.out.push_str(">\n");
        }
    }

    /// Finish writing and return the XML as a string.
    pub fn into_string(self) -> String {
        self.out
    }

    fn close_pending_tag(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            if frame.tag_open {
                self.out.push_str(">\n");
                frame.tag_open = false;
            }
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.out.push_str("  ");
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
