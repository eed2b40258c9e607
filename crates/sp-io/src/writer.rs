use std::fmt::{Display, Write as _};

use quick_xml::escape::escape;

/// Accumulates the tab-indented textual form of a map.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buffer: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declaration(&mut self) {
        self.buffer
            .push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    }

    pub fn open(&mut self, indent: usize, tag: &str) -> &mut Self {
        self.indent(indent);
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self
    }

    pub fn attr(&mut self, name: &str, value: impl Display) -> &mut Self {
        let raw = value.to_string();
        let escaped = escape(raw.as_str());
        let _ = write!(self.buffer, " {}=\"", name);
        for ch in escaped.chars() {
            match ch {
                '\n' => self.buffer.push_str("&#10;"),
                '\r' => self.buffer.push_str("&#13;"),
                '\t' => self.buffer.push_str("&#9;"),
                other => self.buffer.push(other),
            }
        }
        self.buffer.push('"');
        self
    }

    pub fn attr_if(&mut self, include: bool, name: &str, value: impl Display) -> &mut Self {
        if include {
            self.attr(name, value);
        }
        self
    }

    pub fn attr_nonempty(&mut self, name: &str, value: &str) -> &mut Self {
        self.attr_if(!value.is_empty(), name, value)
    }

    pub fn close_empty(&mut self) {
        self.buffer.push_str(" />\n");
    }

    pub fn close_start(&mut self) {
        self.buffer.push_str(">\n");
    }

    /// Ends the start tag, writes `text` and the end tag on the same line.
    pub fn close_with_text(&mut self, tag: &str, text: &str) {
        self.buffer.push('>');
        self.buffer.push_str(&escape(text));
        let _ = writeln!(self.buffer, "</{}>", tag);
    }

    pub fn end(&mut self, indent: usize, tag: &str) {
        self.indent(indent);
        let _ = writeln!(self.buffer, "</{}>", tag);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    fn indent(&mut self, indent: usize) {
        for _ in 0..indent {
            self.buffer.push('\t');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_indented_empty_elements() {
        let mut out = XmlWriter::new();
        out.open(2, "hill").attr("id", 3).attr_nonempty("image", "").close_empty();
        assert_eq!(out.as_str(), "\t\t<hill id=\"3\" />\n");
    }

    #[test]
    fn escapes_attribute_and_text_content() {
        let mut out = XmlWriter::new();
        out.open(0, "text")
            .attr("note", "a \"b\" & <c>\nd")
            .close_with_text("text", "x < y & z");
        assert_eq!(
            out.as_str(),
            "<text note=\"a &quot;b&quot; &amp; &lt;c&gt;&#10;d\">x &lt; y &amp; z</text>\n"
        );
    }

    #[test]
    fn composite_elements_close_on_their_own_line() {
        let mut out = XmlWriter::new();
        out.open(0, "row").attr("index", 0).close_start();
        out.open(1, "tile").close_empty();
        out.end(0, "row");
        assert_eq!(
            out.into_string(),
            "<row index=\"0\">\n\t<tile />\n</row>\n"
        );
    }
}
