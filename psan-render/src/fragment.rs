//! Markup fragment writer
//!
//! Writes the review fragment as a flat string of `span` elements and escaped text. Offsets go
//! into `data-*` attributes so the presentation layer can map clicks back to spans. Line breaks in
//! the source text become `<br/>` so the layout matches the original document.

use quick_xml::escape::{escape, partial_escape};

#[derive(Debug, Default)]
pub struct FragmentWriter {
    output: String,
    depth: usize,
    /// Closes issued with nothing open. Nothing is written for them.
    stray: usize,
}

impl FragmentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a `span` with the given classes and numeric `data-*` attributes.
    pub fn open(&mut self, classes: &str, data: &[(&str, usize)]) {
        self.output.push_str("<span class=\"");
        self.output.push_str(&escape(classes));
        self.output.push('"');
        for (name, value) in data {
            self.output.push_str(&format!(" data-{name}=\"{value}\""));
        }
        self.output.push('>');
        self.depth += 1;
    }

    pub fn close(&mut self) {
        if self.depth == 0 {
            self.stray += 1;
            return;
        }
        self.output.push_str("</span>");
        self.depth -= 1;
    }

    pub fn text(&mut self, content: &str) {
        let mut lines = content.split('\n');
        if let Some(first) = lines.next() {
            self.output.push_str(&partial_escape(first));
        }
        for line in lines {
            self.output.push_str("<br/>");
            self.output.push_str(&partial_escape(line));
        }
    }

    /// Elements currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn stray_closes(&self) -> usize {
        self.stray
    }

    /// Every open has been closed, and no close came without an open.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.stray == 0
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_spans() {
        let mut writer = FragmentWriter::new();
        writer.open("token highlight", &[("start", 0), ("end", 4)]);
        writer.open("candidate", &[("start", 0), ("end", 4)]);
        writer.text("Anna");
        writer.close();
        writer.close();
        assert!(writer.is_balanced());
        assert_eq!(
            writer.into_string(),
            r#"<span class="token highlight" data-start="0" data-end="4"><span class="candidate" data-start="0" data-end="4">Anna</span></span>"#
        );
    }

    #[test]
    fn test_text_is_escaped_and_breaks_lines() {
        let mut writer = FragmentWriter::new();
        writer.text("a < b & c\n\"d\"\n");
        assert_eq!(writer.into_string(), "a &lt; b &amp; c<br/>\"d\"<br/>");
    }

    #[test]
    fn test_extra_close_is_not_written() {
        let mut writer = FragmentWriter::new();
        writer.open("token", &[("token", 0)]);
        writer.close();
        writer.close();
        assert_eq!(writer.depth(), 0);
        assert_eq!(writer.stray_closes(), 1);
        assert!(!writer.is_balanced());
        assert_eq!(writer.into_string(), r#"<span class="token" data-token="0"></span>"#);
    }

    #[test]
    fn test_open_element_is_unbalanced() {
        let mut writer = FragmentWriter::new();
        writer.open("candidate", &[("start", 0), ("end", 4)]);
        assert_eq!(writer.depth(), 1);
        assert!(!writer.is_balanced());
    }
}
