//! Line-oriented output buffer.

use super::LineEnding;

/// Append-only Markdown buffer that terminates every line consistently.
#[derive(Debug)]
pub(crate) struct MarkdownWriter {
    buffer: String,
    newline: &'static str,
}

impl MarkdownWriter {
    pub(crate) fn new(line_ending: LineEnding) -> Self {
        Self {
            buffer: String::new(),
            newline: line_ending.as_str(),
        }
    }

    /// Append `text` followed by a line terminator.
    pub(crate) fn line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push_str(self.newline);
    }

    pub(crate) fn blank_line(&mut self) {
        self.buffer.push_str(self.newline);
    }

    pub(crate) fn newline(&self) -> &'static str {
        self.newline
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_use_the_configured_terminator() {
        let mut out = MarkdownWriter::new(LineEnding::CrLf);
        out.line("a");
        out.blank_line();
        out.line("b");
        assert_eq!(out.finish(), "a\r\n\r\nb\r\n");
    }
}
