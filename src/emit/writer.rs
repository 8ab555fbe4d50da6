//! Line writer with indentation tracking
//!
//! Collects generated text as an ordered list of lines. Indentation is applied when the first piece
//! of a line is written, so blank lines never carry trailing whitespace.

use super::Emission;

/// Writer that tracks indentation and builds an [`Emission`]
pub(crate) struct LineWriter {
    /// Completed lines
    lines: Vec<String>,
    /// Line under construction
    current: String,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indentation level
    indent_width: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl LineWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            current: String::new(),
            indent_level: 0,
            indent_width,
            at_line_start: true,
        }
    }

    /// Finish writing; a pending partial line becomes the last line.
    pub fn finish(mut self) -> Emission {
        if !self.at_line_start {
            self.newline();
        }
        Emission::from_lines(self.lines)
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            self.current
                .push_str(&" ".repeat(self.indent_level * self.indent_width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.current.push_str(s);
    }

    /// Write a string and end the line
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// End the current line
    pub fn newline(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.at_line_start = true;
    }

    /// Write an empty line
    pub fn blank_line(&mut self) {
        self.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(writer: LineWriter) -> Vec<String> {
        writer.finish().lines().to_vec()
    }

    #[test]
    fn test_new_writer_empty_output() {
        assert!(lines(LineWriter::new(4)).is_empty());
    }

    #[test]
    fn test_writeln() {
        let mut writer = LineWriter::new(4);
        writer.writeln("class A {");
        writer.writeln("};");
        assert_eq!(lines(writer), vec!["class A {", "};"]);
    }

    #[test]
    fn test_write_pieces_then_newline() {
        let mut writer = LineWriter::new(4);
        writer.write("a");
        writer.write("");
        writer.write("b");
        writer.newline();
        assert_eq!(lines(writer), vec!["ab"]);
    }

    #[test]
    fn test_partial_line_flushed_on_finish() {
        let mut writer = LineWriter::new(4);
        writer.write("tail");
        assert_eq!(lines(writer), vec!["tail"]);
    }

    #[test]
    fn test_indentation() {
        let mut writer = LineWriter::new(4);
        writer.writeln("a");
        writer.indent();
        writer.writeln("b");
        writer.indent();
        writer.writeln("c");
        writer.dedent();
        writer.dedent();
        writer.writeln("d");
        assert_eq!(lines(writer), vec!["a", "    b", "        c", "d"]);
    }

    #[test]
    fn test_custom_indent_width() {
        let mut writer = LineWriter::new(2);
        writer.indent();
        writer.writeln("x");
        assert_eq!(lines(writer), vec!["  x"]);
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut writer = LineWriter::new(4);
        writer.indent();
        writer.writeln("x");
        writer.blank_line();
        writer.writeln("y");
        assert_eq!(lines(writer), vec!["    x", "", "    y"]);
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = LineWriter::new(4);
        writer.dedent();
        writer.writeln("x");
        writer.indent();
        writer.writeln("y");
        assert_eq!(lines(writer), vec!["x", "    y"]);
    }
}
