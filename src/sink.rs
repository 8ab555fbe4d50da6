//! Output sinks
//!
//! An [`OutputSink`] is the consumer side of an emission: it receives lines in order and owns the
//! destination. The caller creates the sink before emitting and calls [`OutputSink::flush`] after.

use std::io::{self, Write};

/// Append-only, line-oriented text destination
pub trait OutputSink {
    /// Append one line (without terminator).
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Push buffered output to the destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that keeps lines in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the collected lines, each terminated by `\n`.
    pub fn into_string(self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

impl OutputSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// Sink over any [`io::Write`] (stdout, a file, a buffer)
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_lines() {
        let mut sink = MemorySink::new();
        sink.write_line("a").unwrap();
        sink.write_line("").unwrap();
        sink.write_line("b").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.lines(), ["a", "", "b"]);
        assert_eq!(sink.into_string(), "a\n\nb\n");
    }

    #[test]
    fn test_writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("class A {").unwrap();
        sink.write_line("};").unwrap();
        sink.flush().unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "class A {\n};\n");
    }

    #[test]
    fn test_sinks_are_interchangeable() {
        fn fill(sink: &mut dyn OutputSink) {
            sink.write_line("x").unwrap();
        }
        let mut memory = MemorySink::new();
        let mut writer = WriterSink::new(Vec::new());
        fill(&mut memory);
        fill(&mut writer);
        assert_eq!(memory.into_string().as_bytes(), writer.into_inner().as_slice());
    }
}
