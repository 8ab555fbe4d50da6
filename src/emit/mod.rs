//! Text emitters for callback proxies
//!
//! Two independent generators turn a list of [`MethodDescriptor`]s into source text:
//!
//! - [`ProxyClassEmitter`] - the C++ class that stores one function pointer per callback and forwards
//!   each virtual method through it
//! - [`DeclarationEmitter`] - the Cython `cdef cppclass` block exposing the same typedefs and setters
//!
//! Emitters are pure: they return an [`Emission`] and never touch I/O. Writing is left to an
//! [`OutputSink`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod declaration;
mod proxy_class;
pub mod signature;
mod writer;

use std::fmt;
use std::io;

pub use config::{ConstructorName, EmitConfig};
pub use declaration::DeclarationEmitter;
pub use proxy_class::ProxyClassEmitter;

use crate::descriptor::MethodDescriptor;
use crate::sink::OutputSink;

/// Generated text as an ordered list of lines (without line terminators)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emission {
    lines: Vec<String>,
}

impl Emission {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append every line to `sink`, in order.
    pub fn write_to(&self, sink: &mut dyn OutputSink) -> io::Result<()> {
        for line in &self.lines {
            sink.write_line(line)?;
        }
        Ok(())
    }
}

/// Renders each line followed by `\n`.
impl fmt::Display for Emission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Emit a C++ proxy class with the default configuration.
pub fn emit_proxy_class(proxy: &str, parent: &str, defs: &[MethodDescriptor]) -> Emission {
    ProxyClassEmitter::new(EmitConfig::default()).emit(proxy, parent, defs)
}

/// Emit a Cython declaration block with the default configuration.
pub fn emit_declarations(proxy: &str, defs: &[MethodDescriptor]) -> Emission {
    DeclarationEmitter::new(EmitConfig::default()).emit(proxy, defs)
}
