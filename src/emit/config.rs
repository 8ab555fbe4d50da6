//! Emission configuration
//!
//! Defaults reproduce the conventional cog/Cython layout: 4-space indentation, a `pyObject` handle,
//! and a constructor named after the proxy class.

use cbproxy_core::conventions::{DEFAULT_HANDLE_NAME, DEFAULT_HEADER, LEGACY_CONSTRUCTOR_NAME};

/// How the native constructor is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructorName {
    /// Use the proxy class name (a valid constructor).
    Proxy,
    /// Use a fixed name regardless of the proxy, as the legacy generator did.
    Legacy(String),
}

/// Emission configuration shared by both emitters
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Name of the opaque handle field and trailing callback parameter
    pub handle_name: String,
    /// Header comment text, without the comment leader
    pub header: String,
    /// Constructor naming policy (native emitter only)
    pub constructor: ConstructorName,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            handle_name: DEFAULT_HANDLE_NAME.to_string(),
            header: DEFAULT_HEADER.to_string(),
            constructor: ConstructorName::Proxy,
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the opaque handle name
    pub fn with_handle_name(mut self, name: impl Into<String>) -> Self {
        self.handle_name = name.into();
        self
    }

    /// Set the header comment text
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Name the constructor with a fixed literal instead of the proxy name
    pub fn with_legacy_constructor_name(mut self, name: impl Into<String>) -> Self {
        self.constructor = ConstructorName::Legacy(name.into());
        self
    }

    /// Use the constructor name the original cog helper hard-coded
    pub fn with_legacy_constructor(self) -> Self {
        self.with_legacy_constructor_name(LEGACY_CONSTRUCTOR_NAME)
    }

    /// Resolve the constructor name for a proxy class.
    pub fn constructor_name<'a>(&'a self, proxy: &'a str) -> &'a str {
        match &self.constructor {
            ConstructorName::Proxy => proxy,
            ConstructorName::Legacy(name) => name,
        }
    }
}
