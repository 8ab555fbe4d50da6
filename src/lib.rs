#![forbid(unsafe_code)]
//! cbproxy: callback-proxy boilerplate generator
//!
//! Given a proxy class name and a list of callback method signatures, cbproxy emits:
//!
//! - a C++ class that stores one function pointer per callback and forwards virtual calls through
//!   them, passing an opaque handle back to the managed-side (Python) object;
//! - the matching Cython `cdef cppclass` declaration block with typedefs and setters.
//!
//! ## Layout
//!
//! - [`descriptor`] - validated input model and descriptor-file loading
//! - [`emit`] - the two pure emitters and their configuration
//! - [`sink`] - output consumers
//! - [`cli`] - command line front end
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `emit` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod descriptor;
pub mod emit;
pub mod sink;

pub use cbproxy_core::naming::upper_first;
pub use descriptor::{DescriptorError, LoadError, MethodDescriptor, Param, ProxyDefinition};
pub use emit::{
    DeclarationEmitter, EmitConfig, Emission, ProxyClassEmitter, emit_declarations, emit_proxy_class,
};
pub use sink::{MemorySink, OutputSink, WriterSink};
