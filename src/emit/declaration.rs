//! Cython declaration emitter
//!
//! Produces the block that goes inside `cdef extern from "header.h":` so Cython can see the proxy
//! class, its constructor, and one setter per callback. The function-pointer typedefs live at module
//! scope and so are prefixed with the proxy name.

use cbproxy_core::conventions::HANDLE_TYPE;
use cbproxy_core::naming::{binding_alias, field_name, setter_name};
use tracing::debug;

use super::signature::{function_pointer, param_decl};
use super::writer::LineWriter;
use super::{EmitConfig, Emission};
use crate::descriptor::MethodDescriptor;

/// Emitter for the binding-layer declaration block
#[derive(Debug, Clone, Default)]
pub struct DeclarationEmitter {
    config: EmitConfig,
}

impl DeclarationEmitter {
    pub fn new(config: EmitConfig) -> Self {
        Self { config }
    }

    /// Emit the ctypedefs followed by the `cdef cppclass` declaration.
    ///
    /// Always emits exactly one class line and one constructor line, even for an empty `defs`.
    pub fn emit(&self, proxy: &str, defs: &[MethodDescriptor]) -> Emission {
        debug!(proxy, methods = defs.len(), "emitting declarations");

        let handle = self.config.handle_name.as_str();
        let mut w = LineWriter::new(self.config.indent_width);

        w.writeln(&format!("# {}", self.config.header));
        for def in defs {
            let pointer = function_pointer(
                def.return_type(),
                &binding_alias(proxy, def.name()),
                def.params(),
                handle,
            );
            w.writeln(&format!("ctypedef {}", pointer));
        }

        w.writeln(&format!("cdef cppclass {}:", proxy));
        w.indent();
        w.writeln(&format!("{}({})", proxy, param_decl(HANDLE_TYPE, handle)));
        w.blank_line();
        for def in defs {
            w.writeln(&format!(
                "void {}({} {})",
                setter_name(def.name()),
                binding_alias(proxy, def.name()),
                field_name(def.name())
            ));
        }
        w.dedent();
        w.finish()
    }
}
