//! C++ proxy class emitter
//!
//! Produces a class deriving from the parent that holds an opaque handle to the managed-side object,
//! one function-pointer field per callback, a setter per field, and a virtual override per callback
//! that forwards its arguments (plus the handle) through the stored pointer.

use cbproxy_core::conventions::{HANDLE_TYPE, is_void};
use cbproxy_core::naming::{field_name, native_alias, setter_name};
use tracing::debug;

use super::signature::{declared_params, forwarded_args, function_pointer, param_decl};
use super::writer::LineWriter;
use super::{EmitConfig, Emission};
use crate::descriptor::MethodDescriptor;

/// Emitter for the native proxy class definition
#[derive(Debug, Clone, Default)]
pub struct ProxyClassEmitter {
    config: EmitConfig,
}

impl ProxyClassEmitter {
    pub fn new(config: EmitConfig) -> Self {
        Self { config }
    }

    /// Emit `class <proxy> : public <parent> { ... };`.
    ///
    /// Sections come in a fixed order: handle field, constructor, typedefs, fields, setters, virtual
    /// overrides. Each per-method section lists methods in input order and is separated from the
    /// previous one by a blank line; empty sections are skipped.
    pub fn emit(&self, proxy: &str, parent: &str, defs: &[MethodDescriptor]) -> Emission {
        debug!(proxy, parent, methods = defs.len(), "emitting proxy class");

        let handle = self.config.handle_name.as_str();
        let mut w = LineWriter::new(self.config.indent_width);

        w.writeln(&format!("// {}", self.config.header));
        w.writeln(&format!("class {} : public {} {{", proxy, parent));
        w.writeln("public:");
        w.indent();

        w.writeln(&format!("{};", param_decl(HANDLE_TYPE, handle)));
        w.blank_line();
        self.write_constructor(&mut w, proxy);

        if !defs.is_empty() {
            w.blank_line();
            for def in defs {
                self.write_typedef(&mut w, def);
            }

            w.blank_line();
            for def in defs {
                w.writeln(&format!("{} {};", native_alias(def.name()), field_name(def.name())));
            }

            w.blank_line();
            for def in defs {
                self.write_setter(&mut w, def);
            }

            w.blank_line();
            for def in defs {
                self.write_override(&mut w, def);
            }
        }

        w.dedent();
        w.writeln("};");
        w.finish()
    }

    fn write_constructor(&self, w: &mut LineWriter, proxy: &str) {
        let handle = self.config.handle_name.as_str();
        let ctor = self.config.constructor_name(proxy);
        w.writeln(&format!("{}({}) :", ctor, param_decl(HANDLE_TYPE, handle)));
        w.indent();
        w.writeln(&format!("{}({}) {{", handle, handle));
        w.dedent();
        w.writeln("}");
    }

    fn write_typedef(&self, w: &mut LineWriter, def: &MethodDescriptor) {
        let pointer = function_pointer(
            def.return_type(),
            &native_alias(def.name()),
            def.params(),
            &self.config.handle_name,
        );
        w.writeln(&format!("typedef {};", pointer));
    }

    fn write_setter(&self, w: &mut LineWriter, def: &MethodDescriptor) {
        let field = field_name(def.name());
        w.writeln(&format!(
            "void {}({} {}) {{",
            setter_name(def.name()),
            native_alias(def.name()),
            field
        ));
        w.indent();
        w.writeln(&format!("this->{} = {};", field, field));
        w.dedent();
        w.writeln("}");
    }

    fn write_override(&self, w: &mut LineWriter, def: &MethodDescriptor) {
        w.writeln(&format!(
            "virtual {} {}({}) {{",
            def.return_type().trim(),
            def.name(),
            declared_params(def.params())
        ));
        w.indent();
        if !is_void(def.return_type()) {
            w.write("return ");
        }
        w.writeln(&format!(
            "{}({});",
            field_name(def.name()),
            forwarded_args(def.params(), &self.config.handle_name)
        ));
        w.dedent();
        w.writeln("}");
    }
}
