//! Method descriptors and proxy definitions
//!
//! A [`ProxyDefinition`] is the full input to both emitters: the proxy class name, an optional base
//! class, and an ordered list of [`MethodDescriptor`]s. Construction validates every name before
//! anything is emitted; `unchecked` constructors exist for callers that want the raw pass-through
//! behavior.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use cbproxy_core::naming::field_name;
use cbproxy_core::{IdentifierIssue, TypeNameIssue, check_identifier, check_type_name};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Where a rejected identifier came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameRole {
    Proxy,
    Parent,
    Handle,
    Constructor,
    Method,
    Param { method: String },
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameRole::Proxy => write!(f, "proxy name"),
            NameRole::Parent => write!(f, "parent name"),
            NameRole::Handle => write!(f, "handle name"),
            NameRole::Constructor => write!(f, "constructor name"),
            NameRole::Method => write!(f, "method name"),
            NameRole::Param { method } => write!(f, "parameter name in `{}`", method),
        }
    }
}

/// Where a rejected type name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRole {
    Return { method: String },
    Param { method: String, param: String },
}

impl fmt::Display for TypeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRole::Return { method } => write!(f, "return type of `{}`", method),
            TypeRole::Param { method, param } => write!(f, "type of parameter `{}` in `{}`", param, method),
        }
    }
}

/// Validation failures raised while building descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("invalid {role} `{value}`: {issue}")]
    #[diagnostic(
        code(cbproxy::invalid_identifier),
        help("identifiers must match [A-Za-z_][A-Za-z0-9_]*")
    )]
    InvalidIdentifier {
        role: NameRole,
        value: String,
        issue: IdentifierIssue,
    },

    #[error("invalid {role} `{value}`: {issue}")]
    #[diagnostic(
        code(cbproxy::invalid_type_name),
        help("type names may use letters, digits, spaces and _ * & : < > , [ ]")
    )]
    InvalidTypeName {
        role: TypeRole,
        value: String,
        issue: TypeNameIssue,
    },

    #[error("method `{name}` is declared more than once")]
    #[diagnostic(
        code(cbproxy::duplicate_method),
        help("overloads are not supported; every method gets its own field and setter")
    )]
    DuplicateMethod { name: String },

    #[error("parameter `{name}` appears more than once in `{method}`")]
    #[diagnostic(code(cbproxy::duplicate_param))]
    DuplicateParam { method: String, name: String },

    #[error("parameter `{name}` in `{method}` collides with the handle parameter")]
    #[diagnostic(
        code(cbproxy::reserved_param),
        help("rename the parameter or pick another handle name with --handle")
    )]
    ReservedParamName { method: String, name: String },

    #[error("methods `{first}` and `{second}` both generate the member `{generated}`")]
    #[diagnostic(
        code(cbproxy::generated_name_clash),
        help("method names must differ by more than the case of their first letter")
    )]
    GeneratedNameClash {
        first: String,
        second: String,
        generated: String,
    },

    #[error("{role} `{name}` shadows the proxy member `{member}`")]
    #[diagnostic(
        code(cbproxy::shadowed_member),
        help("parameters and the handle may not reuse a method name or a generated field name")
    )]
    ShadowedMember {
        role: NameRole,
        name: String,
        member: String,
    },
}

/// Failures while reading a descriptor file.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read `{path}`")]
    #[diagnostic(code(cbproxy::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed descriptor file: {message}")]
    #[diagnostic(code(cbproxy::json))]
    Json {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Check a user-supplied name against the identifier rule, tagging failures with `role`.
pub fn check_name(role: NameRole, value: &str) -> Result<(), DescriptorError> {
    identifier(role, value)
}

fn identifier(role: NameRole, value: &str) -> Result<(), DescriptorError> {
    check_identifier(value).map_err(|issue| DescriptorError::InvalidIdentifier {
        role,
        value: value.to_string(),
        issue,
    })
}

fn type_name(role: TypeRole, value: &str) -> Result<(), DescriptorError> {
    check_type_name(value).map_err(|issue| DescriptorError::InvalidTypeName {
        role,
        value: value.to_string(),
        issue,
    })
}

// ============================================================================
// Descriptors
// ============================================================================

/// One `(type, name)` parameter of a callback method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    ty: String,
    name: String,
}

impl Param {
    /// Build a parameter without validation (checked by [`MethodDescriptor::new`]).
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Into<String>, N: Into<String>> From<(T, N)> for Param {
    fn from((ty, name): (T, N)) -> Self {
        Param::new(ty, name)
    }
}

/// One callback method: name, return type and ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    return_type: String,
    params: Vec<Param>,
}

impl MethodDescriptor {
    /// Build a validated descriptor.
    ///
    /// Rejects malformed method/parameter names, malformed type names, and repeated parameter names.
    pub fn new(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: Vec<Param>,
    ) -> Result<Self, DescriptorError> {
        let method = Self::unchecked(name, return_type, params);
        method.validate()?;
        Ok(method)
    }

    /// Build a descriptor without any checks; malformed names flow straight into generated text.
    pub fn unchecked(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: Vec<Param>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params,
        }
    }

    fn validate(&self) -> Result<(), DescriptorError> {
        identifier(NameRole::Method, &self.name)?;
        type_name(
            TypeRole::Return {
                method: self.name.clone(),
            },
            &self.return_type,
        )?;

        let mut seen = HashSet::new();
        for param in &self.params {
            identifier(
                NameRole::Param {
                    method: self.name.clone(),
                },
                &param.name,
            )?;
            type_name(
                TypeRole::Param {
                    method: self.name.clone(),
                    param: param.name.clone(),
                },
                &param.ty,
            )?;
            if !seen.insert(param.name.as_str()) {
                return Err(DescriptorError::DuplicateParam {
                    method: self.name.clone(),
                    name: param.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

/// Everything needed to generate one proxy: class name, base class, and callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDefinition {
    proxy: String,
    parent: Option<String>,
    methods: Vec<MethodDescriptor>,
}

impl ProxyDefinition {
    /// Build a validated definition; method descriptors are assumed to be validated already.
    pub fn new(
        proxy: impl Into<String>,
        parent: Option<String>,
        methods: Vec<MethodDescriptor>,
    ) -> Result<Self, DescriptorError> {
        let proxy = proxy.into();
        identifier(NameRole::Proxy, &proxy)?;
        if let Some(parent) = &parent {
            identifier(NameRole::Parent, parent)?;
        }

        let mut seen = HashSet::new();
        for method in &methods {
            if !seen.insert(method.name()) {
                return Err(DescriptorError::DuplicateMethod {
                    name: method.name().to_string(),
                });
            }
        }

        // Field and setter names share the capitalised stem, so one map covers both
        let mut fields: HashMap<String, &str> = HashMap::new();
        for method in &methods {
            let field = field_name(method.name());
            if let Some(first) = fields.insert(field.clone(), method.name()) {
                return Err(DescriptorError::GeneratedNameClash {
                    first: first.to_string(),
                    second: method.name().to_string(),
                    generated: field,
                });
            }
        }

        let definition = Self { proxy, parent, methods };
        for method in &definition.methods {
            for param in method.params() {
                definition.check_member_shadowing(
                    NameRole::Param {
                        method: method.name().to_string(),
                    },
                    param.name(),
                )?;
            }
        }
        Ok(definition)
    }

    /// Reject a name equal to any method name or generated field name of this proxy.
    fn check_member_shadowing(&self, role: NameRole, name: &str) -> Result<(), DescriptorError> {
        for method in &self.methods {
            let field = field_name(method.name());
            let member = if method.name() == name {
                method.name().to_string()
            } else if field == name {
                field
            } else {
                continue;
            };
            return Err(DescriptorError::ShadowedMember {
                role,
                name: name.to_string(),
                member,
            });
        }
        Ok(())
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Replace the base class (e.g. from a command line override).
    pub fn with_parent(mut self, parent: impl Into<String>) -> Result<Self, DescriptorError> {
        let parent = parent.into();
        identifier(NameRole::Parent, &parent)?;
        self.parent = Some(parent);
        Ok(self)
    }

    /// Check that the handle name is an identifier, no parameter shadows it, and it does not reuse a
    /// method or field name.
    pub fn check_handle_name(&self, handle: &str) -> Result<(), DescriptorError> {
        identifier(NameRole::Handle, handle)?;
        for method in &self.methods {
            if let Some(param) = method.params().iter().find(|p| p.name() == handle) {
                return Err(DescriptorError::ReservedParamName {
                    method: method.name().to_string(),
                    name: param.name().to_string(),
                });
            }
        }
        self.check_member_shadowing(NameRole::Handle, handle)
    }

    /// Parse and validate a JSON descriptor document.
    ///
    /// `origin` names the document in diagnostics (usually the file path).
    pub fn from_json_str(source: &str, origin: &str) -> Result<Self, LoadError> {
        let raw: RawDefinition = serde_json::from_str(source).map_err(|e| {
            let offset = byte_offset(source, e.line(), e.column());
            LoadError::Json {
                message: e.to_string(),
                src: NamedSource::new(origin, source.to_string()),
                span: (offset, 0).into(),
            }
        })?;
        Ok(raw.into_definition()?)
    }

    /// Read, parse and validate a descriptor file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&source, &path.display().to_string())
    }
}

// ============================================================================
// File format
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefinition {
    proxy: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMethod {
    name: String,
    return_type: String,
    #[serde(default)]
    params: Vec<(String, String)>,
}

impl RawDefinition {
    fn into_definition(self) -> Result<ProxyDefinition, DescriptorError> {
        let methods = self
            .methods
            .into_iter()
            .map(|m| MethodDescriptor::new(m.name, m.return_type, m.params.into_iter().map(Param::from).collect()))
            .collect::<Result<Vec<_>, _>>()?;
        ProxyDefinition::new(self.proxy, self.parent, methods)
    }
}

/// Convert serde_json's 1-based line/column into a byte offset, clamped to the source.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_method() -> MethodDescriptor {
        MethodDescriptor::new("move", "void", vec![Param::new("int", "dx"), Param::new("int", "dy")]).unwrap()
    }

    #[test]
    fn test_method_descriptor_accessors() {
        let m = move_method();
        assert_eq!(m.name(), "move");
        assert_eq!(m.return_type(), "void");
        assert_eq!(m.params().len(), 2);
        assert_eq!(m.params()[0].ty(), "int");
        assert_eq!(m.params()[1].name(), "dy");
    }

    #[test]
    fn test_param_from_tuple() {
        let p: Param = ("const char *", "label").into();
        assert_eq!(p.ty(), "const char *");
        assert_eq!(p.name(), "label");
    }

    #[test]
    fn test_invalid_method_name() {
        let err = MethodDescriptor::new("mo-ve", "void", vec![]).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::InvalidIdentifier {
                role: NameRole::Method,
                value: "mo-ve".to_string(),
                issue: IdentifierIssue::BadChar('-'),
            }
        );
        assert_eq!(err.to_string(), "invalid method name `mo-ve`: name cannot contain '-'");
    }

    #[test]
    fn test_empty_method_name() {
        let err = MethodDescriptor::new("", "void", vec![]).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidIdentifier {
                issue: IdentifierIssue::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_return_type() {
        let err = MethodDescriptor::new("tick", "int;", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "invalid return type of `tick` `int;`: type name cannot contain ';'");
    }

    #[test]
    fn test_invalid_param_name() {
        let err = MethodDescriptor::new("tick", "void", vec![Param::new("int", "1x")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter name in `tick` `1x`: name cannot start with '1'"
        );
    }

    #[test]
    fn test_invalid_param_type() {
        let err = MethodDescriptor::new("tick", "void", vec![Param::new("", "x")]).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidTypeName {
                role: TypeRole::Param { .. },
                issue: TypeNameIssue::Empty,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_param() {
        let err = MethodDescriptor::new("move", "void", vec![Param::new("int", "d"), Param::new("float", "d")])
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateParam {
                method: "move".to_string(),
                name: "d".to_string(),
            }
        );
    }

    #[test]
    fn test_unchecked_accepts_anything() {
        let m = MethodDescriptor::unchecked("bad name", "", vec![Param::new("", "")]);
        assert_eq!(m.name(), "bad name");
        assert_eq!(m.return_type(), "");
    }

    #[test]
    fn test_proxy_definition_valid() {
        let def = ProxyDefinition::new("Robot", Some("Actor".to_string()), vec![move_method()]).unwrap();
        assert_eq!(def.proxy(), "Robot");
        assert_eq!(def.parent(), Some("Actor"));
        assert_eq!(def.methods().len(), 1);
    }

    #[test]
    fn test_proxy_definition_invalid_proxy() {
        let err = ProxyDefinition::new("My Robot", None, vec![]).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidIdentifier {
                role: NameRole::Proxy,
                ..
            }
        ));
    }

    #[test]
    fn test_proxy_definition_invalid_parent() {
        let err = ProxyDefinition::new("Robot", Some("ns::Actor".to_string()), vec![]).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidIdentifier {
                role: NameRole::Parent,
                ..
            }
        ));
    }

    #[test]
    fn test_proxy_definition_duplicate_method() {
        let err = ProxyDefinition::new("Robot", None, vec![move_method(), move_method()]).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateMethod {
                name: "move".to_string()
            }
        );
    }

    #[test]
    fn test_proxy_definition_generated_name_clash() {
        let upper = MethodDescriptor::new("Move", "void", vec![]).unwrap();
        let err = ProxyDefinition::new("Robot", Some("Actor".to_string()), vec![move_method(), upper]).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::GeneratedNameClash {
                first: "move".to_string(),
                second: "Move".to_string(),
                generated: "cMove".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "methods `move` and `Move` both generate the member `cMove`"
        );
    }

    #[test]
    fn test_param_shadowing_field_is_rejected() {
        let method = MethodDescriptor::new("move", "void", vec![Param::new("int", "cMove")]).unwrap();
        let err = ProxyDefinition::new("Robot", None, vec![method]).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::ShadowedMember {
                role: NameRole::Param {
                    method: "move".to_string()
                },
                name: "cMove".to_string(),
                member: "cMove".to_string(),
            }
        );
    }

    #[test]
    fn test_param_shadowing_other_method_is_rejected() {
        let tick = MethodDescriptor::new("tick", "void", vec![Param::new("int", "move")]).unwrap();
        let err = ProxyDefinition::new("Robot", None, vec![move_method(), tick]).unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::ShadowedMember { ref member, .. } if member == "move"
        ));
    }

    #[test]
    fn test_handle_shadowing_member_is_rejected() {
        let def = ProxyDefinition::new("Robot", None, vec![move_method()]).unwrap();
        assert_eq!(
            def.check_handle_name("cMove").unwrap_err(),
            DescriptorError::ShadowedMember {
                role: NameRole::Handle,
                name: "cMove".to_string(),
                member: "cMove".to_string(),
            }
        );
        assert_eq!(
            def.check_handle_name("move").unwrap_err().to_string(),
            "handle name `move` shadows the proxy member `move`"
        );
    }

    #[test]
    fn test_check_name_constructor_role() {
        assert!(check_name(NameRole::Constructor, "CyScenario").is_ok());
        assert_eq!(
            check_name(NameRole::Constructor, "Cy Scenario").unwrap_err().to_string(),
            "invalid constructor name `Cy Scenario`: name cannot contain ' '"
        );
    }

    #[test]
    fn test_with_parent_overrides() {
        let def = ProxyDefinition::new("Robot", Some("Actor".to_string()), vec![])
            .unwrap()
            .with_parent("Machine")
            .unwrap();
        assert_eq!(def.parent(), Some("Machine"));
    }

    #[test]
    fn test_check_handle_name() {
        let def = ProxyDefinition::new("Robot", None, vec![move_method()]).unwrap();
        assert!(def.check_handle_name("pyObject").is_ok());
        assert_eq!(
            def.check_handle_name("dx").unwrap_err(),
            DescriptorError::ReservedParamName {
                method: "move".to_string(),
                name: "dx".to_string(),
            }
        );
        assert!(matches!(
            def.check_handle_name("py object").unwrap_err(),
            DescriptorError::InvalidIdentifier {
                role: NameRole::Handle,
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_str() {
        let src = r#"{
            "proxy": "Robot",
            "parent": "Actor",
            "methods": [
                { "name": "move", "return_type": "void", "params": [["int", "dx"], ["int", "dy"]] },
                { "name": "energy", "return_type": "float" }
            ]
        }"#;
        let def = ProxyDefinition::from_json_str(src, "robot.json").unwrap();
        assert_eq!(def.proxy(), "Robot");
        assert_eq!(def.parent(), Some("Actor"));
        assert_eq!(def.methods()[0], move_method());
        assert!(def.methods()[1].params().is_empty());
    }

    #[test]
    fn test_from_json_str_without_parent() {
        let def = ProxyDefinition::from_json_str(r#"{ "proxy": "Robot" }"#, "robot.json").unwrap();
        assert_eq!(def.parent(), None);
        assert!(def.methods().is_empty());
    }

    #[test]
    fn test_from_json_str_syntax_error() {
        let err = ProxyDefinition::from_json_str("{ \"proxy\": }", "bad.json").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_from_json_str_unknown_field() {
        let err = ProxyDefinition::from_json_str(r#"{ "proxy": "Robot", "base": "Actor" }"#, "x.json").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_from_json_str_invalid_descriptor() {
        let src = r#"{ "proxy": "Robot", "methods": [{ "name": "1move", "return_type": "void" }] }"#;
        let err = ProxyDefinition::from_json_str(src, "x.json").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Descriptor(DescriptorError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProxyDefinition::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_byte_offset() {
        let src = "ab\ncd\nef";
        assert_eq!(byte_offset(src, 1, 1), 0);
        assert_eq!(byte_offset(src, 2, 2), 4);
        assert_eq!(byte_offset(src, 3, 1), 6);
        assert_eq!(byte_offset(src, 9, 9), src.len());
        assert_eq!(byte_offset(src, 0, 0), 0);
    }
}
