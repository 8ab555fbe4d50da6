//! Shared generator conventions (well-known identifiers).

/// Return type that suppresses the `return` keyword in forwarding bodies.
pub const VOID_TYPE: &str = "void";

/// Native type of the opaque handle parameter and field.
pub const HANDLE_TYPE: &str = "void *";

/// Default name of the opaque handle back to the managed-side object.
pub const DEFAULT_HANDLE_NAME: &str = "pyObject";

/// Constructor name the legacy generator hard-coded regardless of the proxy name.
pub const LEGACY_CONSTRUCTOR_NAME: &str = "CyScenario";

/// Default header comment text (without the comment leader). The parenthesis is closed; older
/// generated files end the line with `bit:` instead.
pub const DEFAULT_HEADER: &str = "generated using cog (as far as the [[end]] bit)";

/// Prefix of the stored function-pointer field (`cMove`).
pub const FIELD_PREFIX: &str = "c";

/// Prefix of the setter method (`setMove`).
pub const SETTER_PREFIX: &str = "set";

/// Suffix of every function-pointer alias (`moveDef`).
pub const ALIAS_SUFFIX: &str = "Def";

/// Check whether a return type is the no-value sentinel.
///
/// Surrounding whitespace is ignored, so `" void "` counts; `void *` does not.
pub fn is_void(return_type: &str) -> bool {
    return_type.trim() == VOID_TYPE
}
