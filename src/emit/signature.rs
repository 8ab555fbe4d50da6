//! Signature formatting shared by both emitters
//!
//! The native typedef and the Cython ctypedef have the same shape
//! (`ret(*Alias)(params..., void *handle)`); only the statement around it differs.

use cbproxy_core::conventions::HANDLE_TYPE;

use crate::descriptor::Param;

/// Join a type and a declarator name.
///
/// Pointer and reference types written with a detached marker (`const char *`, `char **`) take the
/// name directly after the marker, everything else gets one separating space.
pub fn param_decl(ty: &str, name: &str) -> String {
    let ty = ty.trim();
    let base = ty.trim_end_matches(['*', '&']);
    if base.len() < ty.len() && base.ends_with(' ') {
        format!("{}{}", ty, name)
    } else {
        format!("{} {}", ty, name)
    }
}

/// The declared parameter list of the original method: `int dx, int dy`.
pub fn declared_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| param_decl(p.ty(), p.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The callback parameter list: the original parameters plus the trailing handle.
pub fn callback_params(params: &[Param], handle: &str) -> String {
    params
        .iter()
        .map(|p| param_decl(p.ty(), p.name()))
        .chain(std::iter::once(param_decl(HANDLE_TYPE, handle)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The argument list forwarded to the callback: parameter names plus the handle.
pub fn forwarded_args(params: &[Param], handle: &str) -> String {
    params
        .iter()
        .map(Param::name)
        .chain(std::iter::once(handle))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A function-pointer declarator: `void(*moveDef)(int dx, int dy, void *pyObject)`.
pub fn function_pointer(return_type: &str, alias: &str, params: &[Param], handle: &str) -> String {
    format!(
        "{}(*{})({})",
        return_type.trim(),
        alias,
        callback_params(params, handle)
    )
}
