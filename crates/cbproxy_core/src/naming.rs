//! Derive generated symbol names from method and proxy names.
//!
//! Every symbol the emitters print that is built from a user-supplied name goes through this module.
//!
//! ## Notes
//! - **Casing**: only the first character changes, and only when its upper-case form is a single
//!   character. This keeps the character count stable (`move` -> `Move` -> `cMove`).
//! - **Aliases**: the native alias is class-scoped (`moveDef`), the binding alias is module-scoped and so
//!   carries the proxy name (`Robot_moveDef`).

use crate::conventions::{ALIAS_SUFFIX, FIELD_PREFIX, SETTER_PREFIX};

/// Upper-case the first character of a name.
///
/// ## Parameters
/// - `word`: the name to transform.
///
/// ## Returns
/// - (`String`): `word` with its first character upper-cased; every other character unchanged.
///
/// ## Notes
/// - An empty input yields an empty string rather than panicking.
/// - A first character whose upper-case form is more than one character (`ß`) is kept as is.
///
/// ## Examples
/// ```rust
/// use cbproxy_core::naming::upper_first;
/// assert_eq!(upper_first("move"), "Move");
/// assert_eq!(upper_first("_tick"), "_tick");
/// assert_eq!(upper_first("été"), "Été");
/// assert_eq!(upper_first(""), "");
/// ```
pub fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(upper_char(first));
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Single-character upper-case mapping of `c`, or `c` itself when the mapping expands.
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Name of the stored function-pointer field for a method (`move` -> `cMove`).
pub fn field_name(method: &str) -> String {
    format!("{}{}", FIELD_PREFIX, upper_first(method))
}

/// Name of the setter for a method (`move` -> `setMove`).
pub fn setter_name(method: &str) -> String {
    format!("{}{}", SETTER_PREFIX, upper_first(method))
}

/// Class-scoped function-pointer alias used inside the native class (`move` -> `moveDef`).
pub fn native_alias(method: &str) -> String {
    format!("{}{}", method, ALIAS_SUFFIX)
}

/// Module-scoped function-pointer alias used by the binding declarations (`Robot`, `move` -> `Robot_moveDef`).
pub fn binding_alias(proxy: &str, method: &str) -> String {
    format!("{}_{}{}", proxy, method, ALIAS_SUFFIX)
}
