//! Lexical rules for names and type names that flow into generated text.
//!
//! These are purely lexical: they keep a malformed name from producing broken C++/Cython, they do not
//! check that a type actually exists.

use std::fmt;

/// Why a string is not an acceptable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierIssue {
    Empty,
    /// First character is not an ASCII letter or `_`.
    BadStart(char),
    /// A later character is not an ASCII letter, digit or `_`.
    BadChar(char),
}

impl fmt::Display for IdentifierIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierIssue::Empty => write!(f, "name is empty"),
            IdentifierIssue::BadStart(c) => write!(f, "name cannot start with {:?}", c),
            IdentifierIssue::BadChar(c) => write!(f, "name cannot contain {:?}", c),
        }
    }
}

/// Why a string is not an acceptable type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNameIssue {
    Empty,
    BadChar(char),
}

impl fmt::Display for TypeNameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNameIssue::Empty => write!(f, "type name is empty"),
            TypeNameIssue::BadChar(c) => write!(f, "type name cannot contain {:?}", c),
        }
    }
}

/// Check that `name` is a C-style identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// ## Returns
/// - `Ok(())` when valid, otherwise the first problem found.
pub fn check_identifier(name: &str) -> Result<(), IdentifierIssue> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(IdentifierIssue::Empty)?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(IdentifierIssue::BadStart(first));
    }
    match chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        Some(bad) => Err(IdentifierIssue::BadChar(bad)),
        None => Ok(()),
    }
}

/// Characters allowed in a type name besides ASCII letters and digits.
const TYPE_NAME_PUNCTUATION: &[char] = &['_', ' ', '*', '&', ':', '<', '>', ',', '[', ']'];

/// Check that `ty` can be spliced into a declaration as a type.
///
/// Accepts things like `int`, `const char *`, `std::vector<float> &`, `unsigned long long`.
/// Rejects statement or block punctuation (`;`, braces, parentheses), `#` and line breaks.
pub fn check_type_name(ty: &str) -> Result<(), TypeNameIssue> {
    if ty.trim().is_empty() {
        return Err(TypeNameIssue::Empty);
    }
    match ty
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || TYPE_NAME_PUNCTUATION.contains(c)))
    {
        Some(bad) => Err(TypeNameIssue::BadChar(bad)),
        None => Ok(()),
    }
}
