//! Provide the canonical naming conventions and lexical checks for cbproxy.
//!
//! Both emitters (the C++ proxy class and the Cython declaration block) derive every symbol they print
//! from the helpers in this crate, so the two artifacts cannot drift apart on naming.
//!
//! ## Notes
//!
//! - This is a "naming core" crate: **no IO**, no global state, no dependencies.
//! - Current scope: first-letter casing, derived symbol names, well-known identifiers, and the lexical
//!   rules for identifiers and type names.

pub mod conventions;
pub mod lexical;
pub mod naming;

pub use lexical::{IdentifierIssue, TypeNameIssue, check_identifier, check_type_name};
pub use naming::upper_first;
