//! Builtin source type vocabulary and its C++ runtime spellings.
//!
//! This registry is the type mapping table consulted by the emitter: every annotation in an annotated assignment must
//! name one of the entries below, and the emitted declaration uses the entry's `target` spelling.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **exact** (case-sensitive), matching how annotations are written in source.
//! - The table is closed. Adding a source type means adding a [`SourceTypeId`] variant and a row in [`SOURCE_TYPES`];
//!   nothing else in the transpiler needs to change.
//!
//! ## Examples
//! ```rust
//! use mamba_core::lang::types::{self, SourceTypeId};
//!
//! assert_eq!(types::resolve("str"), Ok("mamba::String"));
//! assert!(types::resolve("dict").is_err());
//! assert_eq!(types::as_str(SourceTypeId::Tuple), "tuple");
//! ```

use std::fmt;

/// Stable identifier for builtin source types.
///
/// The discriminant doubles as the row index into [`SOURCE_TYPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTypeId {
    Bool,
    Float,
    Int,
    Str,
    List,
    Tuple,
}

/// Metadata for a builtin source type.
#[derive(Debug, Clone, Copy)]
pub struct SourceTypeInfo {
    pub id: SourceTypeId,
    /// Spelling used in source annotations (e.g. `int`).
    pub canonical: &'static str,
    /// Fully qualified C++ runtime type (e.g. `mamba::Integer`).
    pub target: &'static str,
}

/// Registry of builtin source types, ordered by [`SourceTypeId`] discriminant.
pub const SOURCE_TYPES: &[SourceTypeInfo] = &[
    info(SourceTypeId::Bool, "bool", "mamba::Boolean"),
    info(SourceTypeId::Float, "float", "mamba::Double"),
    info(SourceTypeId::Int, "int", "mamba::Integer"),
    info(SourceTypeId::Str, "str", "mamba::String"),
    info(SourceTypeId::List, "list", "mamba::List"),
    info(SourceTypeId::Tuple, "tuple", "mamba::Tuple"),
];

/// A source type name outside the closed set in [`SOURCE_TYPES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType {
    pub name: String,
}

impl fmt::Display for UnknownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type `{}`", self.name)
    }
}

impl std::error::Error for UnknownType {}

/// Resolve a source type name to a [`SourceTypeId`].
///
/// ## Returns
/// - `Some(SourceTypeId)` if the spelling is one of the registered canonical names.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<SourceTypeId> {
    SOURCE_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

/// Return the full registry entry for `id`.
pub fn info_for(id: SourceTypeId) -> &'static SourceTypeInfo {
    &SOURCE_TYPES[id as usize]
}

/// Return the canonical source spelling for `id` (e.g. `"int"`).
pub fn as_str(id: SourceTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return the C++ runtime spelling for `id` (e.g. `"mamba::Integer"`).
pub fn target_str(id: SourceTypeId) -> &'static str {
    info_for(id).target
}

/// Map a source type name straight to its C++ spelling.
///
/// ## Errors
/// - [`UnknownType`] when `name` is not a registered source type.
pub fn resolve(name: &str) -> Result<&'static str, UnknownType> {
    from_str(name).map(target_str).ok_or_else(|| UnknownType { name: name.to_string() })
}

const fn info(id: SourceTypeId, canonical: &'static str, target: &'static str) -> SourceTypeInfo {
    SourceTypeInfo { id, canonical, target }
}
