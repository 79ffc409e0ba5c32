//! Provide the canonical language vocabulary shared by the Mamba transpiler and its tooling.
//!
//! This crate is intentionally tiny and dependency-free. It holds registry tables that map source-level spellings
//! onto their C++ runtime counterparts.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global mutable state, and no transpiler-specific types.
//! - Current scope: the builtin source type table (`bool`, `float`, `int`, `str`, `list`, `tuple`).

pub mod lang;
