//! Mamba Transpiler Frontend
//!
//! - `ast`: syntax tree definitions (from `mamba_syntax`)
//! - `json`: loading a tree from its JSON wire form (from `mamba_syntax`)
//! - `scope`: the scope chain consulted during emission

// Syntax components are provided by the shared mamba_syntax crate.
pub use mamba_syntax::{ast, json};

pub mod scope;
