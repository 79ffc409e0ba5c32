//! Syntax tree for the Mamba transpiler, plus the JSON loader that hands trees to it.
//!
//! Mamba does not parse source text itself. An external front-end (typically a small script around Python's `ast`
//! module) produces a tree and serializes it as JSON; [`json::from_str`] turns that into the closed [`ast`] types the
//! transpiler consumes.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not track scopes, resolve types or emit code.
//! - Node kinds the transpiler does not understand still load successfully (as `Unsupported`/`Other` variants) so the
//!   emitter can report them and keep going.
//!
//! ## Examples
//! ```rust
//! use mamba_syntax::{ast::Stmt, json};
//!
//! let module = json::from_str(r#"{"body": [{"kind": "Pass"}]}"#).unwrap();
//! assert!(matches!(&module.body[0], Stmt::Unsupported { kind } if kind == "Pass"));
//! ```

pub mod ast;
pub mod json;
