#![forbid(unsafe_code)]
//! Mamba: a tree-to-C++ transpiler
//!
//! Mamba takes the syntax tree of a small Python-like statement subset and emits C++ that targets the `mamba`
//! runtime headers. Annotated assignments become declarations the first time a name is seen and plain assignments
//! afterwards; bare single-argument calls are emitted as direct calls.
//!
//! ```rust
//! use mamba::ast::{Literal, Module, Stmt};
//!
//! let module = Module::new(vec![
//!     Stmt::ann_assign("x", "int", Literal::Int(1)),
//!     Stmt::call("foo", ["x"]),
//! ]);
//! let code = mamba::transpile(&module).unwrap();
//! assert!(code.contains("mamba::Integer x = \"1\";\nfoo(x);\n"));
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod version;

pub use frontend::ast;
pub use frontend::json;
pub use frontend::scope;

pub use backend::{EmitError, TranspileOptions, Transpilation, Transpiler, transpile};
