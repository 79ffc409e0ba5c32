//! Mamba Transpiler Backend
//!
//! This module turns a syntax tree into C++ source text for the `mamba` runtime headers.
//!
//! ## Module Organization
//!
//! - `cpp_emitter.rs` - Low-level C++ code string builder
//! - `emit/` - The statement walker and its error taxonomy
//! - `driver.rs` - Prologue/epilogue and the per-module run loop

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod cpp_emitter;
pub mod driver;
pub mod emit;

pub use driver::{NodeDiagnostic, TranspileOptions, Transpilation, Transpiler, transpile};
pub use emit::{EmitError, Emitter};
