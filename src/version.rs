//! Mamba transpiler version information.
//!
//! The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time so the CLI and any generated headers
//! agree on the same string.

/// The Mamba transpiler version string (for example, `0.1.0`).
pub const MAMBA_VERSION: &str = env!("CARGO_PKG_VERSION");
