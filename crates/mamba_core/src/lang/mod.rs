//! Mamba language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. [`types::SourceTypeId`]) and look up spellings via registry tables instead
//! of matching on strings scattered across the transpiler.
//!
//! ## Examples
//! ```rust
//! use mamba_core::lang::types::{self, SourceTypeId};
//!
//! assert_eq!(types::from_str("int"), Some(SourceTypeId::Int));
//! assert_eq!(types::target_str(SourceTypeId::Int), "mamba::Integer");
//! ```

pub mod types;
