//! Define error types for tree → C++ emission.
//!
//! Every variant except [`EmitError::UnsupportedNodeKind`] aborts the run. Unsupported node kinds are reported and
//! skipped so one unknown statement does not hide problems further down the module.

use mamba_core::lang::types::UnknownType;
use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::scope::{DuplicateSymbol, EmptyPopError};

/// Error during emission.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum EmitError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicateSymbol(#[from] DuplicateSymbol),

    #[error(transparent)]
    #[diagnostic(transparent)]
    EmptyPop(#[from] EmptyPopError),

    #[error("cannot declare `{target}`: {source}")]
    #[diagnostic(
        code(mamba::emit::unknown_type),
        help("annotate with one of: bool, float, int, str, list, tuple")
    )]
    UnknownType {
        target: String,
        #[source]
        source: UnknownType,
    },

    #[error("initializer of `{target}` must be a constant, found {found}")]
    #[diagnostic(code(mamba::emit::unsupported_value))]
    UnsupportedValue { target: String, found: String },

    #[error("call to `{func}` needs one argument, found none")]
    #[diagnostic(code(mamba::emit::arity))]
    ArityError { func: String },

    #[error("unsupported node kind `{kind}`")]
    #[diagnostic(code(mamba::emit::unsupported_node), severity(Warning))]
    UnsupportedNodeKind { kind: String },
}

impl EmitError {
    /// Whether this error aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EmitError::UnsupportedNodeKind { .. })
    }
}
