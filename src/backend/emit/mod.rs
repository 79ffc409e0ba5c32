//! Emit C++ statements from the syntax tree.
//!
//! [`Emitter`] is the walker: it owns the scope chain and the output buffer for one run, dispatches on statement kind,
//! and appends exactly one line per emitted statement.
//!
//! ## Notes
//! - Statement text is built completely before anything is written, so a failing statement leaves no partial line.
//! - [`EmitError::UnsupportedNodeKind`] is returned like any other error; deciding whether to continue is the
//!   caller's job (see [`EmitError::is_fatal`]).
//!
//! ## See also
//! - [`statements`]: per-statement rendering
//! - [`crate::backend::driver`]: prologue/epilogue and the run loop

mod errors;
mod statements;

pub use errors::EmitError;

use mamba_syntax::ast::Stmt;

use super::cpp_emitter::CppEmitter;
use crate::frontend::scope::ScopeChain;

/// Walks statements, consulting and updating scope state as it goes.
#[derive(Debug, Default)]
pub struct Emitter {
    scopes: ScopeChain,
    out: CppEmitter,
}

impl Emitter {
    /// Create a walker with a fresh root-only scope chain and an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one top-level statement.
    pub fn emit(&mut self, stmt: &Stmt) -> Result<(), EmitError> {
        match stmt {
            Stmt::AnnAssign(assign) => self.emit_ann_assign(assign),
            Stmt::Expr(expr) => self.emit_expr_stmt(expr),
            Stmt::Unsupported { kind } => Err(EmitError::UnsupportedNodeKind { kind: kind.clone() }),
        }
    }

    pub fn scopes(&self) -> &ScopeChain {
        &self.scopes
    }

    /// Mutable access for block constructs that need to push/pop levels.
    pub fn scopes_mut(&mut self) -> &mut ScopeChain {
        &mut self.scopes
    }

    pub(crate) fn out_mut(&mut self) -> &mut CppEmitter {
        &mut self.out
    }

    pub fn statement_count(&self) -> usize {
        self.out.statement_count()
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.out.finish()
    }
}
