//! Statement emission: annotated assignments and bare calls.

use mamba_core::lang::types;
use mamba_syntax::ast::{AnnAssign, Expr};

use super::{EmitError, Emitter};

impl Emitter {
    /// Emit `target: annotation = value` as a declaration, or as a plain assignment when `target` is already visible.
    pub(super) fn emit_ann_assign(&mut self, assign: &AnnAssign) -> Result<(), EmitError> {
        let target = assign.target.as_str();
        let cpp_type = types::resolve(&assign.annotation).map_err(|source| EmitError::UnknownType {
            target: target.to_string(),
            source,
        })?;

        let literal = match &assign.value {
            Some(Expr::Constant(literal)) => literal,
            Some(other) => {
                return Err(EmitError::UnsupportedValue {
                    target: target.to_string(),
                    found: format!("`{}` expression", other.kind()),
                });
            }
            None => {
                return Err(EmitError::UnsupportedValue {
                    target: target.to_string(),
                    found: "no value".to_string(),
                });
            }
        };

        if self.scopes().has_symbol(target, None) {
            if let Some(declared) = self.scopes().lookup(target).filter(|ty| *ty != assign.annotation) {
                tracing::warn!(
                    symbol = target,
                    declared,
                    annotated = %assign.annotation,
                    "re-annotation with a different type is emitted as a plain assignment"
                );
            }
            tracing::debug!(symbol = target, scope = %self.scopes().current_name(), "re-assign");
            self.out_mut().statement(&format!("{} = \"{}\";", target, literal));
        } else {
            let line = format!("{} {} = \"{}\";", cpp_type, target, literal);
            self.scopes_mut().define(target, &assign.annotation)?;
            tracing::debug!(symbol = target, cpp_type, scope = %self.scopes().current_name(), "declare");
            self.out_mut().statement(&line);
        }
        Ok(())
    }

    /// Emit a bare expression statement. Only calls are supported.
    pub(super) fn emit_expr_stmt(&mut self, expr: &Expr) -> Result<(), EmitError> {
        let Expr::Call(call) = expr else {
            return Err(EmitError::UnsupportedNodeKind {
                kind: expr.kind().to_string(),
            });
        };
        let Some(first) = call.args.first() else {
            return Err(EmitError::ArityError { func: call.func.clone() });
        };
        if call.args.len() > 1 {
            tracing::debug!(func = %call.func, dropped = call.args.len() - 1, "extra call arguments ignored");
        }
        self.out_mut().statement(&format!("{}({});", call.func, first));
        Ok(())
    }
}
