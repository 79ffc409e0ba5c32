//! Transpile a whole module: prologue, one emitted line per statement, epilogue.
//!
//! Each run builds its own [`Emitter`] (and therefore its own scope chain and buffer); nothing is shared between runs,
//! so independent modules can be transpiled from different threads.

use mamba_syntax::ast::Module;

use super::emit::{EmitError, Emitter};

/// Text written before the first statement.
pub const PROLOGUE: &str = "#include \"mamba/mamba.hpp\"\n\nusing namespace mamba;\n\nint main() {\n";

/// Text written after the last statement.
pub const EPILOGUE: &str = "}\n";

/// Knobs for how a run's outcome is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranspileOptions {
    /// Treat any unsupported node kind as a failure.
    pub deny_unsupported: bool,
}

/// A non-fatal problem recorded during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDiagnostic {
    /// Position of the statement in the module body
    pub index: usize,
    pub error: EmitError,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transpilation {
    pub code: String,
    pub diagnostics: Vec<NodeDiagnostic>,
}

impl Transpilation {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Drives emission over a module.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    options: TranspileOptions,
}

impl Transpiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TranspileOptions) -> Self {
        Self { options }
    }

    /// Transpile `module`, collecting non-fatal diagnostics.
    ///
    /// ## Errors
    /// The first fatal [`EmitError`]; whatever was emitted before it is discarded.
    #[tracing::instrument(skip_all, fields(node_count = module.body.len()))]
    pub fn run(&self, module: &Module) -> Result<Transpilation, EmitError> {
        let mut emitter = Emitter::new();
        let mut diagnostics = Vec::new();

        emitter.out_mut().write(PROLOGUE);
        for (index, stmt) in module.body.iter().enumerate() {
            match emitter.emit(stmt) {
                Ok(()) => {}
                Err(error) if !error.is_fatal() => {
                    tracing::debug!(index, %error, "skipping statement");
                    diagnostics.push(NodeDiagnostic { index, error });
                }
                Err(error) => {
                    tracing::error!(index, %error, "emission aborted");
                    return Err(error);
                }
            }
        }
        emitter.out_mut().write(EPILOGUE);

        tracing::debug!(
            statements = emitter.statement_count(),
            skipped = diagnostics.len(),
            "transpiled module"
        );
        Ok(Transpilation {
            code: emitter.finish(),
            diagnostics,
        })
    }

    /// Transpile `module` and return only the generated code.
    ///
    /// With [`TranspileOptions::deny_unsupported`], the first recorded diagnostic becomes the error.
    pub fn transpile(&self, module: &Module) -> Result<String, EmitError> {
        let transpilation = self.run(module)?;
        if self.options.deny_unsupported {
            if let Some(first) = transpilation.diagnostics.into_iter().next() {
                return Err(first.error);
            }
        }
        Ok(transpilation.code)
    }
}

/// Transpile `module` with default options.
pub fn transpile(module: &Module) -> Result<String, EmitError> {
    Transpiler::new().transpile(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mamba_syntax::ast::{Literal, Stmt};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_empty_module_is_prologue_and_epilogue() {
        let code = transpile(&Module::default()).unwrap();
        assert_eq!(code, format!("{PROLOGUE}{EPILOGUE}"));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let module = Module::new(vec![
            Stmt::ann_assign("x", "int", Literal::Int(1)),
            Stmt::call("foo", ["x"]),
        ]);
        let result = Transpiler::new().run(&module).unwrap();
        assert!(result.is_clean());
        assert_eq!(
            result.code,
            "#include \"mamba/mamba.hpp\"\n\nusing namespace mamba;\n\nint main() {\nmamba::Integer x = \"1\";\nfoo(x);\n}\n"
        );
    }

    #[test]
    fn test_unsupported_nodes_are_recorded_and_skipped() {
        let module = Module::new(vec![
            Stmt::unsupported("Import"),
            Stmt::ann_assign("x", "int", Literal::Int(1)),
            Stmt::unsupported("If"),
        ]);
        let result = Transpiler::new().run(&module).unwrap();
        assert_eq!(result.code, format!("{PROLOGUE}mamba::Integer x = \"1\";\n{EPILOGUE}"));
        let positions: Vec<usize> = result.diagnostics.iter().map(|d| d.index).collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn test_fatal_error_aborts_the_run() {
        let module = Module::new(vec![
            Stmt::ann_assign("x", "int", Literal::Int(1)),
            Stmt::ann_assign("y", "complex", Literal::Int(1)),
            Stmt::call("foo", ["x"]),
        ]);
        let err = Transpiler::new().run(&module).unwrap_err();
        assert!(matches!(err, EmitError::UnknownType { ref target, .. } if target == "y"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_skipped_statements_are_not_logged_at_info() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let module = Module::new(vec![Stmt::unsupported("While"), Stmt::unsupported("Import")]);
        let result = tracing::subscriber::with_default(subscriber, || Transpiler::new().run(&module)).unwrap();

        assert_eq!(result.diagnostics.len(), 2);
        let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(!logged.contains("skipping statement"), "unexpected log output: {logged}");
    }

    #[test]
    fn test_deny_unsupported_promotes_diagnostics() {
        let module = Module::new(vec![Stmt::unsupported("For")]);
        assert!(transpile(&module).is_ok());

        let strict = Transpiler::with_options(TranspileOptions { deny_unsupported: true });
        assert_eq!(
            strict.transpile(&module),
            Err(EmitError::UnsupportedNodeKind { kind: "For".to_string() })
        );
    }

    #[test]
    fn test_runs_do_not_share_scope_state() {
        let module = Module::new(vec![Stmt::ann_assign("x", "int", Literal::Int(1))]);
        let transpiler = Transpiler::new();
        let first = transpiler.transpile(&module).unwrap();
        let second = transpiler.transpile(&module).unwrap();
        assert_eq!(first, second);
        assert!(second.contains("mamba::Integer x = \"1\";"));
    }
}
