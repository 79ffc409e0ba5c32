//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::{EmitError, TranspileOptions, Transpiler};
use crate::frontend::ast::Module;
use crate::frontend::json;

use super::{CliError, CliResult, ExitCode};

/// Maximum tree file size (100 MB)
///
/// Larger inputs are rejected before they are read into memory.
const MAX_TREE_SIZE: u64 = 100 * 1024 * 1024;

/// Read and load a syntax tree file.
pub fn load_tree(path: &Path) -> CliResult<Module> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))?;
    if metadata.len() > MAX_TREE_SIZE {
        return Err(CliError::failure(format!(
            "Error: '{}' is too large ({} bytes, limit {} bytes)",
            path.display(),
            metadata.len(),
            MAX_TREE_SIZE
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))?;
    json::from_str(&text).map_err(|e| CliError::failure(format!("Error loading '{}': {}", path.display(), e)))
}

/// Default output location: `<dir>/<stem>.py.cpp`.
///
/// Trailing `.json` and `.py` extensions are stripped from the stem, so `prog.py.json` becomes `prog.py.cpp`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut stem = input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    for ext in [".json", ".py"] {
        if let Some(stripped) = stem.strip_suffix(ext) {
            stem = stripped.to_string();
        }
    }
    if stem.is_empty() {
        stem = "out".to_string();
    }
    input.with_file_name(format!("{}.py.cpp", stem))
}

/// Transpile `module` and write the result to `destination` (stdout when `None`).
///
/// Unsupported statements are reported on stderr (once each, here); with `deny_unsupported` they turn the exit code into a failure
/// after the output has been written.
pub fn transpile_tree(module: &Module, destination: Option<&Path>, options: TranspileOptions) -> CliResult<ExitCode> {
    let transpiler = Transpiler::with_options(options);
    let result = transpiler.run(module).map_err(render_emit_error)?;

    match destination {
        Some(path) => {
            fs::write(path, &result.code)
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
            tracing::info!(output = %path.display(), "wrote C++ output");
        }
        None => print!("{}", result.code),
    }

    for diagnostic in &result.diagnostics {
        eprintln!("warning: statement {}: {}", diagnostic.index, diagnostic.error);
    }

    if options.deny_unsupported && !result.is_clean() {
        return Err(CliError::failure(format!(
            "Error: {} unsupported statement(s) (denied by --deny-unsupported)",
            result.diagnostics.len()
        )));
    }
    Ok(ExitCode::SUCCESS)
}

/// Render an emission error with its diagnostic code and help.
fn render_emit_error(error: EmitError) -> CliError {
    let report = miette::Report::new(error);
    CliError::failure(format!("{:?}", report))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ast::{Literal, Stmt};

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("dir/prog.py.json")),
            PathBuf::from("dir/prog.py.cpp")
        );
        assert_eq!(default_output_path(Path::new("prog.json")), PathBuf::from("prog.py.cpp"));
        assert_eq!(default_output_path(Path::new("prog")), PathBuf::from("prog.py.cpp"));
        assert_eq!(default_output_path(Path::new("a/.json")), PathBuf::from("a/out.py.cpp"));
    }

    #[test]
    fn test_load_tree_missing_file() {
        let err = load_tree(Path::new("definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("definitely/not/here.json"));
    }

    #[test]
    fn test_transpile_tree_writes_file() {
        let dir = std::env::temp_dir().join(format!("mambac_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("prog.py.cpp");

        let module = Module::new(vec![Stmt::ann_assign("x", "int", Literal::Int(1))]);
        let code = transpile_tree(&module, Some(&out), TranspileOptions::default()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(fs::read_to_string(&out).unwrap().contains("mamba::Integer x = \"1\";"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_transpile_tree_deny_unsupported_fails_after_writing() {
        let dir = std::env::temp_dir().join(format!("mambac_deny_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("prog.py.cpp");

        let module = Module::new(vec![Stmt::unsupported("While")]);
        let options = TranspileOptions { deny_unsupported: true };
        let err = transpile_tree(&module, Some(&out), options).unwrap_err();
        assert!(err.message.contains("--deny-unsupported"));
        assert!(out.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_transpile_tree_reports_fatal_errors() {
        let module = Module::new(vec![Stmt::call("foo", Vec::<String>::new())]);
        let err = transpile_tree(&module, None, TranspileOptions::default()).unwrap_err();
        assert!(err.message.contains("foo"));
    }
}
