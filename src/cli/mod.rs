//! CLI module for the Mamba transpiler
//!
//! `mambac -i prog.py.json` loads a syntax tree, transpiles it and writes `prog.py.cpp` next to the input.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::backend::TranspileOptions;
use crate::version::MAMBA_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Transpile a Mamba syntax tree (JSON) to C++
#[derive(Parser, Debug)]
#[command(name = "mambac")]
#[command(version = MAMBA_VERSION)]
#[command(about = "Transpile a Mamba syntax tree (JSON) to C++", long_about = None)]
pub struct Cli {
    /// Syntax tree to transpile
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: `<stem>.py.cpp` next to the input)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the generated C++ to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Print the loaded syntax tree before transpiling (debug)
    #[arg(long, conflicts_with = "stdout")]
    pub dump_tree: bool,

    /// Fail when the tree contains unsupported statements
    #[arg(long)]
    pub deny_unsupported: bool,
}

impl Cli {
    pub fn options(&self) -> TranspileOptions {
        TranspileOptions {
            deny_unsupported: self.deny_unsupported,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = cli.options();
    let module = commands::load_tree(&cli.input)?;

    if cli.dump_tree {
        println!("{:#?}", module);
    }

    let destination = if cli.stdout {
        None
    } else {
        Some(cli.output.unwrap_or_else(|| commands::default_output_path(&cli.input)))
    };
    commands::transpile_tree(&module, destination.as_deref(), options)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_input_only() {
        let cli = Cli::try_parse_from(["mambac", "-i", "prog.py.json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("prog.py.json"));
        assert!(cli.output.is_none());
        assert!(!cli.stdout);
        assert_eq!(cli.options(), TranspileOptions::default());
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "mambac",
            "--input",
            "a.json",
            "--output",
            "out.cpp",
            "--dump-tree",
            "--deny-unsupported",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.cpp")));
        assert!(cli.dump_tree);
        assert!(cli.options().deny_unsupported);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["mambac"]).is_err());
    }

    #[test]
    fn test_cli_dump_tree_conflicts_with_stdout() {
        assert!(Cli::try_parse_from(["mambac", "-i", "a.json", "--dump-tree", "--stdout"]).is_err());
        assert!(Cli::try_parse_from(["mambac", "-i", "a.json", "--stdout"]).is_ok());
    }

    #[test]
    fn test_cli_output_conflicts_with_stdout() {
        assert!(Cli::try_parse_from(["mambac", "-i", "a.json", "-o", "b.cpp", "--stdout"]).is_err());
    }
}
