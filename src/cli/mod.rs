//! CLI module for defconst
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `emit-rust --target <file>` - Write constants as Rust source
//! - `emit-module --target <file>` - Write constants as a binary module image
//! - `check` - Validate declarations without writing anything
//! - `inspect <module>` - List the constants stored in a module image
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

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_CLASS_NAME, DEFAULT_NAMESPACE};
use crate::version::DEFCONST_VERSION;

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
/// Contains a user-facing message, an optional hint and an exit code. The CLI entry point
/// renders these with miette and exits with the code.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(defconst::cli))]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Suggested fix, shown below the message
    #[help]
    pub help: Option<String>,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            help: None,
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Attach a suggested fix.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compile key=value declarations into typed build-time constants
#[derive(Parser, Debug)]
#[command(name = "defconst")]
#[command(version = DEFCONST_VERSION)]
#[command(about = "Compile key=value declarations into typed build-time constants", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where declarations come from. Files are read first, in order, then `--define` arguments.
#[derive(Args, Debug, Clone, Default)]
pub struct DeclarationArgs {
    /// JSON declaration file (array of "KEY=VALUE" strings or {"define", "type"} objects)
    #[arg(long = "from", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Declaration `KEY=VALUE`, optionally prefixed with a kind: `Bool:DEBUG=true`
    #[arg(short = 'D', long = "define", value_name = "DECL")]
    pub defines: Vec<String>,
}

/// Options shared by both emitting commands.
#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    /// Artifact path (relative paths resolve against the working directory)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub target: PathBuf,

    /// Namespace of the container, `A.B` or `A::B`; empty for top level
    #[arg(long, value_name = "NS", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Name of the container type
    #[arg(long = "class-name", value_name = "NAME", default_value = DEFAULT_CLASS_NAME)]
    pub class_name: String,

    #[command(flatten)]
    pub declarations: DeclarationArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write constants as Rust source
    EmitRust(EmitArgs),

    /// Write constants as a binary module image
    EmitModule(EmitArgs),

    /// Validate declarations without writing an artifact
    Check(DeclarationArgs),

    /// List the constants stored in a module image
    Inspect {
        /// Module image to read
        #[arg(value_name = "MODULE")]
        module: PathBuf,
        /// Print the image as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            let code = e.exit_code.0;
            if !e.message.is_empty() {
                eprintln!("{:?}", miette::Report::new(e));
            }
            process::exit(code);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::EmitRust(args) => commands::emit(&args, crate::backend::EmitStrategy::Source),
        Command::EmitModule(args) => commands::emit(&args, crate::backend::EmitStrategy::Module),
        Command::Check(args) => commands::check(&args),
        Command::Inspect { module, json } => commands::inspect(&module, json),
    }
}

// ============================================================================
// Tests
// ============================================================================
