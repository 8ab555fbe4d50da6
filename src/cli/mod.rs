//! CLI module for cbproxy
//!
//! ## Commands
//!
//! - `native <file>` - Emit the C++ proxy class for a descriptor file
//! - `binding <file>` - Emit the Cython declaration block for a descriptor file
//! - `check <file>` - Validate a descriptor file
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

use cbproxy_core::conventions::{DEFAULT_HANDLE_NAME, LEGACY_CONSTRUCTOR_NAME};
use clap::{Args, Parser, Subcommand};

use crate::descriptor::{NameRole, check_name};
use crate::emit::EmitConfig;

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
    /// Create a new CLI error with a message and exit code.
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

    /// Render a diagnostic (with source snippet and help) as a failure.
    pub fn diagnostic<E>(err: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(err)))
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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate C++ callback proxies and their Cython declarations
#[derive(Parser, Debug)]
#[command(name = "cbproxy")]
#[command(version = VERSION)]
#[command(about = "Generate C++ callback proxies and their Cython declarations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emit the C++ proxy class
    Native {
        /// Descriptor file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Base class, overriding the descriptor's `parent`
        #[arg(long, value_name = "NAME")]
        parent: Option<String>,
        /// Name the constructor with a fixed literal instead of the proxy name
        #[arg(
            long = "legacy-ctor",
            value_name = "NAME",
            num_args = 0..=1,
            default_missing_value = LEGACY_CONSTRUCTOR_NAME
        )]
        legacy_ctor: Option<String>,
        #[command(flatten)]
        style: StyleArgs,
    },

    /// Emit the Cython declaration block
    Binding {
        /// Descriptor file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },

    /// Validate a descriptor file
    Check {
        /// Descriptor file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Handle name the parameters must not collide with
        #[arg(long = "handle", value_name = "NAME", default_value = DEFAULT_HANDLE_NAME)]
        handle: String,
    },
}

/// Output style flags shared by the emitting commands
#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    /// Spaces per indentation level
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub indent: usize,
    /// Name of the opaque handle field and callback parameter
    #[arg(long = "handle", value_name = "NAME", default_value = DEFAULT_HANDLE_NAME)]
    pub handle: String,
    /// Header comment text
    #[arg(long, value_name = "TEXT")]
    pub header: Option<String>,
}

impl StyleArgs {
    /// Build the emission config these flags describe.
    pub fn to_config(&self) -> EmitConfig {
        let config = EmitConfig::new()
            .with_indent_width(self.indent)
            .with_handle_name(self.handle.clone());
        match &self.header {
            Some(header) => config.with_header(header.clone()),
            None => config,
        }
    }
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
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Native {
            file,
            output,
            parent,
            legacy_ctor,
            style,
        } => {
            let config = match legacy_ctor {
                Some(name) => {
                    check_name(NameRole::Constructor, &name).map_err(CliError::diagnostic)?;
                    style.to_config().with_legacy_constructor_name(name)
                }
                None => style.to_config(),
            };
            commands::emit_native(&file, output.as_deref(), parent.as_deref(), config)
        }
        Command::Binding { file, output, style } => {
            commands::emit_binding(&file, output.as_deref(), style.to_config())
        }
        Command::Check { file, handle } => commands::check_file(&file, &handle),
    }
}

// ============================================================================
// Tests
// ============================================================================
