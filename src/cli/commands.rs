//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::info;

use crate::descriptor::ProxyDefinition;
use crate::emit::{DeclarationEmitter, EmitConfig, Emission, ProxyClassEmitter};
use crate::sink::{OutputSink, WriterSink};

use super::{CliError, CliResult, ExitCode};

/// Load a descriptor file and check it against the handle name in use.
fn load_definition(file: &Path, handle: &str) -> CliResult<ProxyDefinition> {
    let definition = ProxyDefinition::load(file).map_err(CliError::diagnostic)?;
    definition.check_handle_name(handle).map_err(CliError::diagnostic)?;
    Ok(definition)
}

/// Write an emission to `output`, or to stdout when no path is given.
fn write_emission(emission: &Emission, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| CliError::failure(format!("Error creating {}: {}", path.display(), e)))?;
            let mut sink = WriterSink::new(BufWriter::new(file));
            drain(emission, &mut sink)
                .map_err(|e| CliError::failure(format!("Error writing {}: {}", path.display(), e)))?;
            info!(path = %path.display(), lines = emission.lines().len(), "wrote generated code");
        }
        None => {
            let stdout = io::stdout();
            let mut sink = WriterSink::new(stdout.lock());
            drain(emission, &mut sink)
                .map_err(|e| CliError::failure(format!("Error writing to stdout: {}", e)))?;
        }
    }
    Ok(())
}

fn drain(emission: &Emission, sink: &mut dyn OutputSink) -> io::Result<()> {
    emission.write_to(sink)?;
    sink.flush()
}

/// Emit the C++ proxy class for a descriptor file.
///
/// `parent` overrides the descriptor's base class; one of the two must be present.
pub fn emit_native(
    file: &Path,
    output: Option<&Path>,
    parent: Option<&str>,
    config: EmitConfig,
) -> CliResult<ExitCode> {
    let definition = load_definition(file, &config.handle_name)?;
    let definition = match parent {
        Some(parent) => definition.with_parent(parent).map_err(CliError::diagnostic)?,
        None => definition,
    };

    let Some(parent) = definition.parent() else {
        return Err(CliError::failure(format!(
            "Error: {} has no parent class; set \"parent\" or pass --parent",
            file.display()
        )));
    };

    info!(
        proxy = definition.proxy(),
        parent,
        methods = definition.methods().len(),
        "generating native proxy class"
    );
    let emission = ProxyClassEmitter::new(config).emit(definition.proxy(), parent, definition.methods());
    write_emission(&emission, output)?;
    Ok(ExitCode::SUCCESS)
}

/// Emit the Cython declaration block for a descriptor file.
pub fn emit_binding(file: &Path, output: Option<&Path>, config: EmitConfig) -> CliResult<ExitCode> {
    let definition = load_definition(file, &config.handle_name)?;

    info!(
        proxy = definition.proxy(),
        methods = definition.methods().len(),
        "generating binding declarations"
    );
    let emission = DeclarationEmitter::new(config).emit(definition.proxy(), definition.methods());
    write_emission(&emission, output)?;
    Ok(ExitCode::SUCCESS)
}

/// Validate a descriptor file and print a one-line summary.
pub fn check_file(file: &Path, handle: &str) -> CliResult<ExitCode> {
    let definition = load_definition(file, handle)?;
    let parent = definition
        .parent()
        .map(|p| format!(" : public {}", p))
        .unwrap_or_default();
    println!(
        "✓ {}{} ({} method{})",
        definition.proxy(),
        parent,
        definition.methods().len(),
        if definition.methods().len() == 1 { "" } else { "s" }
    );
    Ok(ExitCode::SUCCESS)
}
