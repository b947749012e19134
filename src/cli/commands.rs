//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::IsTerminal;
use std::path::Path;

use crate::backend::{EmitStrategy, load_module};
use crate::compiler::{self, RunStatus};
use crate::config::DefineConfig;
use crate::frontend::declaration::{RawDeclaration, load_declarations};
use crate::frontend::diagnostics::{self, Diagnostics};

use super::{CliError, CliResult, DeclarationArgs, EmitArgs, ExitCode};

// ============================================================================
// Declaration gathering
// ============================================================================

/// Collect declarations in processing order: every `--from` file in turn, then `--define` arguments.
pub fn gather_declarations(args: &DeclarationArgs) -> CliResult<Vec<RawDeclaration>> {
    let mut declarations = Vec::new();
    for path in &args.files {
        let loaded = load_declarations(path).map_err(|e| {
            CliError::failure(e.to_string())
                .with_help("A declaration file is a JSON array of \"KEY=VALUE\" strings or {\"define\", \"type\"} objects")
        })?;
        declarations.extend(loaded);
    }
    declarations.extend(args.defines.iter().map(|arg| RawDeclaration::from_cli_arg(arg)));
    Ok(declarations)
}

fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

fn report(diagnostics: &Diagnostics) {
    diagnostics::print_diagnostics(diagnostics, use_color());
}

// ============================================================================
// Commands
// ============================================================================

/// Compile declarations and write the artifact with the chosen emitter.
///
/// Prints diagnostics to stderr and the artifact path to stdout.
pub fn emit(args: &EmitArgs, strategy: EmitStrategy) -> CliResult<ExitCode> {
    let declarations = gather_declarations(&args.declarations)?;
    let config = DefineConfig::new(&args.target, strategy)
        .with_namespace(args.namespace.as_str())
        .with_class_name(args.class_name.as_str());

    let outcome = compiler::run(&declarations, &config);
    report(&outcome.diagnostics);

    match &outcome.status {
        RunStatus::Done { artifact } => {
            println!("{}", artifact.display());
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::Blocked | RunStatus::Failed => Ok(ExitCode::FAILURE),
    }
}

/// Validate declarations and report diagnostics without writing anything.
pub fn check(args: &DeclarationArgs) -> CliResult<ExitCode> {
    let declarations = gather_declarations(args)?;
    let collected = compiler::collect(&declarations);
    report(&collected.diagnostics);

    if !collected.is_ready() {
        return Ok(ExitCode::FAILURE);
    }
    for constant in &collected.table {
        println!("{}: {} = {}", constant.name(), constant.kind(), constant.rendered());
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the constants stored in a module image.
pub fn inspect(path: &Path, json: bool) -> CliResult<ExitCode> {
    let image = load_module(path).map_err(|e| CliError::failure(e.to_string()))?;

    if json {
        let text = serde_json::to_string_pretty(&image)
            .map_err(|e| CliError::failure(format!("cannot render module as JSON: {}", e)))?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "module {} (format {}, written by defconst {})",
        image.name, image.header.format_version, image.header.generator
    );
    for ty in &image.types {
        println!("{}", ty.full_name());
        for accessor in &ty.accessors {
            println!("  {}: {} = {}", accessor.name, accessor.kind(), accessor.value.rendered());
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn files_come_before_defines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("decls.json");
        fs::write(&file, r#"["A=from-file", {"define": "B=1", "type": "Int"}]"#).unwrap();

        let args = DeclarationArgs {
            files: vec![file],
            defines: vec!["Bool:C=true".to_string(), "A=from-cli".to_string()],
        };
        let decls = gather_declarations(&args).unwrap();
        let texts: Vec<_> = decls.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, ["A=from-file", "B=1", "C=true", "A=from-cli"]);
        assert_eq!(decls[1].kind_hint.as_deref(), Some("Int"));
        assert_eq!(decls[2].kind_hint.as_deref(), Some("Bool"));
    }

    #[test]
    fn missing_declaration_file_is_a_cli_error() {
        let args = DeclarationArgs {
            files: vec!["/definitely/not/here.json".into()],
            defines: Vec::new(),
        };
        let err = gather_declarations(&args).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("cannot read declaration file"));
        assert!(err.help.is_some());
    }

    #[test]
    fn emit_writes_artifact_and_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("consts.rs");
        let args = EmitArgs {
            target: target.clone(),
            namespace: "Preprocessor".to_string(),
            class_name: "DefineConstants".to_string(),
            declarations: DeclarationArgs {
                files: Vec::new(),
                defines: vec!["VERSION=1.2.3".to_string()],
            },
        };
        assert_eq!(emit(&args, EmitStrategy::Source).unwrap(), ExitCode::SUCCESS);
        assert!(target.exists());
    }

    #[test]
    fn emit_with_errors_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("consts.dcm");
        let args = EmitArgs {
            target: target.clone(),
            namespace: String::new(),
            class_name: "Consts".to_string(),
            declarations: DeclarationArgs {
                files: Vec::new(),
                defines: vec!["1BAD=x".to_string()],
            },
        };
        assert_eq!(emit(&args, EmitStrategy::Module).unwrap(), ExitCode::FAILURE);
        assert!(!target.exists());
    }

    #[test]
    fn inspect_rejects_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        fs::write(&path, b"definitely not a module image").unwrap();
        let err = inspect(&path, false).unwrap_err();
        assert_eq!(err.message, "not a defconst module image");
    }
}
