//! Compile a declaration list into one artifact.
//!
//! A run moves through `Start → Parsing → {Blocked | Ready} → Emitting → Done`. Declarations are processed strictly in
//! input order (first definition wins), every problem is collected, and the artifact is written only when no error
//! was recorded. An emitter failure is recorded as one more error and ends the run as [`RunStatus::Failed`].
//!
//! Each call owns its [`ConstantTable`] and [`Diagnostics`]; concurrent runs share nothing.

use std::path::{Path, PathBuf};

use defconst_core::IdentError;

use crate::backend::{self, ContainerName, EmitError};
use crate::config::DefineConfig;
use crate::frontend::declaration::RawDeclaration;
use crate::frontend::diagnostics::{Diagnostics, errors};
use crate::frontend::validator;
use crate::table::ConstantTable;

/// Result of the parsing phase
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub table: ConstantTable,
    pub diagnostics: Diagnostics,
}

impl Collected {
    /// No error was recorded; emission may proceed.
    pub fn is_ready(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// At least one error was recorded before emission; nothing was written
    Blocked,
    /// The artifact was written
    Done { artifact: PathBuf },
    /// Emission failed; the failure is the last recorded error
    Failed,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub table: ConstantTable,
    pub diagnostics: Diagnostics,
}

impl RunOutcome {
    /// The only status signal for callers: no error-severity diagnostic was recorded.
    pub fn success(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn artifact(&self) -> Option<&Path> {
        match &self.status {
            RunStatus::Done { artifact } => Some(artifact),
            _ => None,
        }
    }
}

/// Validate every declaration in order and accumulate the constant table.
#[tracing::instrument(skip_all, fields(decl_count = declarations.len()))]
pub fn collect(declarations: &[RawDeclaration]) -> Collected {
    let mut collected = Collected::default();
    for decl in declarations {
        if let Some(constant) = validator::validate(decl, &mut collected.diagnostics) {
            collected.table.insert(constant, &mut collected.diagnostics);
        }
    }
    tracing::debug!(
        constants = collected.table.len(),
        errors = collected.diagnostics.error_count(),
        warnings = collected.diagnostics.warning_count(),
        "parsing finished"
    );
    collected
}

/// Run the whole pipeline: collect, gate on errors, emit.
#[tracing::instrument(skip_all, fields(decl_count = declarations.len(), target = %config.target.display()))]
pub fn run(declarations: &[RawDeclaration], config: &DefineConfig) -> RunOutcome {
    let Collected {
        table,
        mut diagnostics,
    } = collect(declarations);

    let container = match ContainerName::parse(&config.namespace, &config.class_name) {
        Ok(container) => Some(container),
        Err(EmitError::InvalidName { what, name, reason }) => {
            let what = capitalize(what);
            diagnostics.push(match reason {
                IdentError::Malformed => errors::invalid_container(&what, &name),
                IdentError::Reserved => errors::reserved_container(&what, &name),
            });
            None
        }
        Err(other) => {
            diagnostics.push(errors::emission_failed(&other));
            None
        }
    };

    let container = match container {
        Some(container) if !diagnostics.has_errors() => container,
        _ => {
            tracing::info!(errors = diagnostics.error_count(), "not writing constants artifact");
            return RunOutcome {
                status: RunStatus::Blocked,
                table,
                diagnostics,
            };
        }
    };

    let emitter = config.strategy.emitter();
    let status = match backend::emit(emitter.as_ref(), &table, &container, &config.target) {
        Ok(artifact) => RunStatus::Done { artifact },
        Err(err) => {
            tracing::error!("{}", err);
            diagnostics.push(errors::emission_failed(&err));
            RunStatus::Failed
        }
    };

    RunOutcome {
        status,
        table,
        diagnostics,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
