//! defconst Compiler Backend
//!
//! This module renders a finalized [`ConstantTable`] into an artifact and writes it to disk.
//!
//! The pipeline is:
//! 1. Validated table from the frontend → an [`Emitter`] → artifact bytes
//! 2. Resolve the target path against the working directory, create its parent directory
//! 3. Write the artifact
//!
//! ## Module Organization
//!
//! - `source.rs` - Rust source emission (syn/quote, formatted with prettyplease)
//! - `module.rs` - Binary module images (serde + bincode) and their loader
//!
//! ## Notes
//!
//! - Both emitters consume the same input and expose the same constants (names, kinds, values, order).
//! - Rendering never touches the filesystem; only [`emit`] writes, and only after rendering succeeded.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod module;
pub mod source;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use defconst_core::ident::{self, IdentError};
use thiserror::Error;

use crate::table::ConstantTable;

pub use module::{ModuleEmitter, ModuleImage, load_module};
pub use source::SourceEmitter;

/// Error during rendering or writing an artifact.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("syn parse error: {0}")]
    SynParse(String),

    #[error("{what} '{name}' is not a valid identifier: {reason}")]
    InvalidName {
        what: &'static str,
        name: String,
        reason: IdentError,
    },

    #[error("cannot encode module image: {0}")]
    Encode(#[from] bincode::Error),

    #[error("target path '{0}' has no file name")]
    NoFileName(PathBuf),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Namespace path plus container name the constants are placed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerName {
    /// Outermost first; empty means top level
    pub namespace: Vec<String>,
    pub name: String,
}

impl ContainerName {
    /// Split and validate a namespace (`A.B` or `A::B`) and a container name.
    ///
    /// ## Examples
    /// ```rust
    /// use defconst::backend::ContainerName;
    ///
    /// let c = ContainerName::parse("Company.Build", "Consts").unwrap();
    /// assert_eq!(c.namespace, vec!["Company", "Build"]);
    /// assert_eq!(c.full_name(), "Company::Build::Consts");
    /// assert!(ContainerName::parse("", "Consts").unwrap().namespace.is_empty());
    /// assert!(ContainerName::parse("bad-ns", "Consts").is_err());
    /// ```
    pub fn parse(namespace: &str, name: &str) -> Result<Self, EmitError> {
        let namespace = namespace.trim();
        let segments: Vec<String> = if namespace.is_empty() {
            Vec::new()
        } else {
            namespace
                .split("::")
                .flat_map(|s| s.split('.'))
                .map(str::to_string)
                .collect()
        };
        for segment in &segments {
            check("namespace segment", segment)?;
        }
        check("container name", name)?;
        Ok(Self {
            namespace: segments,
            name: name.to_string(),
        })
    }

    /// `A::B::Name`
    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = self.namespace.iter().map(String::as_str).collect();
        parts.push(&self.name);
        parts.join("::")
    }
}

fn check(what: &'static str, name: &str) -> Result<(), EmitError> {
    ident::check_identifier(name).map_err(|reason| EmitError::InvalidName {
        what,
        name: name.to_string(),
        reason,
    })
}

/// Render a constant table into artifact bytes.
pub trait Emitter {
    /// Short strategy name for logs.
    fn name(&self) -> &'static str;

    /// Render the table. `module_name` is the target's file stem.
    fn render(&self, table: &ConstantTable, container: &ContainerName, module_name: &str)
    -> Result<Vec<u8>, EmitError>;
}

/// Which emitter a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitStrategy {
    /// Generated Rust source
    #[default]
    Source,
    /// Binary module image
    Module,
}

impl EmitStrategy {
    pub fn emitter(self) -> Box<dyn Emitter> {
        match self {
            EmitStrategy::Source => Box::new(SourceEmitter::new()),
            EmitStrategy::Module => Box::new(ModuleEmitter::new()),
        }
    }
}

/// Resolve a relative target against the current working directory.
pub fn resolve_target(target: &Path) -> Result<PathBuf, EmitError> {
    if target.is_absolute() {
        return Ok(target.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|source| EmitError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(target))
}

/// Render with `emitter` and write the artifact; returns the resolved artifact path.
pub fn emit(
    emitter: &dyn Emitter,
    table: &ConstantTable,
    container: &ContainerName,
    target: &Path,
) -> Result<PathBuf, EmitError> {
    let path = resolve_target(target)?;
    let module_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| EmitError::NoFileName(path.clone()))?
        .to_string();

    tracing::info!(strategy = emitter.name(), "Creating constants artifact '{}'", path.display());
    let bytes = emitter.render(table, container, &module_name)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| EmitError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, bytes).map_err(|source| EmitError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
