//! Run configuration for defconst
//!
//! Where the artifact goes, which emitter writes it, and which namespace/container the constants live in.

use std::path::{Path, PathBuf};

use crate::backend::EmitStrategy;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "Preprocessor";

/// Container name used when none is configured.
pub const DEFAULT_CLASS_NAME: &str = "DefineConstants";

/// Configuration for one compilation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineConfig {
    /// Artifact path; relative paths resolve against the working directory
    pub target: PathBuf,
    /// Dotted or `::`-separated namespace; empty places the container at top level
    pub namespace: String,
    /// Name of the type holding the constants
    pub class_name: String,
    /// Emitter used for the artifact
    pub strategy: EmitStrategy,
}

impl DefineConfig {
    /// Create a config with the default namespace and container name.
    pub fn new(target: impl AsRef<Path>, strategy: EmitStrategy) -> Self {
        Self {
            target: target.as_ref().to_path_buf(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            strategy,
        }
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the container name
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the emitter
    pub fn with_strategy(mut self, strategy: EmitStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
