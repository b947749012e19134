//! Raw declarations and the places they come from.
//!
//! A [`RawDeclaration`] is one `KEY[=VALUE]` text item plus an optional kind hint. This module only *collects*
//! declarations; validation happens in [`crate::frontend::validator`].
//!
//! ## Sources
//!
//! - Declaration files: a JSON array whose items are either a bare string (`"KEY=VALUE"`) or an object
//!   `{ "define": "KEY=VALUE", "type": "Bool" }`.
//! - Command-line shorthand: `KIND:KEY=VALUE` (see [`RawDeclaration::from_cli_arg`]).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One unvalidated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeclaration {
    /// `KEY=VALUE`, `KEY=` or `KEY`
    pub text: String,
    /// Kind name as supplied (unresolved)
    pub kind_hint: Option<String>,
}

impl RawDeclaration {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind_hint: None,
        }
    }

    pub fn with_kind(mut self, hint: impl Into<String>) -> Self {
        self.kind_hint = Some(hint.into());
        self
    }

    /// Parse the command-line shorthand.
    ///
    /// `KIND:KEY=VALUE` attaches `KIND` as the hint when the text before the first `:` contains no `=`. Anything
    /// else is taken verbatim with no hint, so values may contain `:` (`PATH=C:\out`).
    ///
    /// ## Examples
    /// ```rust
    /// use defconst::frontend::declaration::RawDeclaration;
    ///
    /// let d = RawDeclaration::from_cli_arg("Bool:DEBUG=true");
    /// assert_eq!(d.text, "DEBUG=true");
    /// assert_eq!(d.kind_hint.as_deref(), Some("Bool"));
    ///
    /// let d = RawDeclaration::from_cli_arg("OUT=C:\\out");
    /// assert_eq!(d.text, "OUT=C:\\out");
    /// assert_eq!(d.kind_hint, None);
    /// ```
    pub fn from_cli_arg(arg: &str) -> Self {
        match arg.split_once(':') {
            Some((hint, rest)) if !hint.contains('=') => Self::new(rest).with_kind(hint),
            _ => Self::new(arg),
        }
    }
}

/// Errors while reading a declaration file
#[derive(Debug, Error)]
pub enum DeclarationFileError {
    #[error("cannot read declaration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("declaration file '{path}' is not a valid declaration list: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileEntry {
    Bare(String),
    Typed {
        define: String,
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
}

impl From<FileEntry> for RawDeclaration {
    fn from(entry: FileEntry) -> Self {
        match entry {
            FileEntry::Bare(text) => RawDeclaration::new(text),
            FileEntry::Typed { define, kind } => RawDeclaration {
                text: define,
                kind_hint: kind,
            },
        }
    }
}

/// Decode a JSON declaration list.
pub fn parse_declarations(json: &str) -> Result<Vec<RawDeclaration>, serde_json::Error> {
    let entries: Vec<FileEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(RawDeclaration::from).collect())
}

/// Read and decode a JSON declaration file.
pub fn load_declarations(path: &Path) -> Result<Vec<RawDeclaration>, DeclarationFileError> {
    let json = fs::read_to_string(path).map_err(|source| DeclarationFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decls = parse_declarations(&json).map_err(|source| DeclarationFileError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), count = decls.len(), "loaded declaration file");
    Ok(decls)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cli_arg_without_hint() {
        assert_eq!(RawDeclaration::from_cli_arg("VERSION=1.2.3"), RawDeclaration::new("VERSION=1.2.3"));
        assert_eq!(RawDeclaration::from_cli_arg("FLAG"), RawDeclaration::new("FLAG"));
    }

    #[test]
    fn cli_arg_hint_is_split_once() {
        let d = RawDeclaration::from_cli_arg("StringArray:DIRS=a:b;c");
        assert_eq!(d.text, "DIRS=a:b;c");
        assert_eq!(d.kind_hint.as_deref(), Some("StringArray"));
    }

    #[test]
    fn json_accepts_bare_and_typed_entries() {
        let decls = parse_declarations(
            r#"[
                "VERSION=1.2.3",
                { "define": "DEBUG=true", "type": "Bool" },
                { "define": "NAME=x" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            decls,
            vec![
                RawDeclaration::new("VERSION=1.2.3"),
                RawDeclaration::new("DEBUG=true").with_kind("Bool"),
                RawDeclaration::new("NAME=x"),
            ]
        );
    }

    #[test]
    fn json_rejects_non_lists() {
        assert!(parse_declarations(r#"{ "define": "A=1" }"#).is_err());
        assert!(parse_declarations("[1, 2]").is_err());
    }
}
