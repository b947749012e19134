//! Identifier rule for constant names and container names.
//!
//! A name is accepted when it matches `^[a-z_][a-z0-9_]*$` ASCII case-insensitively and is not one of the few
//! spellings Rust cannot express as an item name even in raw form.
//!
//! ## Examples
//! ```rust
//! use defconst_core::ident::{self, IdentError};
//!
//! assert!(ident::is_valid_identifier("BUILD_NUMBER"));
//! assert!(ident::is_valid_identifier("_private"));
//! assert_eq!(ident::check_identifier("1BAD"), Err(IdentError::Malformed));
//! assert_eq!(ident::check_identifier("self"), Err(IdentError::Reserved));
//! assert!(ident::needs_raw("type"));
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("INVARIANT: identifier pattern is a valid regex"));

/// Reserved + strict keywords in Rust (2024 edition).
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Names that match the identifier rule but cannot be item names, not even as `r#name`.
pub const RESERVED: &[&str] = &["_", "self", "Self", "super", "crate"];

/// Why a name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    #[error("allowed identifiers begin with a letter or an underscore, and contain only letters, digits, and underscores")]
    Malformed,
    #[error("the name is reserved and cannot be used as an item name")]
    Reserved,
}

/// Check a name against the identifier rule.
pub fn check_identifier(name: &str) -> Result<(), IdentError> {
    if !IDENTIFIER.is_match(name) {
        return Err(IdentError::Malformed);
    }
    if RESERVED.contains(&name) {
        return Err(IdentError::Reserved);
    }
    Ok(())
}

/// Shorthand for `check_identifier(name).is_ok()`.
pub fn is_valid_identifier(name: &str) -> bool {
    check_identifier(name).is_ok()
}

/// Check whether an identifier is a Rust keyword.
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Whether emitted source must spell this name as `r#name`.
pub fn needs_raw(name: &str) -> bool {
    is_keyword(name) && !RESERVED.contains(&name)
}
