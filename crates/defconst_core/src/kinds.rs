//! Value-kind vocabulary.
//!
//! This registry covers the four kinds a constant may have and the spellings accepted for them in a declaration's
//! type hint.
//!
//! ## Notes
//! - Lookup via [`from_str`] is ASCII **case-insensitive** for canonical names and aliases alike.
//! - This module is vocabulary only (spellings + metadata); coercion lives in [`crate::coerce`].
//!
//! ## Examples
//! ```rust
//! use defconst_core::kinds::{self, ValueKind};
//!
//! assert_eq!(kinds::from_str("Bool"), Some(ValueKind::Bool));
//! assert_eq!(kinds::from_str("boolean"), Some(ValueKind::Bool));
//! assert_eq!(kinds::as_str(ValueKind::StringArray), "StringArray");
//! assert_eq!(kinds::from_str("float"), None);
//! ```

use serde::{Deserialize, Serialize};

/// Stable identifier for a constant's value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Int,
    StringArray,
}

/// Metadata for a value kind.
#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    pub id: ValueKind,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Rust type used for the accessor in generated source.
    pub rust_type: &'static str,
}

/// Registry of value kinds, in the order they are listed to users.
pub const KINDS: &[KindInfo] = &[
    KindInfo {
        id: ValueKind::String,
        canonical: "String",
        aliases: &["str"],
        rust_type: "&'static str",
    },
    KindInfo {
        id: ValueKind::Bool,
        canonical: "Bool",
        aliases: &["boolean"],
        rust_type: "bool",
    },
    KindInfo {
        id: ValueKind::Int,
        canonical: "Int",
        aliases: &["i32", "integer"],
        rust_type: "i32",
    },
    KindInfo {
        id: ValueKind::StringArray,
        canonical: "StringArray",
        aliases: &["string[]", "strings", "array"],
        rust_type: "&'static [&'static str]",
    },
];

/// Resolve a type hint to a kind.
///
/// Returns `None` for unrecognized spellings; callers decide the fallback.
pub fn from_str(hint: &str) -> Option<ValueKind> {
    let hint = hint.trim();
    KINDS
        .iter()
        .find(|k| k.canonical.eq_ignore_ascii_case(hint) || k.aliases.iter().any(|a| a.eq_ignore_ascii_case(hint)))
        .map(|k| k.id)
}

/// Registry entry for a kind.
pub fn info(id: ValueKind) -> &'static KindInfo {
    // KINDS holds exactly one entry per variant, in declaration order.
    &KINDS[id as usize]
}

/// Canonical spelling of a kind.
pub fn as_str(id: ValueKind) -> &'static str {
    info(id).canonical
}

/// Canonical names joined with `,` for user-facing listings (`String,Bool,Int,StringArray`).
pub fn supported_names() -> String {
    KINDS.iter().map(|k| k.canonical).collect::<Vec<_>>().join(",")
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
