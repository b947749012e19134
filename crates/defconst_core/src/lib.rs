//! Provide the pure semantic core of the defconst compiler.
//!
//! This crate is intentionally small. It contains deterministic helpers that the compiler uses to decide whether a
//! declaration is acceptable and what native value it carries:
//! - the value-kind vocabulary ([`kinds`]),
//! - the identifier rule ([`ident`]),
//! - per-kind value coercion ([`coerce`]),
//! - the native value representation shared by every emitter ([`value`]).
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global mutable state, and no diagnostics types. Callers map
//!   [`CoerceError`] into whatever reporting channel they own.

pub mod coerce;
pub mod ident;
pub mod kinds;
pub mod value;

pub use coerce::{BoolCoercion, CoerceError, coerce_bool, coerce_int, split_string_array};
pub use ident::{IdentError, check_identifier, is_valid_identifier};
pub use kinds::ValueKind;
pub use value::ConstValue;
