//! Coerce raw declaration text into native values.
//!
//! Each helper takes the raw value text (everything after the first `=`) and either returns the native value or a
//! [`CoerceError`] describing why the text is not acceptable for the kind.
//!
//! ## Notes
//!
//! - Booleans accept `true`/`false` in any case. As a fallback any integer is accepted (nonzero is `true`); the
//!   result records that the fallback was used so callers can warn about it.
//! - Integers are 32-bit. After parsing, the value is rendered to canonical decimal text and parsed again; a
//!   mismatch is reported as [`CoerceError::RoundTrip`].
//! - Surrounding whitespace is ignored for booleans and integers, never for strings.

use std::num::{IntErrorKind, ParseIntError};

/// Why a raw value cannot be used for a kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    #[error("'{0}' is neither 'true', 'false', nor an integer")]
    NotBool(String),

    #[error("'{text}' is not a 32-bit integer: {reason}")]
    NotInt { text: String, reason: String },

    #[error("'{text}' parsed as {value} but its canonical form '{canonical}' does not parse back to the same value")]
    RoundTrip { text: String, value: i32, canonical: String },

    #[error("'{0}' is not a valid array")]
    EmptyArray(String),
}

/// A successfully coerced boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolCoercion {
    pub value: bool,
    /// The value was an integer interpreted as a boolean.
    pub from_integer: bool,
}

/// Coerce text to a boolean.
///
/// ## Examples
/// ```rust
/// use defconst_core::coerce::coerce_bool;
///
/// assert!(coerce_bool("TRUE").unwrap().value);
/// let seven = coerce_bool("7").unwrap();
/// assert!(seven.value && seven.from_integer);
/// assert!(coerce_bool("yes").is_err());
/// ```
pub fn coerce_bool(text: &str) -> Result<BoolCoercion, CoerceError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Ok(BoolCoercion {
            value: true,
            from_integer: false,
        });
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Ok(BoolCoercion {
            value: false,
            from_integer: false,
        });
    }
    match trimmed.parse::<i64>() {
        Ok(n) => Ok(BoolCoercion {
            value: n != 0,
            from_integer: true,
        }),
        Err(_) => Err(CoerceError::NotBool(text.to_string())),
    }
}

/// Coerce text to a 32-bit integer, verifying that the canonical rendering round-trips.
///
/// ## Examples
/// ```rust
/// use defconst_core::coerce::coerce_int;
///
/// assert_eq!(coerce_int(" +42 "), Ok(42));
/// assert_eq!(coerce_int("-2147483648"), Ok(i32::MIN));
/// assert!(coerce_int("2147483648").is_err());
/// ```
pub fn coerce_int(text: &str) -> Result<i32, CoerceError> {
    let value = text.trim().parse::<i32>().map_err(|e| not_int(text, &e))?;
    round_trip(text, value)
}

// Guard: `i32` decimal rendering always parses back today, so the error arm only fires if that stops holding.
fn round_trip(text: &str, value: i32) -> Result<i32, CoerceError> {
    let canonical = value.to_string();
    match canonical.parse::<i32>() {
        Ok(reparsed) if reparsed == value => Ok(value),
        _ => Err(CoerceError::RoundTrip {
            text: text.to_string(),
            value,
            canonical,
        }),
    }
}

fn not_int(text: &str, err: &ParseIntError) -> CoerceError {
    let reason = match err.kind() {
        IntErrorKind::Empty => "the value is empty".to_string(),
        IntErrorKind::PosOverflow => format!("the value is larger than {}", i32::MAX),
        IntErrorKind::NegOverflow => format!("the value is smaller than {}", i32::MIN),
        _ => "the value contains characters other than an optional sign and decimal digits".to_string(),
    };
    CoerceError::NotInt {
        text: text.to_string(),
        reason,
    }
}

/// Split text on `;`, dropping empty segments.
///
/// ## Examples
/// ```rust
/// use defconst_core::coerce::split_string_array;
///
/// assert_eq!(split_string_array("a;b;;c").unwrap(), vec!["a", "b", "c"]);
/// assert!(split_string_array(";;").is_err());
/// ```
pub fn split_string_array(text: &str) -> Result<Vec<String>, CoerceError> {
    let items: Vec<String> = text.split(';').filter(|s| !s.is_empty()).map(str::to_string).collect();
    if items.is_empty() {
        return Err(CoerceError::EmptyArray(text.to_string()));
    }
    Ok(items)
}
