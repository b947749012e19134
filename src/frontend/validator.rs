//! Turn raw declarations into validated constants.
//!
//! [`validate`] runs the per-declaration algorithm:
//!
//! 1. blank text is skipped silently;
//! 2. the text is split on the first `=` into name and value (no `=` means an empty value);
//! 3. the name must be non-blank and satisfy the identifier rule;
//! 4. the kind hint resolves to a [`ValueKind`], falling back to `String` with a warning;
//! 5. the value is coerced for the kind.
//!
//! Every failure is recorded in the caller's [`Diagnostics`] and yields `None`; nothing here returns an error.

use defconst_core::ConstValue;
use defconst_core::coerce::{self, CoerceError};
use defconst_core::ident::{self, IdentError};
use defconst_core::kinds::{self, ValueKind};

use super::declaration::RawDeclaration;
use super::diagnostics::{Diagnostics, errors};
use crate::table::Constant;

/// Validate one declaration.
pub fn validate(decl: &RawDeclaration, diagnostics: &mut Diagnostics) -> Option<Constant> {
    let text = decl.text.as_str();
    if text.trim().is_empty() {
        return None;
    }

    let (name, value) = text.split_once('=').unwrap_or((text, ""));

    if name.trim().is_empty() {
        diagnostics.push(errors::illegal_pair(text));
        return None;
    }
    match ident::check_identifier(name) {
        Ok(()) => {}
        Err(IdentError::Malformed) => {
            diagnostics.push(errors::invalid_identifier(name, text));
            return None;
        }
        Err(IdentError::Reserved) => {
            diagnostics.push(errors::reserved_identifier(name, text));
            return None;
        }
    }

    let kind = resolve_kind(name, decl.kind_hint.as_deref(), diagnostics);
    let value = coerce_value(name, kind, value, diagnostics)?;
    Some(Constant::new(name, value))
}

/// Resolve a kind hint; blank or missing means `String`.
pub fn resolve_kind(name: &str, hint: Option<&str>, diagnostics: &mut Diagnostics) -> ValueKind {
    match hint.map(str::trim).filter(|h| !h.is_empty()) {
        None => ValueKind::String,
        Some(hint) => kinds::from_str(hint).unwrap_or_else(|| {
            diagnostics.push(errors::unsupported_kind(name, hint));
            ValueKind::String
        }),
    }
}

fn coerce_value(name: &str, kind: ValueKind, value: &str, diagnostics: &mut Diagnostics) -> Option<ConstValue> {
    let coerced = match kind {
        ValueKind::String => Ok(ConstValue::String(value.to_string())),
        ValueKind::Bool => coerce::coerce_bool(value).map(|b| {
            if b.from_integer {
                diagnostics.push(errors::numeric_bool(name, value, b.value));
            }
            ConstValue::Bool(b.value)
        }),
        ValueKind::Int => coerce::coerce_int(value).map(ConstValue::Int),
        ValueKind::StringArray => coerce::split_string_array(value).map(ConstValue::StringArray),
    };

    match coerced {
        Ok(v) => Some(v),
        Err(err) => {
            diagnostics.push(coerce_diagnostic(name, value, &err));
            None
        }
    }
}

fn coerce_diagnostic(name: &str, value: &str, err: &CoerceError) -> super::diagnostics::Diagnostic {
    match err {
        CoerceError::NotBool(_) => errors::not_bool(name, value),
        CoerceError::NotInt { reason, .. } => errors::not_int(name, value, reason),
        CoerceError::RoundTrip { canonical, .. } => errors::int_round_trip(name, value, canonical),
        CoerceError::EmptyArray(_) => errors::empty_array(name, value),
    }
}
