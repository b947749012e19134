//! Native constant values.
//!
//! [`ConstValue`] is the tagged union every emitter consumes: each variant carries an already-validated native value,
//! so emission never re-parses text.
//!
//! ## Notes
//!
//! - [`ConstValue::rendered`] is the canonical literal text (Rust literal syntax). It is used for duplicate
//!   detection and user-facing messages; two declarations whose values coerce to the same rendered text are the
//!   same value.

use serde::{Deserialize, Serialize};

use crate::kinds::ValueKind;

/// A validated constant value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstValue {
    String(String),
    Bool(bool),
    Int(i32),
    StringArray(Vec<String>),
}

impl ConstValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConstValue::String(_) => ValueKind::String,
            ConstValue::Bool(_) => ValueKind::Bool,
            ConstValue::Int(_) => ValueKind::Int,
            ConstValue::StringArray(_) => ValueKind::StringArray,
        }
    }

    /// Literal text of the value, with `"` and `\` escaped inside string literals.
    ///
    /// ## Examples
    /// ```rust
    /// use defconst_core::ConstValue;
    ///
    /// assert_eq!(ConstValue::String(r#"say "hi""#.into()).rendered(), r#""say \"hi\"""#);
    /// assert_eq!(ConstValue::Bool(true).rendered(), "true");
    /// assert_eq!(ConstValue::StringArray(vec!["a".into(), "b".into()]).rendered(), r#"["a", "b"]"#);
    /// ```
    pub fn rendered(&self) -> String {
        match self {
            ConstValue::String(s) => quote_str(s),
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Int(n) => n.to_string(),
            ConstValue::StringArray(items) => {
                let quoted: Vec<String> = items.iter().map(|s| quote_str(s)).collect();
                format!("[{}]", quoted.join(", "))
            }
        }
    }
}

fn quote_str(s: &str) -> String {
    // `Debug` for `str` produces a double-quoted Rust literal with escapes.
    format!("{s:?}")
}

impl std::fmt::Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_variant() {
        assert_eq!(ConstValue::Int(1).kind(), ValueKind::Int);
        assert_eq!(ConstValue::StringArray(vec![]).kind(), ValueKind::StringArray);
    }

    #[test]
    fn strings_escape_quotes_and_backslashes() {
        assert_eq!(ConstValue::String(r"C:\tmp".into()).rendered(), r#""C:\\tmp""#);
        assert_eq!(ConstValue::String(String::new()).rendered(), r#""""#);
    }

    #[test]
    fn array_elements_are_quoted_individually() {
        let v = ConstValue::StringArray(vec!["a\"b".into(), "c".into()]);
        assert_eq!(v.rendered(), r#"["a\"b", "c"]"#);
    }

    #[test]
    fn negative_ints_render_canonically() {
        assert_eq!(ConstValue::Int(-5).rendered(), "-5");
    }
}
