//! Diagnostics and error reporting for defconst
//!
//! Every problem found while compiling a declaration list is recorded as a [`Diagnostic`] in a run-scoped
//! [`Diagnostics`] collector. Nothing here aborts processing: the collector only answers, at the end of the run,
//! whether any error was recorded.

use std::fmt;

/// Severity of a diagnostic. Errors block emission; warnings never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single recorded problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Raw declaration text the diagnostic refers to
    pub declaration: Option<String>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message.into())
    }

    fn new(severity: Severity, message: String) -> Self {
        Self {
            severity,
            message,
            declaration: None,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_declaration(mut self, text: impl Into<String>) -> Self {
        self.declaration = Some(text.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Run-scoped diagnostic collector.
///
/// Each compilation run owns exactly one collector; nothing is shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic (also mirrored to the debug log).
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(severity = %diagnostic.severity, "{}", diagnostic.message);
        self.entries.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.entries.len() - self.error_count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| !d.is_error())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Render a diagnostic for a terminal.
pub fn format_diagnostic(diagnostic: &Diagnostic, color: bool) -> String {
    let (kind_color, cyan, bold, reset) = if color {
        let kind_color = match diagnostic.severity {
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
        };
        (kind_color, "\x1b[36m", "\x1b[1m", "\x1b[0m")
    } else {
        ("", "", "", "")
    };

    let mut out = format!(
        "{bold}{kind_color}{kind}{reset}{bold}: {message}{reset}\n",
        kind = diagnostic.severity,
        message = diagnostic.message,
    );
    if let Some(text) = &diagnostic.declaration {
        out.push_str(&format!("  {cyan}-->{reset} {text}\n"));
    }
    for note in &diagnostic.notes {
        out.push_str(&format!("  {cyan}= note:{reset} {note}\n"));
    }
    for hint in &diagnostic.hints {
        out.push_str(&format!("  {cyan}= hint:{reset} {hint}\n"));
    }
    out
}

/// One-line tally, e.g. `1 error(s), 2 warning(s)`.
pub fn summary(diagnostics: &Diagnostics) -> String {
    format!(
        "{} error(s), {} warning(s)",
        diagnostics.error_count(),
        diagnostics.warning_count()
    )
}

/// Print every diagnostic and the tally to stderr.
pub fn print_diagnostics(diagnostics: &Diagnostics, color: bool) {
    for diagnostic in diagnostics {
        eprint!("{}", format_diagnostic(diagnostic, color));
    }
    if !diagnostics.is_empty() {
        eprintln!("{}", summary(diagnostics));
    }
}

// ============================================================================
// Message catalog
// ============================================================================

/// Constructors for every diagnostic the compiler records
pub mod errors {
    use super::*;
    use defconst_core::kinds;

    pub fn illegal_pair(text: &str) -> Diagnostic {
        Diagnostic::error(format!("Illegal key-value pair '{}'", text))
            .with_declaration(text)
            .with_hint("Declarations have the form KEY=VALUE")
    }

    pub fn invalid_identifier(name: &str, text: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "'{}' is not a valid identifier. Allowed identifiers begin with a letter or an underscore, \
             and contain only letters, digits, and underscores",
            name
        ))
        .with_declaration(text)
    }

    pub fn reserved_identifier(name: &str, text: &str) -> Diagnostic {
        Diagnostic::error(format!("'{}' is reserved and cannot be used as a constant name", name))
            .with_declaration(text)
            .with_hint("Choose a different name, e.g. add a prefix or suffix")
    }

    pub fn unsupported_kind(name: &str, hint: &str) -> Diagnostic {
        Diagnostic::warning(format!(
            "Constant '{}' has unsupported type '{}'. Supported types are: {}",
            name,
            hint,
            kinds::supported_names()
        ))
        .with_note("The constant is treated as String")
    }

    pub fn not_bool(name: &str, value: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "Can't use '{}' as a boolean value as specified by the type of constant '{}'",
            value, name
        ))
        .with_hint("Accepted values are 'true', 'false', or any integer")
    }

    pub fn numeric_bool(name: &str, value: &str, interpreted: bool) -> Diagnostic {
        Diagnostic::warning(format!(
            "Numeric value '{}' of constant '{}' was interpreted as boolean '{}'",
            value, name, interpreted
        ))
        .with_note("Nonzero integers are true, zero is false")
    }

    pub fn not_int(name: &str, value: &str, reason: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "Can't use '{}' as an integer value as specified by the type of constant '{}'",
            value, name
        ))
        .with_note(reason.to_string())
    }

    pub fn int_round_trip(name: &str, value: &str, canonical: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "Integer value '{}' of constant '{}' does not survive a round trip through its canonical form '{}'",
            value, name, canonical
        ))
    }

    pub fn empty_array(name: &str, value: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "Value '{}' of constant '{}' is not a valid array",
            value, name
        ))
        .with_hint("Separate elements with ';', e.g. a;b;c")
    }

    pub fn duplicate(name: &str, existing: &str, ignored: &str) -> Diagnostic {
        Diagnostic::warning(format!(
            "Constant '{}' was already defined. Existing value is '{}'. New value is '{}'. Ignoring the new value",
            name, existing, ignored
        ))
    }

    pub fn invalid_container(what: &str, name: &str) -> Diagnostic {
        Diagnostic::error(format!(
            "{} '{}' is not a valid identifier. Allowed identifiers begin with a letter or an underscore, \
             and contain only letters, digits, and underscores",
            what, name
        ))
    }

    pub fn reserved_container(what: &str, name: &str) -> Diagnostic {
        Diagnostic::error(format!("{} '{}' is reserved and cannot be used as an item name", what, name))
            .with_hint("Choose a different name, e.g. add a prefix or suffix")
    }

    pub fn emission_failed(err: &dyn std::error::Error) -> Diagnostic {
        Diagnostic::error(format!("Failed to write constants artifact: {}", err))
    }
}
