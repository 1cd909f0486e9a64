//! Diagnostic module - error/warning reporting infrastructure.
//!
//! §7 distinguishes accumulated, non-fatal observations (e.g. lexical
//! garbage, which the lexer silently skips but a caller may still want to
//! surface) from fatal conditions that abort parsing/lowering outright. The
//! [`Handler`] accumulates the former; the latter are returned as `Err` by
//! the component that detected them and are *also* convertible into a
//! [`Diagnostic`] for uniform display.

use crate::span::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl Level {
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        write!(f, "{s}")
    }
}

/// A unique code identifying a diagnostic, e.g. `E0002` for
/// `UnexpectedToken`. Not required by §7, but every diagnostic in the
/// corpus this crate is grounded on carries one, so users can grep for a
/// stable identifier rather than a message string that may be reworded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}

pub const E_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::new("E", 1);
pub const E_MISSING_DELIMITER: DiagnosticCode = DiagnosticCode::new("E", 2);
pub const E_STRUCTURAL_MISMATCH: DiagnosticCode = DiagnosticCode::new("E", 3);
pub const E_UNIMPLEMENTED: DiagnosticCode = DiagnosticCode::new("E", 4);
pub const W_LEXICAL_GARBAGE: DiagnosticCode = DiagnosticCode::new("W", 1);
pub const W_UNKNOWN_ESCAPE: DiagnosticCode = DiagnosticCode::new("W", 2);

/// A fully-formed diagnostic: severity, message, and the span it points at.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "{}[{}] at {}:{}: {}",
                self.level, code, self.span.line, self.span.column, self.message
            ),
            None => write!(
                f,
                "{} at {}:{}: {}",
                self.level, self.span.line, self.span.column, self.message
            ),
        }
    }
}

/// Fluent builder for a [`Diagnostic`].
pub struct DiagnosticBuilder {
    diag: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            diag: Diagnostic {
                level: Level::Error,
                message: message.into(),
                span: Span::DUMMY,
                code: None,
                notes: Vec::new(),
            },
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            diag: Diagnostic {
                level: Level::Warning,
                message: message.into(),
                span: Span::DUMMY,
                code: None,
                notes: Vec::new(),
            },
        }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.diag.span = span;
        self
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.diag.code = Some(code);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.diag.notes.push(note.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        self.diag
    }

    pub fn emit(self, handler: &Handler) {
        handler.push(self.build());
    }
}

/// Accumulates non-fatal diagnostics across a single file's lex/parse/lower
/// pass (§5: cancellation is cooperative at file boundaries — a caller
/// processing many files can inspect one file's handler, discard it, and
/// move to the next independently of the others).
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diag: Diagnostic) {
        self.diagnostics.borrow_mut().push(diag);
    }

    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.push(Diagnostic::error(message, span));
    }

    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.push(Diagnostic::warning(message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level.is_error())
            .count()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_tracks_errors_separately_from_warnings() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        handler.warning("unused binding", Span::DUMMY);
        assert!(!handler.has_errors());
        handler.error("unexpected token", Span::DUMMY);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn builder_produces_displayable_diagnostic() {
        let handler = Handler::new();
        DiagnosticBuilder::error("expected `;`")
            .code(E_MISSING_DELIMITER)
            .span(Span::new(10, 11, 2, 3))
            .emit(&handler);
        let diags = handler.take();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].to_string().contains("E0002"));
    }
}
