//! Parser error kinds (§7): `UnexpectedToken`, `MissingDelimiter`,
//! `Unimplemented`. `StructuralMismatch` is a lowerer-only kind and lives in
//! `emberc-lower`.

use emberc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserError {
    #[error("unexpected token: expected {expected}")]
    UnexpectedToken { expected: String, span: Span },

    #[error("missing delimiter `{delimiter}`")]
    MissingDelimiter { delimiter: String, span: Span },

    #[error("unimplemented grammar production: {construct}")]
    Unimplemented { construct: String, span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::MissingDelimiter { span, .. }
            | ParserError::Unimplemented { span, .. } => *span,
        }
    }
}

pub type ParseResult<T> = Result<T, ParserError>;
