//! Lowerer error kinds (§7): `StructuralMismatch` and `Unimplemented`.

use emberc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LowerError {
    #[error("structural mismatch: expected {expected}, found {found}")]
    StructuralMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unimplemented lowering: {construct}")]
    Unimplemented { construct: String, span: Span },
}

impl LowerError {
    pub fn span(&self) -> Span {
        match self {
            LowerError::StructuralMismatch { span, .. } => *span,
            LowerError::Unimplemented { span, .. } => *span,
        }
    }
}

pub type LowerResult<T> = Result<T, LowerError>;
