//! Error types for misuse of the ambient utility types themselves (as
//! opposed to the lexer/parser/lowerer's own fatal error kinds, which live
//! in their respective crates per §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("file not found: {0:?}")]
    FileNotFound(crate::span::FileId),

    #[error("span out of bounds: file has {file_len} bytes, span is {span_start}..{span_end}")]
    SpanOutOfBounds {
        file_len: usize,
        span_start: usize,
        span_end: usize,
    },
}

#[derive(Debug, Error)]
pub enum IndexVecError {
    #[error("index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;
pub type IndexVecResult<T> = std::result::Result<T, IndexVecError>;
