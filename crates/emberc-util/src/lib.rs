//! emberc-util - shared span, symbol, and diagnostic infrastructure.
//!
//! This crate carries no language semantics of its own; it is the ambient
//! stack `emberc-lex`, `emberc-parse`, and `emberc-lower` all depend on so
//! that a `Span` means the same thing everywhere and an identifier is
//! compared by `Symbol`, not by re-allocating and comparing `String`s at
//! every tree node.

#![forbid(unsafe_code)]

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
