//! emberc-lower - lowers a concrete parse tree into the typed AST (§4.3).
//!
//! Lowering never linearises a new traversal discipline of its own; it
//! walks the parse tree the parser already built, checking each node's
//! `Construct` tag and arity against what the grammar production that
//! produced it promises, and raising `StructuralMismatch` the moment that
//! promise is broken (§7).

#![forbid(unsafe_code)]

pub mod ast;
mod error;
mod escape;
mod lower_def;
mod lower_expr;
mod lower_pattern;
mod lower_type;
pub mod symbol_table;

pub use ast::*;
pub use error::{LowerError, LowerResult};
pub use symbol_table::{DefId, DefinitionSlot, SymbolTable};

use emberc_lex::{Token, TokenKind};
use emberc_parse::ParseTree;
use emberc_util::{Handler, Span};

fn is_literal_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer
            | TokenKind::Decimal
            | TokenKind::Character
            | TokenKind::String
            | TokenKind::Boolean
            | TokenKind::Poison
    )
}

/// Shared state for a single file's lowering pass: just the diagnostic
/// sink. Lowering needs no cursor — it recurses directly over the parse
/// tree the parser already built.
pub(crate) struct Lowerer<'a> {
    handler: &'a Handler,
}

impl<'a> Lowerer<'a> {
    fn mismatch(&self, expected: &str, found: &str, span: Span) -> LowerError {
        LowerError::StructuralMismatch {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    fn arity_mismatch(&self, construct: &str, expected: usize, found: usize, span: Span) -> LowerError {
        self.mismatch(
            &format!("{construct} with {expected} children"),
            &format!("{found} children"),
            span,
        )
    }

    /// Decode a literal leaf's lexeme into the AST's `Literal` (§4.3
    /// "Expression lowering", completed for all five variants per the
    /// ambient-stack decision recorded in `DESIGN.md`).
    fn lower_literal_token(&self, token: &Token) -> LowerResult<Literal> {
        let text = token.lexeme.as_str();
        match token.kind {
            TokenKind::Integer => text
                .parse::<i64>()
                .map(Literal::Integer)
                .map_err(|_| self.mismatch("a valid integer literal", text, token.extents)),
            TokenKind::Decimal => text
                .parse::<f64>()
                .map(Literal::Decimal)
                .map_err(|_| self.mismatch("a valid decimal literal", text, token.extents)),
            TokenKind::Boolean => match text {
                "true" => Ok(Literal::Boolean(true)),
                "false" => Ok(Literal::Boolean(false)),
                _ => Err(self.mismatch("`true` or `false`", text, token.extents)),
            },
            TokenKind::Poison => Ok(Literal::Poison),
            TokenKind::Character => {
                let body = text
                    .strip_prefix('\'')
                    .and_then(|rest| rest.strip_suffix('\''))
                    .ok_or_else(|| self.mismatch("a quoted character literal", text, token.extents))?;
                let decoded = escape::decode_escapes(body, token.extents, self.handler);
                decoded
                    .chars()
                    .next()
                    .map(Literal::Character)
                    .ok_or_else(|| self.mismatch("a non-empty character literal", text, token.extents))
            }
            TokenKind::String => {
                let body = text
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .ok_or_else(|| self.mismatch("a quoted string literal", text, token.extents))?;
                Ok(Literal::String(escape::decode_escapes(
                    body,
                    token.extents,
                    self.handler,
                )))
            }
            other => Err(self.mismatch("a literal token", &format!("{other:?}"), token.extents)),
        }
    }

    fn lower_record_key(&self, tree: &ParseTree) -> LowerResult<RecordKey> {
        match tree.as_leaf() {
            Some(token) if token.kind == TokenKind::Identifier => Ok(RecordKey::Access(token.lexeme)),
            Some(token) if is_literal_kind(token.kind) => {
                Ok(RecordKey::Literal(self.lower_literal_token(token)?))
            }
            _ => Err(self.mismatch("an identifier or literal key", "a branch", tree.extents())),
        }
    }
}

/// Lower a single file's parse tree (root construct `File`) into its
/// symbol table and flat sequence of definitions.
pub fn lower_file(file: &ParseTree, handler: &Handler) -> LowerResult<(SymbolTable, Vec<Definition>)> {
    let (construct, children) = file
        .as_branch()
        .ok_or_else(|| LowerError::StructuralMismatch {
            expected: "File".into(),
            found: "a leaf".into(),
            span: file.extents(),
        })?;
    if construct != emberc_parse::Construct::File {
        return Err(LowerError::StructuralMismatch {
            expected: "File".into(),
            found: format!("{construct:?}"),
            span: file.extents(),
        });
    }

    let lowerer = Lowerer { handler };
    let mut table = SymbolTable::new();
    let mut definitions = Vec::with_capacity(children.len());

    for child in children {
        let definition = lowerer.lower_definition(child)?;
        let name = match &definition {
            Definition::Value(def) => def.defined_identifier(),
            Definition::Procedure(def) => Some(def.identifier),
            Definition::Type(def) => Some(def.identifier),
        };
        table.insert(name, definition.clone());
        definitions.push(definition);
    }

    Ok((table, definitions))
}

/// Lower every file's tree and flatten the result (§4.3 contract, §5: the
/// aggregation across files is associative and commutative, so this is a
/// plain concatenation in input order rather than anything order-sensitive).
pub fn lower(files: &[ParseTree], handler: &Handler) -> LowerResult<Vec<Definition>> {
    let mut all = Vec::new();
    for file in files {
        let (_, definitions) = lower_file(file, handler)?;
        all.extend(definitions);
    }
    Ok(all)
}
