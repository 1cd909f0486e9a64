//! Pattern and record-pattern parsing (§4.2 "Patterns", "Record patterns").

use emberc_lex::TokenKind;

use crate::tree::{Construct, ParseTree};
use crate::{ParseResult, Parser, ParserError};

pub(crate) fn is_literal_kind(kind: TokenKind) -> bool {
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

impl<'a> Parser<'a> {
    /// An identifier leaf, a literal leaf, or a record pattern, optionally
    /// followed by a `:` type tag.
    pub(crate) fn parse_pattern(&mut self) -> ParseResult<ParseTree> {
        let base = if self.peek_lexeme(TokenKind::Parenthesis, "(") {
            self.parse_record_pattern()?
        } else if let Some(token) = self.select_kind(TokenKind::Identifier) {
            ParseTree::leaf(token)
        } else if let Some(token) = self.select_where(|t| is_literal_kind(t.kind)) {
            ParseTree::leaf(token)
        } else {
            return Err(ParserError::UnexpectedToken {
                expected: "a pattern".into(),
                span: self.current_span(),
            });
        };

        if self.peek_kind(TokenKind::Colon) {
            let colon = self.select_kind(TokenKind::Colon).expect("just peeked");
            let type_expr = self.parse_type_expression()?;
            let extents = base
                .extents()
                .merge(colon.extents)
                .merge(type_expr.extents());
            return Ok(ParseTree::Branch {
                construct: Construct::TypeTag,
                children: vec![base, type_expr],
                extents,
            });
        }

        Ok(base)
    }

    /// `(` then zero or more comma-separated items, then `)`. Each item is
    /// either a `key = pattern` pair or a bare pattern.
    pub(crate) fn parse_record_pattern(&mut self) -> ParseResult<ParseTree> {
        let open = self.expect_lexeme(TokenKind::Parenthesis, "(")?;
        let mut items = Vec::new();

        while !self.peek_lexeme(TokenKind::Parenthesis, ")") {
            items.push(self.parse_record_pattern_item()?);
            if self.peek_lexeme(TokenKind::Comma, ",") {
                self.select_lexeme(TokenKind::Comma, ",");
            } else {
                break;
            }
        }

        let close = self.expect_lexeme(TokenKind::Parenthesis, ")")?;
        Ok(ParseTree::Branch {
            construct: Construct::RecordPattern,
            children: items,
            extents: open.extents.merge(close.extents),
        })
    }

    fn parse_record_pattern_item(&mut self) -> ParseResult<ParseTree> {
        if self.peek_kind(TokenKind::Identifier) || self.peek_where(|t| is_literal_kind(t.kind)) {
            let mark = self.index;
            let head = self
                .select_where(|t| t.kind == TokenKind::Identifier || is_literal_kind(t.kind))
                .expect("just peeked");

            if self.peek_lexeme(TokenKind::EqualSign, "=") {
                self.select_lexeme(TokenKind::EqualSign, "=");
                let pattern = self.parse_pattern()?;
                let head_leaf = ParseTree::leaf(head);
                let extents = head_leaf.extents().merge(pattern.extents());
                return Ok(ParseTree::Branch {
                    construct: Construct::RecordPatternItem,
                    children: vec![head_leaf, pattern],
                    extents,
                });
            }

            self.index = mark;
        }

        self.parse_pattern()
    }
}
