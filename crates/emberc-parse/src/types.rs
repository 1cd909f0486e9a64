//! Type-expression parsing (§4.2 "Type expressions").

use emberc_lex::TokenKind;

use crate::tree::{Construct, ParseTree};
use crate::{ParseResult, Parser, ParserError};

impl<'a> Parser<'a> {
    /// A head (a `TypeRecord`, a bare pointer-to-inferred `ptr`, the `let`
    /// keyword, or an identifier), followed by left-associative postfix
    /// `ptr` wrapping.
    pub(crate) fn parse_type_expression(&mut self) -> ParseResult<ParseTree> {
        let mut head = if self.peek_lexeme(TokenKind::Parenthesis, "(") {
            self.parse_type_record()?
        } else if self.peek_lexeme(TokenKind::Identifier, "ptr") {
            let token = self
                .select_lexeme(TokenKind::Identifier, "ptr")
                .expect("just peeked");
            ParseTree::Branch {
                construct: Construct::PointerType,
                children: Vec::new(),
                extents: token.extents,
            }
        } else if let Some(token) = self.select_lexeme(TokenKind::Keyword, "let") {
            ParseTree::leaf(token)
        } else if let Some(token) = self.select_kind(TokenKind::Identifier) {
            ParseTree::leaf(token)
        } else {
            return Err(ParserError::UnexpectedToken {
                expected: "a type expression".into(),
                span: self.current_span(),
            });
        };

        while self.peek_lexeme(TokenKind::Identifier, "ptr") {
            let token = self
                .select_lexeme(TokenKind::Identifier, "ptr")
                .expect("just peeked");
            let extents = head.extents().merge(token.extents);
            head = ParseTree::Branch {
                construct: Construct::PointerType,
                children: vec![head],
                extents,
            };
        }

        Ok(head)
    }

    /// Parenthesised type items, `:`-keyed or bare, mirroring record-pattern
    /// item parsing (§9 open question 4).
    fn parse_type_record(&mut self) -> ParseResult<ParseTree> {
        let open = self.expect_lexeme(TokenKind::Parenthesis, "(")?;
        let mut items = Vec::new();

        while !self.peek_lexeme(TokenKind::Parenthesis, ")") {
            items.push(self.parse_type_record_item()?);
            if self.peek_lexeme(TokenKind::Comma, ",") {
                self.select_lexeme(TokenKind::Comma, ",");
            } else {
                break;
            }
        }

        let close = self.expect_lexeme(TokenKind::Parenthesis, ")")?;
        Ok(ParseTree::Branch {
            construct: Construct::TypeRecord,
            children: items,
            extents: open.extents.merge(close.extents),
        })
    }

    fn parse_type_record_item(&mut self) -> ParseResult<ParseTree> {
        if self.peek_kind(TokenKind::Identifier) {
            let mark = self.index;
            let head = self.select_kind(TokenKind::Identifier).expect("just peeked");

            if self.peek_kind(TokenKind::Colon) {
                let colon = self.select_kind(TokenKind::Colon).expect("just peeked");
                let type_expr = self.parse_type_expression()?;
                let head_leaf = ParseTree::leaf(head);
                let extents = head_leaf
                    .extents()
                    .merge(colon.extents)
                    .merge(type_expr.extents());
                return Ok(ParseTree::Branch {
                    construct: Construct::TypeRecordItem,
                    children: vec![head_leaf, type_expr],
                    extents,
                });
            }

            self.index = mark;
        }

        self.parse_type_expression()
    }
}
