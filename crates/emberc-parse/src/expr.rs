//! Expression parsing (§4.2 "Expressions").

use emberc_lex::TokenKind;

use crate::pattern::is_literal_kind;
use crate::tree::{Construct, ParseTree};
use crate::{ParseResult, Parser, ParserError};

impl<'a> Parser<'a> {
    /// An expression head, optionally followed by a `:` type tag.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<ParseTree> {
        let base = self.parse_expression_head()?;

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

    fn parse_expression_head(&mut self) -> ParseResult<ParseTree> {
        if self.peek_lexeme(TokenKind::Parenthesis, "(") {
            return self.parse_record_expression();
        }
        if self.peek_lexeme(TokenKind::Keyword, "if") {
            return self.parse_conditional();
        }
        if self.peek_lexeme(TokenKind::Keyword, "map") {
            return self.parse_map();
        }
        if self.peek_kind(TokenKind::Identifier) || self.peek_where(|t| is_literal_kind(t.kind)) {
            return self.parse_identifier_or_literal_head();
        }
        Err(ParserError::UnexpectedToken {
            expected: "an expression".into(),
            span: self.current_span(),
        })
    }

    fn parse_identifier_or_literal_head(&mut self) -> ParseResult<ParseTree> {
        let mark = self.index;
        let head = self
            .select_where(|t| t.kind == TokenKind::Identifier || is_literal_kind(t.kind))
            .expect("caller already confirmed a matching head");
        let is_identifier = head.kind == TokenKind::Identifier;

        if is_identifier && self.peek_lexeme(TokenKind::Parenthesis, "(") {
            let argument = self.parse_record_expression()?;
            let head_leaf = ParseTree::leaf(head);
            let extents = head_leaf.extents().merge(argument.extents());
            return Ok(ParseTree::Branch {
                construct: Construct::ProcedureCall,
                children: vec![head_leaf, argument],
                extents,
            });
        }

        if !is_identifier && !self.peek_lexeme(TokenKind::Dot, ".") {
            return Ok(ParseTree::leaf(head));
        }

        if is_identifier && !self.peek_lexeme(TokenKind::Dot, ".") {
            return Ok(ParseTree::leaf(head));
        }

        self.index = mark;
        self.parse_qualified_identifier()
    }

    /// A dot-separated chain of identifier/literal keys, left-leaning.
    /// A single component degrades to a bare leaf.
    fn parse_qualified_identifier(&mut self) -> ParseResult<ParseTree> {
        let first = self
            .select_where(|t| t.kind == TokenKind::Identifier || is_literal_kind(t.kind))
            .ok_or_else(|| ParserError::UnexpectedToken {
                expected: "an identifier or literal".into(),
                span: self.current_span(),
            })?;
        let mut accumulated = ParseTree::leaf(first);

        while self.peek_lexeme(TokenKind::Dot, ".") {
            let dot = self.select_lexeme(TokenKind::Dot, ".").expect("just peeked");
            let key = self
                .select_where(|t| t.kind == TokenKind::Identifier || is_literal_kind(t.kind))
                .ok_or_else(|| ParserError::UnexpectedToken {
                    expected: "an identifier or literal key".into(),
                    span: self.current_span(),
                })?;
            let key_leaf = ParseTree::leaf(key);
            let extents = accumulated
                .extents()
                .merge(dot.extents)
                .merge(key_leaf.extents());
            accumulated = ParseTree::Branch {
                construct: Construct::QualifiedIdentifier,
                children: vec![accumulated, key_leaf],
                extents,
            };
        }

        Ok(accumulated)
    }

    /// Record expressions mirror record-pattern parsing with `Expression`
    /// substituted for `Pattern` (§9 open question 1).
    fn parse_record_expression(&mut self) -> ParseResult<ParseTree> {
        let open = self.expect_lexeme(TokenKind::Parenthesis, "(")?;
        let mut items = Vec::new();

        while !self.peek_lexeme(TokenKind::Parenthesis, ")") {
            items.push(self.parse_record_expression_item()?);
            if self.peek_lexeme(TokenKind::Comma, ",") {
                self.select_lexeme(TokenKind::Comma, ",");
            } else {
                break;
            }
        }

        let close = self.expect_lexeme(TokenKind::Parenthesis, ")")?;
        Ok(ParseTree::Branch {
            construct: Construct::RecordExpression,
            children: items,
            extents: open.extents.merge(close.extents),
        })
    }

    fn parse_record_expression_item(&mut self) -> ParseResult<ParseTree> {
        if self.peek_kind(TokenKind::Identifier) || self.peek_where(|t| is_literal_kind(t.kind)) {
            let mark = self.index;
            let head = self
                .select_where(|t| t.kind == TokenKind::Identifier || is_literal_kind(t.kind))
                .expect("just peeked");

            if self.peek_lexeme(TokenKind::EqualSign, "=") {
                self.select_lexeme(TokenKind::EqualSign, "=");
                let value = self.parse_expression()?;
                let head_leaf = ParseTree::leaf(head);
                let extents = head_leaf.extents().merge(value.extents());
                return Ok(ParseTree::Branch {
                    construct: Construct::RecordExpressionItem,
                    children: vec![head_leaf, value],
                    extents,
                });
            }

            self.index = mark;
        }

        self.parse_expression()
    }

    fn parse_conditional(&mut self) -> ParseResult<ParseTree> {
        let start = self.expect_lexeme(TokenKind::Keyword, "if")?;
        let condition = self.parse_expression()?;
        let consequent = self.parse_block_or_expression()?;
        self.expect_lexeme(TokenKind::Keyword, "else")?;
        let alternative = self.parse_block_or_terminal_expression()?;
        let extents = start
            .extents
            .merge(condition.extents())
            .merge(consequent.extents())
            .merge(alternative.extents());
        Ok(ParseTree::Branch {
            construct: Construct::Conditional,
            children: vec![condition, consequent, alternative],
            extents,
        })
    }

    fn parse_map(&mut self) -> ParseResult<ParseTree> {
        let start = self.expect_lexeme(TokenKind::Keyword, "map")?;
        let binding = self.parse_pattern()?;
        self.expect_lexeme(TokenKind::Keyword, "over")?;
        let collection = self.parse_expression()?;
        let transformation = self.parse_body()?;
        let extents = start
            .extents
            .merge(binding.extents())
            .merge(collection.extents())
            .merge(transformation.extents());
        Ok(ParseTree::Branch {
            construct: Construct::Map,
            children: vec![binding, collection, transformation],
            extents,
        })
    }

    fn parse_block_or_expression(&mut self) -> ParseResult<ParseTree> {
        if self.peek_lexeme(TokenKind::CurlyBracket, "{") {
            self.parse_block()
        } else {
            self.parse_expression()
        }
    }

    /// A terminal alternative: a block needs no trailing `;`, a bare
    /// expression does.
    fn parse_block_or_terminal_expression(&mut self) -> ParseResult<ParseTree> {
        if self.peek_lexeme(TokenKind::CurlyBracket, "{") {
            self.parse_block()
        } else {
            let expr = self.parse_expression()?;
            let semicolon = self.expect_lexeme(TokenKind::Semicolon, ";")?;
            let extents = expr.extents().merge(semicolon.extents);
            Ok(expr.with_extents(extents))
        }
    }
}
