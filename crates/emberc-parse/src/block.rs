//! Block and statement parsing (§4.2 "Blocks").

use emberc_lex::TokenKind;
use emberc_util::Span;

use crate::tree::{Construct, ParseTree};
use crate::{ParseResult, Parser, ParserError};

impl<'a> Parser<'a> {
    pub(crate) fn parse_block(&mut self) -> ParseResult<ParseTree> {
        let open = self.expect_lexeme(TokenKind::CurlyBracket, "{")?;
        let mut statements = Vec::new();

        while !self.peek_lexeme(TokenKind::CurlyBracket, "}") {
            if self.is_at_end() {
                return Err(ParserError::MissingDelimiter {
                    delimiter: "}".into(),
                    span: self.current_span(),
                });
            }
            statements.push(self.parse_statement()?);
        }

        let close = self.expect_lexeme(TokenKind::CurlyBracket, "}")?;
        Ok(ParseTree::Branch {
            construct: Construct::Block,
            children: statements,
            extents: open.extents.merge(close.extents),
        })
    }

    /// A statement is a nested block, `return expr;`, `unreachable;`, a
    /// binding (reusing the `ValueDefinition` shape), or an expression
    /// terminated by `;`. None of these introduce their own parse-tree
    /// construct beyond `ReturnStatement` — a binding is a bare
    /// `ValueDefinition` branch and an expression statement is the bare
    /// expression tree, both widened to their enclosing `;` (§3: the parse
    /// tree's closed construct set has no generic statement wrapper).
    fn parse_statement(&mut self) -> ParseResult<ParseTree> {
        if self.peek_lexeme(TokenKind::CurlyBracket, "{") {
            return self.parse_block();
        }

        if self.peek_lexeme(TokenKind::Keyword, "return") {
            let start = self
                .select_lexeme(TokenKind::Keyword, "return")
                .expect("just peeked");
            let expr = self.parse_expression()?;
            let semicolon = self.expect_lexeme(TokenKind::Semicolon, ";")?;
            let extents = start.extents.merge(expr.extents()).merge(semicolon.extents);
            return Ok(ParseTree::Branch {
                construct: Construct::ReturnStatement,
                children: vec![expr],
                extents,
            });
        }

        if self.peek_lexeme(TokenKind::Keyword, "unreachable") {
            let token = self
                .select_lexeme(TokenKind::Keyword, "unreachable")
                .expect("just peeked");
            let semicolon = self.expect_lexeme(TokenKind::Semicolon, ";")?;
            let extents = token.extents.merge(semicolon.extents);
            return Ok(ParseTree::leaf(token).with_extents(extents));
        }

        if let Some(binding) = self.try_parse_binding_statement()? {
            return Ok(binding);
        }

        let expr = self.parse_expression()?;
        let semicolon = self.expect_lexeme(TokenKind::Semicolon, ";")?;
        let extents = expr.extents().merge(semicolon.extents);
        Ok(expr.with_extents(extents))
    }

    /// Tentatively parse a `ValueDefinition`-shaped binding: head, pattern,
    /// then `=` or `{`. Restores the cursor and reports no binding if the
    /// shape doesn't hold, so the caller falls back to an expression
    /// statement.
    fn try_parse_binding_statement(&mut self) -> ParseResult<Option<ParseTree>> {
        if !(self.peek_lexeme(TokenKind::Keyword, "let") || self.peek_kind(TokenKind::Identifier)) {
            return Ok(None);
        }

        let mark = self.index;
        let modifiers_anchor = self.current_span();

        let head = if self.peek_lexeme(TokenKind::Keyword, "let") {
            self.select_lexeme(TokenKind::Keyword, "let").expect("just peeked")
        } else {
            self.select_kind(TokenKind::Identifier).expect("just peeked")
        };
        let head_span = head.extents;

        let pattern = match self.parse_pattern() {
            Ok(pattern) => pattern,
            Err(_) => {
                self.index = mark;
                return Ok(None);
            }
        };

        if !(self.peek_lexeme(TokenKind::EqualSign, "=")
            || self.peek_lexeme(TokenKind::CurlyBracket, "{"))
        {
            self.index = mark;
            return Ok(None);
        }

        let modifiers = ParseTree::branch(Construct::Modifiers, Vec::new(), modifiers_anchor);
        let body = self.parse_body()?;
        let children = vec![modifiers, ParseTree::leaf(head), pattern, body];
        let extents =
            Span::merge_all(std::iter::once(head_span).chain(children.iter().map(ParseTree::extents)));
        Ok(Some(ParseTree::Branch {
            construct: Construct::ValueDefinition,
            children,
            extents,
        }))
    }
}
