//! Top-level definitions (§4.2 "Top level") and the `Modifiers` wrapper.

use emberc_lex::TokenKind;
use emberc_util::Span;

use crate::tree::{Construct, ParseTree};
use crate::{ParseResult, Parser, ParserError};

impl<'a> Parser<'a> {
    /// An optional leading `Modifier` token, captured in a `Modifiers`
    /// branch. Absent, it collapses to a zero-width node anchored at the
    /// following token's start (§9 open question 2, invariant 1).
    fn parse_modifiers(&mut self) -> ParseTree {
        let anchor = self.current_span();
        match self.select_kind(TokenKind::Modifier) {
            Some(token) => {
                ParseTree::branch(Construct::Modifiers, vec![ParseTree::leaf(token)], anchor)
            }
            None => ParseTree::branch(Construct::Modifiers, Vec::new(), anchor),
        }
    }

    /// A definition begins with optional modifiers, then either `type`, or
    /// `let`/an identifier used as a type annotation.
    pub(crate) fn parse_definition(&mut self) -> ParseResult<ParseTree> {
        let modifiers = self.parse_modifiers();

        if self.peek_lexeme(TokenKind::Keyword, "type") {
            return self.parse_type_definition(modifiers);
        }

        if self.peek_lexeme(TokenKind::Keyword, "let") || self.peek_kind(TokenKind::Identifier) {
            return self.parse_value_or_procedure_definition(modifiers);
        }

        Err(ParserError::UnexpectedToken {
            expected: "a definition (`type`, `let`, or a type-annotation identifier)".into(),
            span: self.current_span(),
        })
    }

    fn parse_type_definition(&mut self, modifiers: ParseTree) -> ParseResult<ParseTree> {
        let start = self.expect_lexeme(TokenKind::Keyword, "type")?;
        let name = self.expect_kind(TokenKind::Identifier, "a type name")?;
        self.expect_lexeme(TokenKind::EqualSign, "=")?;
        let definition = self.parse_type_expression()?;
        let end = self.expect_lexeme(TokenKind::Semicolon, ";")?;

        let children = vec![modifiers, ParseTree::leaf(name), definition];
        let extents = Span::merge_all(
            std::iter::once(start.extents)
                .chain(children.iter().map(ParseTree::extents))
                .chain(std::iter::once(end.extents)),
        );
        Ok(ParseTree::Branch {
            construct: Construct::TypeDefinition,
            children,
            extents,
        })
    }

    fn parse_value_or_procedure_definition(&mut self, modifiers: ParseTree) -> ParseResult<ParseTree> {
        let head = if self.peek_lexeme(TokenKind::Keyword, "let") {
            self.expect_lexeme(TokenKind::Keyword, "let")?
        } else {
            self.expect_kind(TokenKind::Identifier, "a type annotation")?
        };
        let head_span = head.extents;
        let head_leaf = ParseTree::leaf(head);

        let bind_pattern = self.parse_pattern()?;

        if self.peek_lexeme(TokenKind::Parenthesis, "(") {
            let parameter = self.parse_record_pattern()?;
            let body = self.parse_body()?;
            let children = vec![modifiers, head_leaf, bind_pattern, parameter, body];
            let extents = Span::merge_all(
                std::iter::once(head_span).chain(children.iter().map(ParseTree::extents)),
            );
            Ok(ParseTree::Branch {
                construct: Construct::ProcedureDefinition,
                children,
                extents,
            })
        } else {
            let body = self.parse_body()?;
            let children = vec![modifiers, head_leaf, bind_pattern, body];
            let extents = Span::merge_all(
                std::iter::once(head_span).chain(children.iter().map(ParseTree::extents)),
            );
            Ok(ParseTree::Branch {
                construct: Construct::ValueDefinition,
                children,
                extents,
            })
        }
    }

    /// A body is either `= Expression ;` or a brace-delimited block
    /// (§4.2 "Bodies").
    pub(crate) fn parse_body(&mut self) -> ParseResult<ParseTree> {
        if self.peek_kind(TokenKind::CurlyBracket) {
            return self.parse_block();
        }
        let equals = self.expect_lexeme(TokenKind::EqualSign, "=")?;
        let expr = self.parse_expression()?;
        let semicolon = self.expect_lexeme(TokenKind::Semicolon, ";")?;
        let extents = equals.extents.merge(expr.extents()).merge(semicolon.extents);
        Ok(expr.with_extents(extents))
    }
}
