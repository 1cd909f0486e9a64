//! emberc-parse - recursive-descent parser over a set-valued token stream.
//!
//! The parser never linearises the stream ahead of time (§9 "Recursive
//! descent with look-across"). Every decision point asks the current
//! candidate set for a token matching a predicate; the predicate itself —
//! not an upstream resolution pass — is what discriminates `let` the
//! keyword from `let` the identifier.

#![forbid(unsafe_code)]

mod block;
mod error;
mod expr;
mod items;
mod pattern;
mod tree;
mod types;

pub use error::{ParseResult, ParserError};
pub use tree::{Construct, ParseTree};

use emberc_lex::{Token, TokenKind, TokenSet, TokenStream};
use emberc_util::{Handler, Span};

/// Recursive-descent parser driven by a `TokenStream` rather than a linear
/// token vector.
pub struct Parser<'a> {
    stream: &'a TokenStream,
    positions: Vec<usize>,
    index: usize,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(stream: &'a TokenStream, handler: &'a Handler) -> Self {
        let positions: Vec<usize> = stream.iter().map(|(pos, _)| pos).collect();
        Self {
            stream,
            positions,
            index: 0,
            handler,
        }
    }

    fn is_at_end(&self) -> bool {
        self.index >= self.positions.len()
    }

    fn current_set(&self) -> Option<&'a TokenSet> {
        let pos = *self.positions.get(self.index)?;
        self.stream.candidates_at(pos)
    }

    /// A span to anchor an error or an empty branch at the current cursor
    /// position: the first candidate's start, or the end of the file.
    fn current_span(&self) -> Span {
        if let Some(set) = self.current_set() {
            if let Some(token) = set.first() {
                return Span::with_file(
                    token.extents.start,
                    token.extents.start,
                    self.stream.file_id(),
                    token.extents.line,
                    token.extents.column,
                );
            }
        }
        Span::with_file(0, 0, self.stream.file_id(), 0, 0)
    }

    fn advance_past(&mut self) {
        self.index += 1;
    }

    fn select_where(&mut self, pred: impl Fn(&Token) -> bool) -> Option<Token> {
        let token = *self.current_set()?.iter().find(|t| pred(t))?;
        self.advance_past();
        Some(token)
    }

    fn peek_where(&self, pred: impl Fn(&Token) -> bool) -> bool {
        self.current_set()
            .map(|set| set.iter().any(|t| pred(t)))
            .unwrap_or(false)
    }

    fn peek_kind(&self, kind: TokenKind) -> bool {
        self.peek_where(|t| t.kind == kind)
    }

    fn select_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.select_where(|t| t.kind == kind)
    }

    fn select_lexeme(&mut self, kind: TokenKind, lexeme: &str) -> Option<Token> {
        self.select_where(|t| t.kind == kind && t.lexeme.as_str() == lexeme)
    }

    fn peek_lexeme(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.peek_where(|t| t.kind == kind && t.lexeme.as_str() == lexeme)
    }

    fn expect_kind(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        self.select_kind(kind)
            .ok_or_else(|| ParserError::UnexpectedToken {
                expected: expected.into(),
                span: self.current_span(),
            })
    }

    fn expect_lexeme(&mut self, kind: TokenKind, lexeme: &'static str) -> ParseResult<Token> {
        self.select_lexeme(kind, lexeme)
            .ok_or_else(|| ParserError::MissingDelimiter {
                delimiter: lexeme.into(),
                span: self.current_span(),
            })
    }

    /// Parse a complete file: definitions read until the stream is
    /// exhausted (§4.2 "Top level").
    pub fn parse_file(&mut self) -> ParseResult<ParseTree> {
        let mut definitions = Vec::new();
        while !self.is_at_end() {
            let definition = self.parse_definition()?;
            definitions.push(definition);
        }
        let extents = if definitions.is_empty() {
            Span::with_file(0, 0, self.stream.file_id(), 1, 1)
        } else {
            Span::merge_all(definitions.iter().map(ParseTree::extents))
        };
        Ok(ParseTree::Branch {
            construct: Construct::File,
            children: definitions,
            extents,
        })
    }
}

/// Parse an entire token stream into a `File` parse tree, reporting the
/// fatal diagnostic (if any) to `handler` before returning it.
pub fn parse(stream: &TokenStream, handler: &Handler) -> ParseResult<ParseTree> {
    let mut parser = Parser::new(stream, handler);
    parser.parse_file().inspect_err(|err| {
        handler.error(err.to_string(), err.span());
    })
}
