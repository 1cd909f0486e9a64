//! Set-valued lexer (§4.1).
//!
//! Unlike a conventional lexer, `lex` does not commit to a single token at
//! each position. It tries every lexical category against the remainder of
//! the source and keeps every category that matches, minus one specific
//! resolution: an `Identifier` candidate is dropped whenever a literal
//! candidate (Integer, Decimal, Character, String, Boolean, Poison) also
//! matched at the same position, since those are never meant to be usable
//! as bare identifiers. `Keyword` and `Modifier` candidates are *not*
//! dropped — `let` is simultaneously a valid `Keyword` and (per the
//! grammar) a legal `Identifier` lexeme, and resolving that ambiguity is
//! left to the parser's context-driven disambiguation (§4.2).
//!
//! The lexer never fails: unrecognized input advances the cursor by one
//! byte and leaves that position absent from the stream, to be reported as
//! a diagnostic by whichever downstream consumer asked for a token there.

#![forbid(unsafe_code)]

mod categories;
mod cursor;
mod unicode;

use std::collections::BTreeMap;

use cursor::Cursor;
use emberc_util::{FileId, Span, Symbol};

/// The closed set of lexical categories (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Modifier,
    Semicolon,
    Colon,
    EqualSign,
    Parenthesis,
    CurlyBracket,
    Comma,
    Dot,
    Integer,
    Decimal,
    Character,
    String,
    Boolean,
    Poison,
    Identifier,
}

/// A single candidate token. `extents` is the half-open span covering the
/// token's content *plus* any whitespace trailing it, per the source
/// contract in `emberc_util::Span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Symbol,
    pub extents: Span,
}

/// The candidate set surviving at one cursor position, ordered the way the
/// category table in §4.1 is ordered so that iteration is deterministic.
pub type TokenSet = Vec<Token>;

/// Every starting byte offset in the file that produced at least one
/// candidate, mapped to its candidate set. A `BTreeMap` (not a `HashMap`)
/// so iteration order matches source order, which the scenario tables in
/// §8 depend on for reproducibility.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    positions: BTreeMap<usize, TokenSet>,
    file_id: FileId,
}

impl TokenStream {
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn candidates_at(&self, position: usize) -> Option<&TokenSet> {
        self.positions.get(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &TokenSet)> {
        self.positions.iter().map(|(pos, set)| (*pos, set))
    }
}

fn is_literal(kind: TokenKind) -> bool {
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

/// Skip whitespace starting at `rest`, returning how many bytes to skip.
fn trailing_whitespace_len(rest: &str) -> usize {
    rest.len()
        - rest.trim_start_matches(char::is_whitespace).len()
}

/// Run every category matcher at the current cursor position. Returns the
/// candidates found, each paired with the byte length of its matched
/// content (before whitespace is appended).
fn match_all(rest: &str) -> Vec<(TokenKind, usize)> {
    use categories::*;

    let mut found = Vec::new();

    if let Some(len) = match_integer(rest) {
        found.push((TokenKind::Integer, len));
    }
    if let Some(len) = match_decimal(rest) {
        found.push((TokenKind::Decimal, len));
    }
    if let Some(len) = match_character(rest) {
        found.push((TokenKind::Character, len));
    }
    if let Some(len) = match_string(rest) {
        found.push((TokenKind::String, len));
    }
    if let Some(len) = match_boolean(rest) {
        found.push((TokenKind::Boolean, len));
    }
    if let Some(len) = match_poison(rest) {
        found.push((TokenKind::Poison, len));
    }
    if let Some(len) = match_keyword(rest) {
        found.push((TokenKind::Keyword, len));
    }
    if let Some(len) = match_modifier(rest) {
        found.push((TokenKind::Modifier, len));
    }
    if let Some(len) = match_single(rest, &[';']) {
        found.push((TokenKind::Semicolon, len));
    }
    if let Some(len) = match_single(rest, &[':']) {
        found.push((TokenKind::Colon, len));
    }
    if let Some(len) = match_single(rest, &['=']) {
        found.push((TokenKind::EqualSign, len));
    }
    if let Some(len) = match_single(rest, &['(', ')']) {
        found.push((TokenKind::Parenthesis, len));
    }
    if let Some(len) = match_single(rest, &['{', '}']) {
        found.push((TokenKind::CurlyBracket, len));
    }
    if let Some(len) = match_single(rest, &[',']) {
        found.push((TokenKind::Comma, len));
    }
    if let Some(len) = match_single(rest, &['.']) {
        found.push((TokenKind::Dot, len));
    }
    if let Some(len) = match_identifier(rest) {
        found.push((TokenKind::Identifier, len));
    }

    let has_literal = found.iter().any(|(kind, _)| is_literal(*kind));
    if has_literal {
        found.retain(|(kind, _)| *kind != TokenKind::Identifier);
    }

    found
}

/// Lex an entire source file into a `TokenStream`.
pub fn lex(source: &str, file_id: FileId) -> TokenStream {
    let mut cursor = Cursor::new(source);
    let mut positions = BTreeMap::new();

    while !cursor.is_at_end() {
        let start = cursor.position();
        let start_line = cursor.line();
        let start_column = cursor.column();
        let rest = cursor.remainder();
        let candidates = match_all(rest);

        if candidates.is_empty() {
            cursor.advance_one_byte();
            continue;
        }

        let max_content_len = candidates
            .iter()
            .map(|(_, len)| *len)
            .max()
            .expect("non-empty candidate set has a maximum");
        let whitespace_len = trailing_whitespace_len(&rest[max_content_len..]);
        let end = start + max_content_len + whitespace_len;

        let extents = Span::with_file(start, end, file_id, start_line, start_column);
        let mut set = Vec::with_capacity(candidates.len());
        for (kind, len) in &candidates {
            let lexeme = Symbol::intern(&rest[..*len]);
            set.push(Token {
                kind: *kind,
                lexeme,
                extents,
            });
        }
        positions.insert(start, set);

        cursor.advance_to(end);
    }

    TokenStream { positions, file_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FileId {
        FileId::new(0)
    }

    #[test]
    fn single_keyword_is_ambiguous_with_identifier() {
        let stream = lex("let", file());
        let set = stream.candidates_at(0).unwrap();
        let kinds: Vec<_> = set.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Keyword));
        assert!(kinds.contains(&TokenKind::Identifier));
    }

    #[test]
    fn integer_excludes_identifier_candidate() {
        let stream = lex("42", file());
        let set = stream.candidates_at(0).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].kind, TokenKind::Integer);
    }

    #[test]
    fn decimal_excludes_identifier_candidate() {
        let stream = lex("3.14", file());
        let set = stream.candidates_at(0).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].kind, TokenKind::Decimal);
    }

    #[test]
    fn plain_identifier_has_single_candidate() {
        let stream = lex("counter", file());
        let set = stream.candidates_at(0).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn whitespace_attaches_to_preceding_token_extent() {
        let stream = lex("let   x", file());
        let set = stream.candidates_at(0).unwrap();
        assert_eq!(set[0].extents.end, 6);
        let next = stream.candidates_at(6).unwrap();
        assert_eq!(next[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn unrecognized_byte_advances_without_candidates() {
        let stream = lex("let @ x", file());
        assert!(stream.candidates_at(4).is_none());
        let resumed = stream.candidates_at(6).unwrap();
        assert_eq!(resumed[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn punctuation_tokens_are_unambiguous() {
        let stream = lex("(a, b)", file());
        let open = stream.candidates_at(0).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].kind, TokenKind::Parenthesis);
    }

    #[test]
    fn string_and_character_literals_lex_whole() {
        let stream = lex(r#""hi" 'c'"#, file());
        let first = stream.candidates_at(0).unwrap();
        assert_eq!(first[0].kind, TokenKind::String);
        let second = stream.candidates_at(5).unwrap();
        assert_eq!(second[0].kind, TokenKind::Character);
    }

    #[test]
    fn backtick_identifier_can_shadow_a_keyword() {
        let stream = lex("`let`", file());
        let set = stream.candidates_at(0).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].kind, TokenKind::Identifier);
        assert_eq!(set[0].lexeme.as_str(), "`let`");
    }
}
