use emberc_lex::{lex, TokenKind};
use emberc_util::FileId;
use proptest::prelude::*;

fn file() -> FileId {
    FileId::new(0)
}

#[test]
fn scenario_one_bare_block_definition() {
    // `let varname{}` — table row 1 of the scenario list.
    let stream = lex("let varname{}", file());
    let first = stream.candidates_at(0).unwrap();
    assert!(first.iter().any(|t| t.kind == TokenKind::Keyword));
    assert!(first.iter().any(|t| t.kind == TokenKind::Identifier));

    let second = stream.candidates_at(4).unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].kind, TokenKind::Identifier);
    assert_eq!(second[0].lexeme.as_str(), "varname");
}

#[test]
fn scenario_two_typed_value_definition() {
    let stream = lex("int varname = 5;", file());
    let head = stream.candidates_at(0).unwrap();
    assert_eq!(head.len(), 1);
    assert_eq!(head[0].kind, TokenKind::Identifier);

    let eq = stream.candidates_at(12).unwrap();
    assert_eq!(eq[0].kind, TokenKind::EqualSign);

    let integer = stream.candidates_at(14).unwrap();
    assert_eq!(integer.len(), 1);
    assert_eq!(integer[0].kind, TokenKind::Integer);
}

#[test]
fn scenario_three_procedure_definition_with_unreachable() {
    let stream = lex("let varname() { unreachable; }", file());
    let unreachable_pos = stream
        .iter()
        .find(|(_, set)| set.iter().any(|t| t.lexeme.as_str() == "unreachable"))
        .map(|(pos, _)| pos)
        .expect("unreachable token present");
    let set = stream.candidates_at(unreachable_pos).unwrap();
    assert!(set.iter().any(|t| t.kind == TokenKind::Keyword));
}

#[test]
fn scenario_four_type_definition() {
    let stream = lex("type typename = int;", file());
    let head = stream.candidates_at(0).unwrap();
    assert!(head.iter().any(|t| t.kind == TokenKind::Keyword));
}

#[test]
fn scenario_five_let_is_keyword_and_identifier_at_once() {
    let stream = lex("let", file());
    let set = stream.candidates_at(0).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.iter().any(|t| t.kind == TokenKind::Keyword));
    assert!(set.iter().any(|t| t.kind == TokenKind::Identifier));
}

proptest! {
    /// Property 1 (§8): the lexer never panics on arbitrary input, and every
    /// surviving candidate's extents lie within the source bounds.
    #[test]
    fn lexer_never_panics_and_extents_stay_in_bounds(source in ".{0,200}") {
        let stream = lex(&source, file());
        for (_, set) in stream.iter() {
            for token in set {
                prop_assert!(token.extents.start <= token.extents.end);
                prop_assert!(token.extents.end <= source.len());
            }
        }
    }

    /// Property 2 (§8): whenever a literal candidate is present at a
    /// position, no Identifier candidate shares that position.
    #[test]
    fn literal_candidates_exclude_identifier(source in "[a-zA-Z0-9_.'\" ;:=(){}-]{0,120}") {
        let stream = lex(&source, file());
        for (_, set) in stream.iter() {
            let has_literal = set.iter().any(|t| {
                matches!(
                    t.kind,
                    TokenKind::Integer
                        | TokenKind::Decimal
                        | TokenKind::Character
                        | TokenKind::String
                        | TokenKind::Boolean
                        | TokenKind::Poison
                )
            });
            let has_identifier = set.iter().any(|t| t.kind == TokenKind::Identifier);
            prop_assert!(!(has_literal && has_identifier));
        }
    }
}
