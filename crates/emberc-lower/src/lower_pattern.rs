//! Pattern lowering (§4.3 "Pattern lowering").

use emberc_lex::TokenKind;
use emberc_parse::{Construct, ParseTree};

use crate::ast::{Pattern, RecordKey, RecordPattern};
use crate::{is_literal_kind, LowerError, LowerResult, Lowerer};

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_pattern(&self, tree: &ParseTree) -> LowerResult<Pattern> {
        match tree {
            ParseTree::Branch { construct: Construct::TypeTag, children, .. } => {
                if children.len() != 2 {
                    return Err(self.arity_mismatch("TypeTag", 2, children.len(), tree.extents()));
                }
                let base = self.lower_pattern(&children[0])?;
                let type_expr = self.lower_type_expression(&children[1])?;
                Ok(attach_type_tag(base, type_expr))
            }
            ParseTree::Branch { construct: Construct::RecordPattern, children, .. } => {
                let items = children
                    .iter()
                    .map(|child| self.lower_record_pattern_item(child))
                    .collect::<Result<Vec<_>, LowerError>>()?;
                Ok(Pattern::Record(RecordPattern { items, type_tag: None }))
            }
            ParseTree::Branch { construct, extents, .. } => {
                Err(self.mismatch("a pattern", &format!("{construct:?}"), *extents))
            }
            ParseTree::Leaf(token) if token.kind == TokenKind::Identifier => {
                Ok(Pattern::Id { identifier: token.lexeme, type_tag: None })
            }
            ParseTree::Leaf(token) if is_literal_kind(token.kind) => Ok(Pattern::PatternLiteral {
                literal: self.lower_literal_token(token)?,
                type_tag: None,
            }),
            ParseTree::Leaf(token) => Err(self.mismatch(
                "a pattern",
                &format!("{:?} `{}`", token.kind, token.lexeme.as_str()),
                token.extents,
            )),
        }
    }

    pub(crate) fn lower_record_pattern_item(&self, tree: &ParseTree) -> LowerResult<(RecordKey, Pattern)> {
        match tree.construct() {
            Some(Construct::RecordPatternItem) => {
                let (_, children) = tree.as_branch().expect("just matched a branch construct");
                if children.len() != 2 {
                    return Err(self.arity_mismatch("RecordPatternItem", 2, children.len(), tree.extents()));
                }
                let key = self.lower_record_key(&children[0])?;
                let pattern = self.lower_pattern(&children[1])?;
                Ok((key, pattern))
            }
            _ => {
                let pattern = self.lower_pattern(tree)?;
                Ok((RecordKey::EmptyRecordKey, pattern))
            }
        }
    }
}

/// Thread a `TypeTag`'s type expression onto whichever pattern variant it
/// wraps (§4.3: "sets the pattern's `type_tag` field from the second
/// child").
fn attach_type_tag(pattern: Pattern, type_expr: crate::ast::TypeExpression) -> Pattern {
    let boxed = Some(Box::new(type_expr));
    match pattern {
        Pattern::Id { identifier, .. } => Pattern::Id { identifier, type_tag: boxed },
        Pattern::PatternLiteral { literal, .. } => Pattern::PatternLiteral { literal, type_tag: boxed },
        Pattern::Record(RecordPattern { items, .. }) => {
            Pattern::Record(RecordPattern { items, type_tag: boxed })
        }
    }
}
