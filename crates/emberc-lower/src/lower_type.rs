//! Type-expression lowering (§4.3 "Type-expression lowering").

use emberc_lex::TokenKind;
use emberc_parse::{Construct, ParseTree};

use crate::ast::{RecordKey, TypeExpression};
use crate::{LowerError, LowerResult, Lowerer};

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_type_expression(&self, tree: &ParseTree) -> LowerResult<TypeExpression> {
        match tree {
            ParseTree::Leaf(token) if token.kind == TokenKind::Keyword && token.lexeme.as_str() == "let" => {
                Ok(TypeExpression::InferredType)
            }
            ParseTree::Leaf(token) if token.kind == TokenKind::Identifier => {
                Ok(TypeExpression::TypeId(token.lexeme))
            }
            ParseTree::Leaf(token) => Err(self.mismatch(
                "a type expression",
                &format!("{:?} `{}`", token.kind, token.lexeme.as_str()),
                token.extents,
            )),
            ParseTree::Branch { construct, children, extents } => match construct {
                Construct::PointerType => {
                    let pointee = match children.first() {
                        Some(child) => self.lower_type_expression(child)?,
                        None => TypeExpression::InferredType,
                    };
                    Ok(TypeExpression::PointerType(Box::new(pointee)))
                }
                Construct::TypeRecord => {
                    let items = children
                        .iter()
                        .map(|child| self.lower_type_record_item(child))
                        .collect::<Result<Vec<_>, LowerError>>()?;
                    Ok(TypeExpression::RecordType(items))
                }
                other => Err(self.mismatch("a type expression", &format!("{other:?}"), *extents)),
            },
        }
    }

    fn lower_type_record_item(&self, tree: &ParseTree) -> LowerResult<(RecordKey, TypeExpression)> {
        match tree.construct() {
            Some(Construct::TypeRecordItem) => {
                let (_, children) = tree.as_branch().expect("just matched a branch construct");
                if children.len() != 2 {
                    return Err(self.arity_mismatch("TypeRecordItem", 2, children.len(), tree.extents()));
                }
                let key = self.lower_record_key(&children[0])?;
                let type_expr = self.lower_type_expression(&children[1])?;
                Ok((key, type_expr))
            }
            _ => {
                let type_expr = self.lower_type_expression(tree)?;
                Ok((RecordKey::EmptyRecordKey, type_expr))
            }
        }
    }
}
