//! Expression lowering (§4.3 "Expression lowering") and block-lifting
//! (§4.3 "Block lifting", invariant 4).

use emberc_lex::TokenKind;
use emberc_parse::{Construct, ParseTree};

use crate::ast::{Block, Expression, RecordKey, Statement};
use crate::{is_literal_kind, LowerError, LowerResult, Lowerer};

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_expression(&self, tree: &ParseTree) -> LowerResult<Expression> {
        match tree {
            ParseTree::Branch { construct, children, extents } => match construct {
                // An expression-level type tag has nowhere to go in the AST's
                // `Expression` sum type (§3 lists no tagged variant for it,
                // unlike `Pattern`) — the ascription is dropped here and is
                // the elaborator's concern if it matters (documented in
                // DESIGN.md).
                Construct::TypeTag => {
                    if children.is_empty() {
                        return Err(self.mismatch("a tagged expression", "an empty TypeTag", *extents));
                    }
                    self.lower_expression(&children[0])
                }
                Construct::RecordExpression => {
                    let items = children
                        .iter()
                        .map(|child| self.lower_record_expression_item(child))
                        .collect::<Result<Vec<_>, LowerError>>()?;
                    Ok(Expression::RecordExpression(items))
                }
                Construct::ProcedureCall => {
                    if children.len() != 2 {
                        return Err(self.arity_mismatch("ProcedureCall", 2, children.len(), *extents));
                    }
                    let callee = children[0]
                        .as_leaf()
                        .filter(|token| token.kind == TokenKind::Identifier)
                        .map(|token| token.lexeme)
                        .ok_or_else(|| self.mismatch("an identifier leaf", "something else", children[0].extents()))?;
                    let argument = self.lower_expression(&children[1])?;
                    Ok(Expression::ProcedureCall { callee, argument: Box::new(argument) })
                }
                Construct::Conditional => {
                    if children.len() != 3 {
                        return Err(self.arity_mismatch("Conditional", 3, children.len(), *extents));
                    }
                    let condition = self.lower_expression(&children[0])?;
                    let consequent = self.lower_block_like(&children[1])?;
                    let alternative = self.lower_block_like(&children[2])?;
                    Ok(Expression::Conditional {
                        condition: Box::new(condition),
                        consequent,
                        alternative,
                    })
                }
                Construct::Map => {
                    if children.len() != 3 {
                        return Err(self.arity_mismatch("Map", 3, children.len(), *extents));
                    }
                    let binding = self.lower_pattern(&children[0])?;
                    let collection = self.lower_expression(&children[1])?;
                    let transformation = self.lower_block_like(&children[2])?;
                    Ok(Expression::Map {
                        binding,
                        collection: Box::new(collection),
                        transformation,
                    })
                }
                Construct::QualifiedIdentifier => {
                    let mut keys = Vec::new();
                    self.flatten_qualified_identifier(tree, &mut keys)?;
                    Ok(Expression::QualifiedIdentifier(keys))
                }
                other => Err(self.mismatch("an expression", &format!("{other:?}"), *extents)),
            },
            ParseTree::Leaf(token) if token.kind == TokenKind::Identifier => {
                Ok(Expression::Access(token.lexeme))
            }
            ParseTree::Leaf(token) if is_literal_kind(token.kind) => {
                Ok(Expression::Literal(self.lower_literal_token(token)?))
            }
            ParseTree::Leaf(token) => Err(self.mismatch(
                "an expression",
                &format!("{:?} `{}`", token.kind, token.lexeme.as_str()),
                token.extents,
            )),
        }
    }

    fn lower_record_expression_item(&self, tree: &ParseTree) -> LowerResult<(RecordKey, Expression)> {
        match tree.construct() {
            Some(Construct::RecordExpressionItem) => {
                let (_, children) = tree.as_branch().expect("just matched a branch construct");
                if children.len() != 2 {
                    return Err(self.arity_mismatch("RecordExpressionItem", 2, children.len(), tree.extents()));
                }
                let key = self.lower_record_key(&children[0])?;
                let value = self.lower_expression(&children[1])?;
                Ok((key, value))
            }
            _ => {
                let value = self.lower_expression(tree)?;
                Ok((RecordKey::EmptyRecordKey, value))
            }
        }
    }

    /// Flatten a left-leaning `QualifiedIdentifier` chain into ordered keys.
    fn flatten_qualified_identifier(&self, tree: &ParseTree, out: &mut Vec<RecordKey>) -> LowerResult<()> {
        if let Some((Construct::QualifiedIdentifier, children)) = tree.as_branch() {
            if children.len() != 2 {
                return Err(self.arity_mismatch("QualifiedIdentifier", 2, children.len(), tree.extents()));
            }
            self.flatten_qualified_identifier(&children[0], out)?;
            out.push(self.lower_record_key(&children[1])?);
            Ok(())
        } else {
            out.push(self.lower_record_key(tree)?);
            Ok(())
        }
    }

    /// Lower a body position to a `Block`: item-by-item if it already is
    /// one, otherwise lift the bare expression into a single
    /// `ReturnStatement` (§4.3 "Block lifting", invariant 4). Used for
    /// procedure bodies, map transformations, and conditional branches —
    /// every position the grammar describes as "a block or an expression".
    pub(crate) fn lower_block_like(&self, tree: &ParseTree) -> LowerResult<Block> {
        if tree.construct() == Some(Construct::Block) {
            self.lower_block(tree)
        } else {
            let extents = tree.extents();
            let expression = self.lower_expression(tree)?;
            Ok(Block {
                statements: vec![Statement::ReturnStatement(expression)],
                extents,
            })
        }
    }

    fn lower_block(&self, tree: &ParseTree) -> LowerResult<Block> {
        let (_, children) = tree
            .as_branch()
            .ok_or_else(|| self.mismatch("a Block", "a leaf", tree.extents()))?;
        let extents = tree.extents();
        let statements = children
            .iter()
            .map(|child| self.lower_statement(child))
            .collect::<Result<Vec<_>, LowerError>>()?;
        Ok(Block { statements, extents })
    }

    fn lower_statement(&self, tree: &ParseTree) -> LowerResult<Statement> {
        match tree.construct() {
            Some(Construct::ReturnStatement) => {
                let (_, children) = tree.as_branch().expect("just matched a branch construct");
                if children.len() != 1 {
                    return Err(self.arity_mismatch("ReturnStatement", 1, children.len(), tree.extents()));
                }
                Ok(Statement::ReturnStatement(self.lower_expression(&children[0])?))
            }
            Some(Construct::ValueDefinition) => {
                Ok(Statement::BindingStatement(self.lower_value_definition(tree)?))
            }
            _ => {
                if let Some(token) = tree.as_leaf() {
                    if token.kind == TokenKind::Keyword && token.lexeme.as_str() == "unreachable" {
                        return Ok(Statement::UnreachableStatement);
                    }
                }
                Ok(Statement::ExpressionStatement(self.lower_expression(tree)?))
            }
        }
    }
}
