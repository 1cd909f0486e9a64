//! Concrete parse tree (§3).
//!
//! A node is either a leaf wrapping a single lexer `Token` or a branch
//! carrying a `Construct` tag, its children, and extents derived from them
//! (invariant 1). Trees are immutable once built.

use emberc_lex::Token;
use emberc_util::Span;

/// The closed set of non-leaf node tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    File,
    ValueDefinition,
    ProcedureDefinition,
    TypeDefinition,
    Modifiers,
    Pattern,
    RecordPattern,
    RecordPatternItem,
    TypeTag,
    QualifiedIdentifier,
    ProcedureCall,
    RecordExpression,
    RecordExpressionItem,
    Conditional,
    Map,
    TypeRecord,
    TypeRecordItem,
    PointerType,
    Block,
    ReturnStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseTree {
    Leaf(Token),
    Branch {
        construct: Construct,
        children: Vec<ParseTree>,
        extents: Span,
    },
}

impl ParseTree {
    pub fn leaf(token: Token) -> ParseTree {
        ParseTree::Leaf(token)
    }

    /// Build a branch. When `children` is non-empty its extents are the
    /// union of every child's extents (invariant 1); when empty, `empty_extents`
    /// is used verbatim — callers anchor it per the construct (a zero-width
    /// point for synthetic `Modifiers`, or the span of the delimiters that
    /// were actually consumed for an empty `RecordPattern`/`Block`).
    pub fn branch(construct: Construct, children: Vec<ParseTree>, empty_extents: Span) -> ParseTree {
        let extents = if children.is_empty() {
            empty_extents
        } else {
            Span::merge_all(children.iter().map(ParseTree::extents))
        };
        ParseTree::Branch {
            construct,
            children,
            extents,
        }
    }

    pub fn extents(&self) -> Span {
        match self {
            ParseTree::Leaf(token) => token.extents,
            ParseTree::Branch { extents, .. } => *extents,
        }
    }

    pub fn as_leaf(&self) -> Option<&Token> {
        match self {
            ParseTree::Leaf(token) => Some(token),
            ParseTree::Branch { .. } => None,
        }
    }

    pub fn as_branch(&self) -> Option<(Construct, &[ParseTree])> {
        match self {
            ParseTree::Branch {
                construct,
                children,
                ..
            } => Some((*construct, children.as_slice())),
            ParseTree::Leaf(_) => None,
        }
    }

    pub fn construct(&self) -> Option<Construct> {
        self.as_branch().map(|(construct, _)| construct)
    }

    /// Override this node's extents, used where the grammar widens a
    /// sub-tree's span past its own children (e.g. a body's `=`…`;`
    /// delimiters, §4.2 "Bodies").
    pub fn with_extents(self, extents: Span) -> ParseTree {
        match self {
            ParseTree::Leaf(token) => ParseTree::Leaf(emberc_lex::Token { extents, ..token }),
            ParseTree::Branch {
                construct,
                children,
                ..
            } => ParseTree::Branch {
                construct,
                children,
                extents,
            },
        }
    }
}
