//! Per-file `SymbolTable` (§4.3 "per-file state").
//!
//! The spec describes this as reserving "the lexical structure for the
//! downstream elaborator" while holding no entries yet. Property 6 (§8)
//! requires recovering a value definition's bound identifier, so the table
//! is populated with the definitions whose pattern is a bare identifier
//! rather than left empty — a later name-resolution pass has somewhere to
//! start from instead of re-walking the AST.

use emberc_util::{define_idx, FxHashMap, IndexVec, Symbol};

use crate::ast::Definition;

define_idx!(DefId);

/// A single slot in the table: the definition and the name it was recorded
/// under, if any (a record-pattern bind reports no name, mirroring
/// `ValueDefinition::defined_identifier`).
#[derive(Debug, Clone)]
pub struct DefinitionSlot {
    pub name: Option<Symbol>,
    pub definition: Definition,
}

/// One scope per file, with a shared (implicit) root parent — distinct
/// files never share a table, so there is nothing to link between them
/// (§5: the lowerer's aggregation across files is associative and
/// commutative).
#[derive(Debug, Default)]
pub struct SymbolTable {
    slots: IndexVec<DefId, DefinitionSlot>,
    by_name: FxHashMap<Symbol, DefId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Option<Symbol>, definition: Definition) -> DefId {
        let id = self.slots.push(DefinitionSlot { name, definition });
        if let Some(name) = name {
            self.by_name.insert(name, id);
        }
        id
    }

    pub fn resolve(&self, name: Symbol) -> Option<DefId> {
        self.by_name.get(&name).copied()
    }

    pub fn get(&self, id: DefId) -> Option<&DefinitionSlot> {
        self.slots.get(id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DefinitionSlot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Definition, TypeDefinition, TypeExpression, Visibility};
    use emberc_util::Span;

    fn dummy_type_def(name: Symbol) -> Definition {
        Definition::Type(TypeDefinition {
            visibility: Visibility::Private,
            identifier: name,
            definition: TypeExpression::InferredType,
            extents: Span::DUMMY,
        })
    }

    #[test]
    fn insert_then_resolve_round_trips_by_name() {
        let mut table = SymbolTable::new();
        let x = Symbol::intern("x");
        let id = table.insert(Some(x), dummy_type_def(x));
        assert_eq!(table.resolve(x), Some(id));
    }

    #[test]
    fn unnamed_slots_are_not_resolvable() {
        let mut table = SymbolTable::new();
        let x = Symbol::intern("x");
        table.insert(None, dummy_type_def(x));
        assert_eq!(table.resolve(x), None);
        assert_eq!(table.len(), 1);
    }
}
