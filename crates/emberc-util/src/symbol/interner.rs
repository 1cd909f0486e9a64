//! String interner backed by `DashMap` for lock-free concurrent access.
//!
//! Strings are hashed with `ahash` and the table stores `(leaked &'static
//! str, index)` pairs keyed by hash. Interned strings are intentionally
//! leaked: the table lives for the whole process, so reclaiming memory
//! would only add bookkeeping for no benefit (§5 — each stage hands off an
//! immutable tree and nothing outlives the process).

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::{Symbol, KNOWN_SYMBOLS};

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

pub struct StringTable {
    by_hash: DashMap<u64, (&'static str, u32)>,
    by_index: DashMap<u32, &'static str>,
    next_index: AtomicU32,
}

fn hash_str(text: &str) -> u64 {
    let mut hasher = AHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

impl StringTable {
    fn new() -> Self {
        Self {
            by_hash: DashMap::new(),
            by_index: DashMap::new(),
            next_index: AtomicU32::new(0),
        }
    }

    fn initialize_known_symbols(&self) {
        for &(index, text) in KNOWN_SYMBOLS {
            let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
            self.by_hash.insert(hash_str(text), (leaked, index));
            self.by_index.insert(index, leaked);
            self.next_index.fetch_max(index + 1, Ordering::Relaxed);
        }
    }

    pub fn intern(&self, text: &str) -> Symbol {
        let hash = hash_str(text);
        if let Some(entry) = self.by_hash.get(&hash) {
            if entry.0 == text {
                return Symbol { index: entry.1 };
            }
        }
        let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.by_hash.insert(hash, (leaked, index));
        self.by_index.insert(index, leaked);
        Symbol { index }
    }

    pub fn resolve(&self, symbol: Symbol) -> &'static str {
        self.by_index
            .get(&symbol.index)
            .map(|entry| *entry.value())
            .expect("symbol index missing from interner")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_are_stable_at_startup() {
        let table = StringTable::new();
        table.initialize_known_symbols();
        assert_eq!(table.resolve(Symbol { index: 0 }), "let");
    }

    #[test]
    fn interning_is_idempotent() {
        let table = StringTable::new();
        let a = table.intern("banana");
        let b = table.intern("banana");
        assert_eq!(a, b);
    }
}
