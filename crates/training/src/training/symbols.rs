//! Interning of training symbols.
//!
//! Training works on integer symbol ids so that pair counting and merging
//! never touch strings. The table is local to one training run and its ids
//! are unrelated to final vocabulary ids.

use ahash::AHashMap;
use compact_str::CompactString;
use subword_core::{MergeRule, Pair};

/// Bidirectional symbol <-> id table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ids: AHashMap<CompactString, u32>,
    symbols: Vec<CompactString>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID of `symbol`, interning it if new.
    pub fn intern(&mut self, symbol: &str) -> u32 {
        if let Some(&id) = self.ids.get(symbol) {
            return id;
        }

        let id = self.symbols.len() as u32;
        let symbol = CompactString::new(symbol);
        self.ids.insert(symbol.clone(), id);
        self.symbols.push(symbol);
        id
    }

    /// ID of `symbol` if it has been interned.
    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.ids.get(symbol).copied()
    }

    /// Symbol string for an interned `id`.
    ///
    /// # Panics
    /// If `id` was not produced by this table.
    pub fn symbol(&self, id: u32) -> &str {
        &self.symbols[id as usize]
    }

    /// The merge rule for a pair of interned ids.
    pub fn rule(&self, pair: Pair) -> MergeRule {
        MergeRule::new(self.symbol(pair.0), self.symbol(pair.1))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
