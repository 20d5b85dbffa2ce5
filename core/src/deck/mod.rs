use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait DeckBuilder {
    fn build(self, pairs: PairCount) -> Result<Deck>;
}

/// Pool of distinct symbols a deck may draw from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolUniverse {
    symbols: Vec<Symbol>,
}

impl SymbolUniverse {
    /// `len` consecutive symbols starting at `start`, cut short at `Symbol::MAX`.
    pub fn range(start: Symbol, len: u16) -> Self {
        let end = start.saturating_add(len);
        Self {
            symbols: (start..end).collect(),
        }
    }

    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut symbols: Vec<Symbol> = symbols.into_iter().collect();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Default for SymbolUniverse {
    fn default() -> Self {
        Self::range(0, 64)
    }
}

/// Shuffled board order where every symbol appears exactly twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    symbols: Vec<Symbol>,
}

impl Deck {
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
        if symbols.is_empty() || symbols.len() > board_len(MAX_PAIRS) {
            return Err(GameError::InvalidDeck);
        }

        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_default() += 1;
        }
        if let Some((&symbol, _)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(GameError::UnpairedSymbol(symbol));
        }

        Ok(Self {
            symbols: symbols.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn pairs(&self) -> PairCount {
        (self.symbols.len() / 2).try_into().unwrap_or(MAX_PAIRS)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Each symbol once, in order of first appearance.
    pub fn distinct_symbols(&self) -> Vec<Symbol> {
        let mut seen = alloc::collections::BTreeSet::new();
        self.symbols
            .iter()
            .copied()
            .filter(|&symbol| seen.insert(symbol))
            .collect()
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if usize::from(position) < self.symbols.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }
}

impl Index<Position> for Deck {
    type Output = Symbol;

    fn index(&self, position: Position) -> &Self::Output {
        &self.symbols[usize::from(position)]
    }
}
