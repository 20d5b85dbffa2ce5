use super::*;

/// Draws distinct symbols from a universe and lays out each one twice in uniformly shuffled order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckBuilder {
    seed: u64,
    universe: SymbolUniverse,
}

impl RandomDeckBuilder {
    pub fn new(seed: u64, universe: SymbolUniverse) -> Self {
        Self { seed, universe }
    }
}

impl DeckBuilder for RandomDeckBuilder {
    fn build(self, pairs: PairCount) -> Result<Deck> {
        use rand::prelude::*;

        let available = self.universe.len();
        if pairs == 0 || pairs > MAX_PAIRS {
            return Err(GameError::InvalidDeck);
        }
        if usize::from(pairs) > available {
            log::warn!(
                "Symbol universe too small, requested {} pairs but only {} symbols",
                pairs,
                available
            );
            return Err(GameError::InsufficientIdentifierSpace {
                requested: pairs,
                available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);

        // sample without replacement: a uniform shuffle of the pool, keep the head
        let mut drawn = self.universe.symbols;
        drawn.shuffle(&mut rng);
        drawn.truncate(pairs.into());

        let mut symbols = Vec::with_capacity(board_len(pairs));
        symbols.extend_from_slice(&drawn);
        symbols.extend_from_slice(&drawn);
        symbols.shuffle(&mut rng);

        log::debug!("Built deck of {} pairs from seed {}: {:?}", pairs, self.seed, symbols);
        Ok(Deck { symbols })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(seed: u64, pairs: PairCount) -> Deck {
        RandomDeckBuilder::new(seed, SymbolUniverse::default())
            .build(pairs)
            .unwrap()
    }

    #[test]
    fn every_symbol_appears_exactly_twice() {
        for seed in 0..32 {
            let deck = build(seed, 8);
            assert_eq!(deck.len(), 16);
            assert_eq!(deck.distinct_symbols().len(), 8);
            assert_eq!(Deck::from_symbols(deck.symbols()), Ok(deck.clone()));
        }
    }

    #[test]
    fn same_seed_same_deck() {
        assert_eq!(build(42, 8), build(42, 8));
    }

    #[test]
    fn seeds_vary_the_layout() {
        let first = build(0, 8);
        assert!((1..16).any(|seed| build(seed, 8) != first));
    }

    #[test]
    fn whole_universe_can_be_drawn() {
        let universe = SymbolUniverse::range(10, 4);
        let deck = RandomDeckBuilder::new(7, universe).build(4).unwrap();
        let mut distinct = deck.distinct_symbols();
        distinct.sort_unstable();
        assert_eq!(distinct, [10, 11, 12, 13]);
    }

    #[test]
    fn small_universe_is_rejected() {
        let universe = SymbolUniverse::range(0, 3);
        assert_eq!(
            RandomDeckBuilder::new(0, universe).build(4),
            Err(GameError::InsufficientIdentifierSpace {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn pair_count_bounds_are_checked() {
        let universe = SymbolUniverse::range(0, 1000);
        assert_eq!(
            RandomDeckBuilder::new(0, universe.clone()).build(0),
            Err(GameError::InvalidDeck)
        );
        assert_eq!(
            RandomDeckBuilder::new(0, universe).build(MAX_PAIRS + 1),
            Err(GameError::InvalidDeck)
        );
    }
}
