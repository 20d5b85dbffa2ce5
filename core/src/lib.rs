#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use preload::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod card;
mod deck;
mod engine;
mod error;
mod preload;
mod session;
mod snapshot;
mod types;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pairs: PairCount,
    pub universe: SymbolUniverse,
    /// How long a mismatched pair stays visible, zero turns it back at once.
    pub mismatch_delay: Duration,
}

impl GameConfig {
    pub const DEFAULT_PAIRS: PairCount = 8;
    pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

    pub const fn new_unchecked(
        pairs: PairCount,
        universe: SymbolUniverse,
        mismatch_delay: Duration,
    ) -> Self {
        Self {
            pairs,
            universe,
            mismatch_delay,
        }
    }

    pub fn new(pairs: PairCount, universe: SymbolUniverse, mismatch_delay: Duration) -> Self {
        let pairs = pairs.clamp(1, MAX_PAIRS);
        Self::new_unchecked(pairs, universe, mismatch_delay)
    }

    pub const fn total_cards(&self) -> usize {
        board_len(self.pairs)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PAIRS,
            SymbolUniverse::default(),
            Self::DEFAULT_MISMATCH_DELAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sixteen_cards() {
        let config = GameConfig::default();
        assert_eq!(config.total_cards(), 16);
        assert_eq!(config.mismatch_delay, Duration::from_secs(1));
    }

    #[test]
    fn pair_count_is_clamped() {
        let universe = SymbolUniverse::default();
        assert_eq!(GameConfig::new(0, universe.clone(), Duration::ZERO).pairs, 1);
        assert_eq!(GameConfig::new(200, universe, Duration::ZERO).pairs, MAX_PAIRS);
    }
}
