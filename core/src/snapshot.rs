use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read model handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub session: SessionId,
    pub state: EngineState,
    pub cards: Vec<CardFace>,
    pub moves: u32,
    pub matched_pairs: PairCount,
    pub pairs: PairCount,
    pub won: bool,
}

impl BoardSnapshot {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let cards = (0..engine.len())
            .filter_map(|index| Position::try_from(index).ok())
            .map(|position| engine.face_at(position))
            .collect();

        Self {
            session: engine.session(),
            state: engine.state(),
            cards,
            moves: engine.moves(),
            matched_pairs: engine
                .matched_symbols()
                .len()
                .try_into()
                .unwrap_or(engine.pairs()),
            pairs: engine.pairs(),
            won: engine.is_finished(),
        }
    }

    /// Placeholder shown while no board exists yet.
    pub fn loading(session: SessionId, pairs: PairCount) -> Self {
        Self {
            session,
            state: EngineState::Loading,
            cards: alloc::vec![CardFace::Hidden; board_len(pairs)],
            moves: 0,
            matched_pairs: 0,
            pairs,
            won: false,
        }
    }

    pub fn face_up_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|face| matches!(face, CardFace::Revealed(_)))
            .count()
    }
}
