use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifier naming a card picture.
pub type Symbol = u16;

/// Index of a card on the board.
pub type Position = u8;

/// Number of pairs on a board.
pub type PairCount = u8;

/// Largest pair count whose board still fits in [`Position`].
pub const MAX_PAIRS: PairCount = (Position::MAX / 2) as PairCount;

pub const fn board_len(pairs: PairCount) -> usize {
    (pairs as usize) * 2
}

/// Identity of one game, bumped on every start or reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(u32);

impl SessionId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Names a pending mismatch flip-back, only honored by the session and guess that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolveTicket {
    pub session: SessionId,
    pub guess: u32,
}
