use serde::{Deserialize, Serialize};

use crate::{Position, Symbol};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub position: Position,
    pub matched: bool,
}

impl Card {
    pub const fn new(symbol: Symbol, position: Position) -> Self {
        Self {
            symbol,
            position,
            matched: false,
        }
    }
}

/// Player-visible face of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Revealed(Symbol),
    Matched(Symbol),
}

impl CardFace {
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Self::Hidden => None,
            Self::Revealed(symbol) | Self::Matched(symbol) => Some(symbol),
        }
    }

    pub const fn is_face_up(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}
