use alloc::string::String;
use thiserror::Error;

use crate::{PairCount, Symbol};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Not enough distinct symbols, requested {requested} but only {available} available")]
    InsufficientIdentifierSpace { requested: PairCount, available: usize },
    #[error("Could not preload image for symbol {symbol}: {reason}")]
    ImagePreloadFailure { symbol: Symbol, reason: String },
    #[error("Invalid card position")]
    InvalidPosition,
    #[error("Deck must hold between one pair and the maximum board size")]
    InvalidDeck,
    #[error("Symbol {0} does not appear exactly twice in the deck")]
    UnpairedSymbol(Symbol),
}

pub type Result<T> = core::result::Result<T, GameError>;
