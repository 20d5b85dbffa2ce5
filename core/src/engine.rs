use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Board built, images not ready yet.
    Loading,
    /// Board shown, nothing flipped yet.
    Ready,
    AwaitingFirstFlip,
    AwaitingSecondFlip,
    /// Two mismatched cards are face up, waiting for the flip-back.
    Resolving,
    Won,
}

impl EngineState {
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn accepts_flips(self) -> bool {
        matches!(
            self,
            Self::Ready | Self::AwaitingFirstFlip | Self::AwaitingSecondFlip
        )
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Loading
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    NoChange,
    Revealed,
    Matched,
    Won,
    Mismatched(ResolveTicket),
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Positions currently face up and not yet resolved, never more than two.
pub type FlippedSet = SmallVec<[Position; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayEngine {
    session: SessionId,
    cards: Vec<Card>,
    pairs: PairCount,
    flipped: FlippedSet,
    matched: BTreeSet<Symbol>,
    moves: Saturating<u32>,
    state: EngineState,
    pending: Option<ResolveTicket>,
}

impl PlayEngine {
    pub fn new(deck: &Deck, session: SessionId) -> Self {
        let cards = deck
            .symbols()
            .iter()
            .zip(0..)
            .map(|(&symbol, position)| Card::new(symbol, position))
            .collect();
        Self {
            session,
            cards,
            pairs: deck.pairs(),
            flipped: SmallVec::new(),
            matched: BTreeSet::new(),
            moves: Saturating(0),
            state: Default::default(),
            pending: None,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn pairs(&self) -> PairCount {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn moves(&self) -> u32 {
        self.moves.0
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn matched_symbols(&self) -> &BTreeSet<Symbol> {
        &self.matched
    }

    pub fn pending_flip_back(&self) -> Option<ResolveTicket> {
        self.pending
    }

    pub fn card_at(&self, position: Position) -> Option<Card> {
        self.cards.get(usize::from(position)).copied()
    }

    pub fn face_at(&self, position: Position) -> CardFace {
        match self.card_at(position) {
            Some(card) if card.matched => CardFace::Matched(card.symbol),
            Some(card) if self.flipped.contains(&position) => CardFace::Revealed(card.symbol),
            _ => CardFace::Hidden,
        }
    }

    pub fn mark_ready(&mut self) -> bool {
        if self.state.is_loading() {
            log::debug!("session {} ready with {} cards", self.session, self.cards.len());
            self.state = EngineState::Ready;
            true
        } else {
            false
        }
    }

    pub fn flip(&mut self, position: Position) -> Result<FlipOutcome> {
        let position = self.validate_position(position)?;

        if !self.state.accepts_flips() {
            log::trace!("flip {} ignored in state {:?}", position, self.state);
            return Ok(FlipOutcome::NoChange);
        }
        if self.cards[usize::from(position)].matched || self.flipped.contains(&position) {
            log::trace!("flip {} ignored, already face up", position);
            return Ok(FlipOutcome::NoChange);
        }

        self.flipped.push(position);

        let &[first, second] = self.flipped.as_slice() else {
            self.state = EngineState::AwaitingSecondFlip;
            return Ok(FlipOutcome::Revealed);
        };

        self.moves += 1;
        Ok(self.resolve(first, second))
    }

    /// Turns a mismatched pair back over, only when `ticket` is the one issued for it.
    pub fn flip_back(&mut self, ticket: ResolveTicket) -> bool {
        if self.state != EngineState::Resolving || self.pending != Some(ticket) {
            log::debug!("stale flip-back {:?} ignored", ticket);
            return false;
        }

        self.pending = None;
        self.flipped.clear();
        self.state = EngineState::AwaitingFirstFlip;
        true
    }

    fn resolve(&mut self, first: Position, second: Position) -> FlipOutcome {
        let symbol = self.cards[usize::from(first)].symbol;

        if symbol != self.cards[usize::from(second)].symbol {
            let ticket = ResolveTicket {
                session: self.session,
                guess: self.moves.0,
            };
            log::trace!("mismatch at {} and {}, {:?}", first, second, ticket);
            self.pending = Some(ticket);
            self.state = EngineState::Resolving;
            return FlipOutcome::Mismatched(ticket);
        }

        self.cards[usize::from(first)].matched = true;
        self.cards[usize::from(second)].matched = true;
        self.matched.insert(symbol);
        self.flipped.clear();

        if self.matched.len() == usize::from(self.pairs) {
            log::debug!("session {} won in {} moves", self.session, self.moves.0);
            self.state = EngineState::Won;
            FlipOutcome::Won
        } else {
            self.state = EngineState::AwaitingFirstFlip;
            FlipOutcome::Matched
        }
    }

    fn validate_position(&self, position: Position) -> Result<Position> {
        if usize::from(position) < self.cards.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }
}
