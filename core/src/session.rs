use core::time::Duration;

use crate::*;

/// Owns the current board and the session identity that fences off stale completions.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    session: SessionId,
    engine: Option<PlayEngine>,
    error: Option<GameError>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            session: SessionId::default(),
            engine: None,
            error: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    /// Error that aborted the latest start, cleared by the next start.
    pub fn error(&self) -> Option<&GameError> {
        self.error.as_ref()
    }

    pub fn state(&self) -> EngineState {
        self.engine
            .as_ref()
            .map_or(EngineState::Loading, PlayEngine::state)
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.config.mismatch_delay
    }

    /// Throws away the current board and deals a new one from `seed`.
    pub fn start(&mut self, seed: u64) -> Result<PreloadRequest> {
        self.begin_session();

        let builder = RandomDeckBuilder::new(seed, self.config.universe.clone());
        match builder.build(self.config.pairs) {
            Ok(deck) => Ok(self.install(&deck)),
            Err(err) => {
                log::error!("session {} could not deal a deck: {}", self.session, err);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn start_with_deck(&mut self, deck: &Deck) -> PreloadRequest {
        self.begin_session();
        self.install(deck)
    }

    /// Applies the outcome of a preload, returns `Ok(false)` when it belongs to an older session.
    pub fn finish_preload(&mut self, session: SessionId, result: Result<()>) -> Result<bool> {
        if session != self.session {
            log::debug!(
                "ignoring preload of session {} during session {}",
                session,
                self.session
            );
            return Ok(false);
        }
        let Some(engine) = self.engine.as_mut() else {
            return Ok(false);
        };

        match result {
            Ok(()) => Ok(engine.mark_ready()),
            Err(err) => {
                log::error!("session {} failed to load: {}", session, err);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Flips a card. A mismatch is turned back immediately when no delay is configured,
    /// otherwise the caller owes a [`Game::flip_back`] once the delay elapsed.
    pub fn flip(&mut self, position: Position) -> Result<FlipOutcome> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(FlipOutcome::NoChange);
        };

        let outcome = engine.flip(position)?;
        if let FlipOutcome::Mismatched(ticket) = outcome {
            if self.config.mismatch_delay.is_zero() {
                engine.flip_back(ticket);
            }
        }
        Ok(outcome)
    }

    pub fn flip_back(&mut self, ticket: ResolveTicket) -> bool {
        if ticket.session != self.session {
            log::debug!("ignoring flip-back from session {}", ticket.session);
            return false;
        }
        self.engine
            .as_mut()
            .is_some_and(|engine| engine.flip_back(ticket))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.engine.as_ref().map_or_else(
            || BoardSnapshot::loading(self.session, self.config.pairs),
            BoardSnapshot::from_engine,
        )
    }

    fn begin_session(&mut self) {
        self.session = self.session.next();
        self.engine = None;
        self.error = None;
        log::debug!("starting session {}", self.session);
    }

    fn install(&mut self, deck: &Deck) -> PreloadRequest {
        self.engine = Some(PlayEngine::new(deck, self.session));
        PreloadRequest {
            session: self.session,
            symbols: deck.distinct_symbols(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const A: Symbol = 1;
    const B: Symbol = 2;

    fn instant() -> GameConfig {
        GameConfig {
            mismatch_delay: Duration::ZERO,
            ..GameConfig::default()
        }
    }

    fn ready_game(config: GameConfig, symbols: &[Symbol]) -> Game {
        let mut game = Game::new(config);
        let request = game.start_with_deck(&Deck::from_symbols(symbols).unwrap());
        assert_eq!(game.finish_preload(request.session, Ok(())), Ok(true));
        game
    }

    #[test]
    fn starts_loading_until_preloaded() {
        let mut game = Game::new(GameConfig::default());
        assert_eq!(game.state(), EngineState::Loading);

        let request = game.start(9).unwrap();
        assert_eq!(request.symbols.len(), 8);
        assert_eq!(game.state(), EngineState::Loading);
        assert_eq!(game.flip(0), Ok(FlipOutcome::NoChange));

        assert_eq!(game.finish_preload(request.session, Ok(())), Ok(true));
        assert_eq!(game.state(), EngineState::Ready);
        assert_eq!(game.snapshot().cards.len(), 16);
    }

    #[test]
    fn stale_preload_is_ignored() {
        let mut game = Game::new(GameConfig::default());
        let old = game.start(1).unwrap();
        let new = game.start(2).unwrap();

        assert_eq!(game.finish_preload(old.session, Ok(())), Ok(false));
        assert_eq!(game.state(), EngineState::Loading);

        let failure = GameError::ImagePreloadFailure {
            symbol: 0,
            reason: "gone".to_string(),
        };
        assert_eq!(game.finish_preload(old.session, Err(failure)), Ok(false));
        assert!(game.error().is_none());

        assert_eq!(game.finish_preload(new.session, Ok(())), Ok(true));
    }

    #[test]
    fn preload_failure_keeps_board_hidden_until_restart() {
        let mut game = Game::new(GameConfig::default());
        let request = game.start(1).unwrap();
        let failure = GameError::ImagePreloadFailure {
            symbol: request.symbols[0],
            reason: "offline".to_string(),
        };

        assert_eq!(
            game.finish_preload(request.session, Err(failure.clone())),
            Err(failure.clone())
        );
        assert_eq!(game.state(), EngineState::Loading);
        assert_eq!(game.error(), Some(&failure));

        let retry = game.start(1).unwrap();
        assert!(game.error().is_none());
        assert_eq!(game.finish_preload(retry.session, Ok(())), Ok(true));
    }

    #[test]
    fn insufficient_symbols_is_reported_and_recoverable() {
        let mut game = Game::new(GameConfig::new(8, SymbolUniverse::range(0, 4), Duration::ZERO));

        let err = game.start(0).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientIdentifierSpace {
                requested: 8,
                available: 4
            }
        );
        assert_eq!(game.error(), Some(&err));
        assert!(game.engine().is_none());
        assert_eq!(game.state(), EngineState::Loading);

        let request = game.start_with_deck(&Deck::from_symbols(&[A, A]).unwrap());
        assert!(game.error().is_none());
        assert_eq!(game.finish_preload(request.session, Ok(())), Ok(true));
    }

    #[test]
    fn zero_delay_turns_mismatch_back_immediately() {
        let mut game = ready_game(instant(), &[A, B, B, A]);

        game.flip(0).unwrap();
        assert!(matches!(game.flip(1), Ok(FlipOutcome::Mismatched(_))));
        assert_eq!(game.state(), EngineState::AwaitingFirstFlip);
        assert_eq!(game.snapshot().face_up_count(), 0);
        assert_eq!(game.snapshot().moves, 1);
    }

    #[test]
    fn delayed_mismatch_waits_for_flip_back() {
        let mut game = ready_game(GameConfig::default(), &[A, B, B, A]);

        game.flip(0).unwrap();
        let Ok(FlipOutcome::Mismatched(ticket)) = game.flip(1) else {
            panic!("expected a mismatch");
        };
        assert_eq!(game.state(), EngineState::Resolving);
        assert_eq!(game.flip(2), Ok(FlipOutcome::NoChange));

        assert!(game.flip_back(ticket));
        assert_eq!(game.state(), EngineState::AwaitingFirstFlip);
        assert_eq!(game.snapshot().face_up_count(), 0);
    }

    #[test]
    fn reset_during_delay_invalidates_flip_back() {
        let mut game = ready_game(GameConfig::default(), &[A, B, B, A]);
        game.flip(0).unwrap();
        let Ok(FlipOutcome::Mismatched(ticket)) = game.flip(1) else {
            panic!("expected a mismatch");
        };

        let request = game.start_with_deck(&Deck::from_symbols(&[A, B, B, A]).unwrap());
        game.finish_preload(request.session, Ok(())).unwrap();
        game.flip(0).unwrap();

        assert!(!game.flip_back(ticket));
        assert_eq!(game.snapshot().cards[0], CardFace::Revealed(A));
    }

    #[test]
    fn reset_from_won_starts_fresh() {
        let mut game = ready_game(GameConfig::default(), &[A, A]);
        game.flip(0).unwrap();
        assert_eq!(game.flip(1), Ok(FlipOutcome::Won));
        assert!(game.snapshot().won);

        let request = game.start(5).unwrap();
        game.finish_preload(request.session, Ok(())).unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.moves, 0);
        assert_eq!(snapshot.matched_pairs, 0);
        assert!(!snapshot.won);
        assert_eq!(snapshot.state, EngineState::Ready);
        assert_eq!(snapshot.cards.len(), 16);
    }
}
