use std::fmt;

use thiserror::Error;
use tracing::{debug, info, instrument, trace, warn};
use web_time::Instant;

use crate::catalog::MoveCatalog;
use crate::config::{ConfigError, GameConfig};
use crate::piles::{PileBank, PileError, PileGenerator, RandomPiles};
use crate::selection::Selection;
use crate::turn::{Seat, TurnController};
use crate::types::{ActorKind, GameState, Move, StepOutcome};

/// Fatal session errors. Rejected human input is never one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game is not over yet")]
    NotOver,
    #[error("automated actor returned an illegal move ({mv}) for piles {piles:?}")]
    AdversaryContract { mv: Move, piles: Vec<u32> },
    #[error(transparent)]
    Pile(#[from] PileError),
}

/// Decision function for automated seats.
///
/// Contract: when called, at least one legal move exists, and the returned
/// move must be one of them. A violation is fatal for the session.
pub trait Adversary: Send {
    fn decide(&mut self, piles: &[u32], subtrahends: &MoveCatalog) -> Move;
}

impl<F> Adversary for F
where
    F: FnMut(&[u32], &MoveCatalog) -> Move + Send,
{
    fn decide(&mut self, piles: &[u32], subtrahends: &MoveCatalog) -> Move {
        self(piles, subtrahends)
    }
}

/// Takes the first catalog value that fits the first non-stuck pile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMove;

impl Adversary for FirstLegalMove {
    fn decide(&mut self, piles: &[u32], subtrahends: &MoveCatalog) -> Move {
        piles
            .iter()
            .enumerate()
            .find_map(|(pile, &coins)| {
                subtrahends
                    .fitting(coins)
                    .next()
                    .map(|subtrahend| Move::new(pile, subtrahend))
            })
            .unwrap_or_else(|| Move::new(0, subtrahends.values().first().copied().unwrap_or(0)))
    }
}

/// One game: piles, turn order, pending human selection and the two actors.
///
/// This is the only owner of pile state. Every operation takes `&mut self`,
/// so a move cannot be accepted while an automated decision is outstanding.
pub struct GameSession {
    piles: PileBank,
    catalog: MoveCatalog,
    turn: TurnController,
    selection: Selection,
    players: [ActorKind; 2],
    pile_count: usize,
    max_coins: u32,
    last_move: Option<Move>,
    generator: Box<dyn PileGenerator>,
    adversary: Box<dyn Adversary>,
}

impl GameSession {
    /// Validates `config` and deals the first position from `generator`.
    pub fn new(
        config: &GameConfig,
        mut generator: Box<dyn PileGenerator>,
        adversary: Box<dyn Adversary>,
    ) -> Result<Self, ConfigError> {
        let catalog = config.validate()?;
        let piles = PileBank::initialize(
            config.piles,
            config.max_coins_per_pile,
            generator.as_mut(),
        );
        Ok(Self::assemble(config, catalog, piles, generator, adversary))
    }

    /// Classic table: three piles, primes up to 7, human against [`FirstLegalMove`].
    pub fn new_with_defaults(seed: u64) -> Self {
        let config = GameConfig::default();
        let mut generator = Box::new(RandomPiles::new(seed));
        let piles = PileBank::initialize(
            config.piles,
            config.max_coins_per_pile,
            generator.as_mut(),
        );
        Self::assemble(
            &config,
            MoveCatalog::primes(),
            piles,
            generator,
            Box::new(FirstLegalMove),
        )
    }

    /// Starts from an explicit position. Empty piles are allowed, but at least
    /// one coin must remain since nobody has made the winning move yet.
    /// Later resets deal from `generator`.
    pub fn from_piles(
        config: &GameConfig,
        piles: impl Into<Vec<u32>>,
        generator: Box<dyn PileGenerator>,
        adversary: Box<dyn Adversary>,
    ) -> Result<Self, ConfigError> {
        let catalog = config.validate()?;
        let piles = PileBank::from_values(piles);
        if piles.len() != config.piles {
            return Err(ConfigError::PileCount {
                expected: config.piles,
                actual: piles.len(),
            });
        }
        if piles.all_zero() {
            return Err(ConfigError::FinishedPosition);
        }
        Ok(Self::assemble(config, catalog, piles, generator, adversary))
    }

    fn assemble(
        config: &GameConfig,
        catalog: MoveCatalog,
        piles: PileBank,
        generator: Box<dyn PileGenerator>,
        adversary: Box<dyn Adversary>,
    ) -> Self {
        debug!(piles = ?piles.values(), subtrahends = ?catalog.values(), "session created");
        Self {
            piles,
            catalog,
            turn: TurnController::new(),
            selection: Selection::default(),
            players: config.players,
            pile_count: config.piles,
            max_coins: config.max_coins_per_pile,
            last_move: None,
            generator,
            adversary,
        }
    }

    /// Deals fresh piles, gives the turn back to seat A and drops any selection.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.piles = PileBank::initialize(self.pile_count, self.max_coins, self.generator.as_mut());
        self.turn = TurnController::new();
        self.selection.clear();
        self.last_move = None;
        debug!(piles = ?self.piles.values(), "session reset");
    }

    pub fn piles(&self) -> &PileBank {
        &self.piles
    }

    pub fn value_at(&self, index: usize) -> Result<u32, PileError> {
        self.piles.value_at(index)
    }

    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_seat(&self) -> Seat {
        self.turn.active()
    }

    pub fn actor(&self, seat: Seat) -> ActorKind {
        self.players[seat.index()]
    }

    pub fn active_actor(&self) -> ActorKind {
        self.actor(self.turn.active())
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn is_over(&self) -> bool {
        self.piles.all_zero()
    }

    /// The seat that emptied the last pile, i.e. the one not on turn.
    pub fn winning_actor(&self) -> Result<Seat, SessionError> {
        if !self.is_over() {
            return Err(SessionError::NotOver);
        }
        Ok(self.turn.active().other())
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.piles
            .get(mv.pile)
            .is_some_and(|coins| self.catalog.contains(mv.subtrahend) && mv.subtrahend <= coins)
    }

    pub fn has_legal_move(&self) -> bool {
        self.piles
            .values()
            .iter()
            .any(|&coins| self.catalog.fitting(coins).next().is_some())
    }

    /// Coins remain but none of them can be taken.
    pub fn is_stalled(&self) -> bool {
        !self.is_over() && !self.has_legal_move()
    }

    /// Applies the move if it is legal right now. Otherwise nothing changes.
    pub fn attempt_move(&mut self, pile: usize, subtrahend: u32) -> bool {
        let mv = Move::new(pile, subtrahend);
        if !self.is_legal(mv) {
            trace!(%mv, "move rejected");
            return false;
        }
        let applied = self.apply(mv);
        debug_assert!(applied.is_ok(), "validated move failed to apply: {applied:?}");
        applied.is_ok()
    }

    /// [`attempt_move`](Self::attempt_move) for input layers: refused unless a human is on turn.
    pub fn attempt_human_move(&mut self, pile: usize, subtrahend: u32) -> bool {
        if !self.accepts_input() {
            trace!(pile, subtrahend, "move ignored outside a human turn");
            return false;
        }
        self.attempt_move(pile, subtrahend)
    }

    /// Runs the decision function when an automated seat is on turn.
    ///
    /// Returns `Ok(None)` for a human seat, a finished game or a stalled
    /// position; the decision function is not consulted in a stalled position
    /// since no legal answer exists. An illegal answer leaves the session untouched.
    #[instrument(skip(self))]
    pub fn advance_if_automated(&mut self) -> Result<Option<Move>, SessionError> {
        if self.active_actor() != ActorKind::Automated || self.is_over() {
            return Ok(None);
        }
        if !self.has_legal_move() {
            debug!("automated seat has no legal move");
            return Ok(None);
        }

        let started = Instant::now();
        let mv = self.adversary.decide(self.piles.values(), &self.catalog);
        debug!(%mv, elapsed_us = started.elapsed().as_micros() as u64, "automated decision");

        if !self.is_legal(mv) {
            warn!(%mv, piles = ?self.piles.values(), "automated actor returned an illegal move");
            return Err(SessionError::AdversaryContract {
                mv,
                piles: self.piles.values().to_vec(),
            });
        }
        self.apply(mv)?;
        Ok(Some(mv))
    }

    /// First input stage. Ignored unless a human is on turn and the index exists.
    pub fn select_pile(&mut self, index: usize) -> bool {
        if !self.accepts_input() || index >= self.piles.len() {
            trace!(index, "pile selection ignored");
            return false;
        }
        self.selection.select_pile(index);
        debug!(index, "pile selected");
        true
    }

    /// Second input stage. The value must be in the catalog and fit the selected pile.
    pub fn select_subtrahend(&mut self, value: u32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let accepted = self
            .selection
            .select_subtrahend(value, &self.catalog, &self.piles);
        if accepted {
            debug!(value, "subtrahend selected");
        } else {
            trace!(value, "subtrahend rejected");
        }
        accepted
    }

    /// Attempts the move described by a complete selection, re-checked against current piles.
    pub fn commit_selection(&mut self) -> bool {
        match self.selection.as_move() {
            Some(mv) => self.attempt_move(mv.pile, mv.subtrahend),
            None => false,
        }
    }

    /// Catalog values that fit the selected pile.
    pub fn available_subtrahends(&self) -> Vec<u32> {
        self.selection
            .pile()
            .and_then(|index| self.piles.get(index))
            .map(|coins| self.catalog.fitting(coins).collect())
            .unwrap_or_default()
    }

    /// One update tick: play the automated seat, or commit a complete human selection.
    pub fn step(&mut self) -> Result<StepOutcome, SessionError> {
        if self.is_over() {
            return Ok(StepOutcome::GameOver {
                winner: self.winning_actor()?,
            });
        }
        if self.is_stalled() {
            return Ok(StepOutcome::Stalled);
        }

        let seat = self.active_seat();
        let played = match self.active_actor() {
            ActorKind::Automated => self.advance_if_automated()?,
            ActorKind::Human => {
                let pending = self.selection.as_move();
                if self.commit_selection() { pending } else { None }
            }
        };

        Ok(match played {
            Some(mv) => StepOutcome::Moved { seat, mv },
            None => StepOutcome::Waiting,
        })
    }

    pub fn state(&self) -> GameState {
        GameState {
            piles: self.piles.values().to_vec(),
            subtrahends: self.catalog.values().to_vec(),
            current_player: self.active_seat(),
            current_actor: self.active_actor(),
            selected_pile: self.selection.pile(),
            selected_subtrahend: self.selection.subtrahend(),
            available_subtrahends: self.available_subtrahends(),
            is_game_over: self.is_over(),
            is_stalled: self.is_stalled(),
            winner: self.winning_actor().ok(),
            last_move: self.last_move,
        }
    }

    fn accepts_input(&self) -> bool {
        self.active_actor() == ActorKind::Human && !self.is_over()
    }

    fn apply(&mut self, mv: Move) -> Result<Seat, PileError> {
        let mover = self.turn.active();
        let rest = self.piles.subtract(mv.pile, mv.subtrahend)?;
        self.turn.move_applied();
        self.selection.clear();
        self.last_move = Some(mv);

        debug!(seat = %mover, %mv, rest, "move applied");
        if self.piles.all_zero() {
            info!(winner = %mover, "all piles empty");
        }
        Ok(mover)
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("piles", &self.piles)
            .field("catalog", &self.catalog)
            .field("turn", &self.turn)
            .field("selection", &self.selection)
            .field("players", &self.players)
            .field("last_move", &self.last_move)
            .finish_non_exhaustive()
    }
}
