use std::fmt;

use serde::{Deserialize, Serialize};

use crate::turn::Seat;

/// Who drives a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// Moves come from two-stage selection by an input layer.
    Human,
    /// Moves come from an [`Adversary`](crate::game::Adversary) decision function.
    Automated,
}

/// Take `subtrahend` coins from pile `pile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub pile: usize,
    pub subtrahend: u32,
}

impl Move {
    pub fn new(pile: usize, subtrahend: u32) -> Self {
        Self { pile, subtrahend }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.subtrahend, self.pile)
    }
}

/// Result of one [`GameSession::step`](crate::game::GameSession::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// A move was applied for `seat`.
    Moved { seat: Seat, mv: Move },
    /// A human seat is active and its selection is incomplete or illegal.
    Waiting,
    /// Coins remain but no catalog value fits any pile.
    Stalled,
    /// Every pile is empty.
    GameOver { winner: Seat },
}

/// Public session state handed to render layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub piles: Vec<u32>,
    pub subtrahends: Vec<u32>,
    pub current_player: Seat,
    pub current_actor: ActorKind,
    pub selected_pile: Option<usize>,
    pub selected_subtrahend: Option<u32>,
    /// Subtrahends that fit the selected pile; empty without a selection.
    pub available_subtrahends: Vec<u32>,
    pub is_game_over: bool,
    pub is_stalled: bool,
    /// Contract: `Some` exactly when `is_game_over`.
    pub winner: Option<Seat>,
    /// Contract: `None` right after a reset.
    pub last_move: Option<Move>,
}
