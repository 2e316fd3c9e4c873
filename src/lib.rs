use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod game;
pub mod piles;
pub mod selection;
pub mod turn;
pub mod types;
pub mod wasm;

pub use catalog::MoveCatalog;
pub use config::{ConfigError, GameConfig};
pub use game::{Adversary, FirstLegalMove, GameSession, SessionError};
pub use piles::{FixedPiles, PileBank, PileError, PileGenerator, RandomPiles};
pub use turn::Seat;
pub use types::{ActorKind, GameState, Move, StepOutcome};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
