use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    /// 1-based player number as shown to people.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Whose turn it is. Knows nothing about the board; it only flips after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnController {
    active: Seat,
}

impl TurnController {
    pub const INITIAL: Seat = Seat::A;

    pub fn new() -> Self {
        Self {
            active: Self::INITIAL,
        }
    }

    pub fn active(&self) -> Seat {
        self.active
    }

    /// Hands the turn to the other seat and returns it.
    pub fn move_applied(&mut self) -> Seat {
        self.active = self.active.other();
        self.active
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_a_starts_and_turns_alternate() {
        let mut turn = TurnController::new();

        assert_eq!(turn.active(), Seat::A);
        assert_eq!(turn.move_applied(), Seat::B);
        assert_eq!(turn.move_applied(), Seat::A);
    }

    #[test]
    fn seats_display_as_player_numbers() {
        assert_eq!(Seat::A.to_string(), "Player 1");
        assert_eq!(Seat::B.to_string(), "Player 2");
        assert_eq!(Seat::B.other(), Seat::A);
    }
}
