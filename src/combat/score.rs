//! Session score.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Games won by each side and tied boards, for the whole session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
    pub ties: u32,
}

impl Score {
    /// Count a game won by `side`.
    pub fn record_win(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    /// Count a tied board.
    pub fn record_tie(&mut self) {
        self.ties += 1;
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Player: {} | Opponent: {} | Ties: {}",
            self.player, self.opponent, self.ties
        )
    }
}
