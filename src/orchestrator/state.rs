//! Turn state machine states and read-only match snapshots.

use serde::{Deserialize, Serialize};

use crate::board::Cells;
use crate::cards::{Card, DeckCounts};
use crate::combat::{Character, Score};
use crate::core::SideMap;

/// Where the match is in its turn cycle.
///
/// Human input is only accepted in `WaitingForPlayer` (moves, card plays)
/// and `WaitingForEndTurn` (ending the turn). Every other state has a
/// deferred transition pending, so input arriving then is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// The human may move.
    WaitingForPlayer,
    /// The opponent's move is scheduled.
    AiThinking,
    /// Card mode: the human played a card and must end the turn.
    WaitingForEndTurn,
    /// Scored lines or a tie are being resolved.
    Resolving,
    /// A character was defeated. Only a reset leaves this state.
    GameOver,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnState::WaitingForPlayer => "waiting for player",
            TurnState::AiThinking => "opponent thinking",
            TurnState::WaitingForEndTurn => "waiting for end of turn",
            TurnState::Resolving => "resolving",
            TurnState::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Everything presentation needs to draw a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub state: TurnState,
    pub board: Cells,
    pub characters: SideMap<Character>,
    pub score: Score,
    pub hands: SideMap<Vec<Card>>,
    pub deck_counts: SideMap<DeckCounts>,
    pub skill: f64,
}
