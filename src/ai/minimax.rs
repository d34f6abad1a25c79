//! Exhaustive minimax search over the remaining game tree.
//!
//! ## Scoring
//!
//! Scores are from the searching side's point of view, with `depth`
//! counted from the searched position (root = 0):
//! - searcher completed a line: `10 - depth`
//! - opponent completed a line: `-(10 - depth)`
//! - board full, no line: `0`
//!
//! The depth offset prefers faster wins and slower losses. Ties between
//! equally scored moves go to the lowest cell index.
//!
//! A 3×3 tree has at most 9! leaves, so no pruning is needed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::selector::MovePolicy;
use crate::board::{available_moves, first_completed, Board, Cells, Mark};

/// Best score reachable from a position, and the move reaching it.
///
/// `index` is `None` for terminal positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scored {
    pub score: i32,
    pub index: Option<usize>,
}

const WIN_SCORE: i32 = 10;

/// Optimal move policy.
#[derive(Clone, Debug, Default)]
pub struct MinimaxPolicy {
    nodes: u64,
}

impl MinimaxPolicy {
    /// Create a new search policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the last search.
    #[must_use]
    pub fn last_node_count(&self) -> u64 {
        self.nodes
    }

    /// Search `cells` with `mark` to move, scoring from `mark`'s side.
    pub fn search(&mut self, cells: &Cells, mark: Mark) -> Scored {
        self.nodes = 0;
        self.minimax(cells, mark, mark, 0)
    }

    fn minimax(&mut self, cells: &Cells, to_move: Mark, me: Mark, depth: i32) -> Scored {
        self.nodes += 1;

        match first_completed(cells) {
            Some(winner) if winner == me => {
                return Scored { score: WIN_SCORE - depth, index: None };
            }
            Some(_) => {
                return Scored { score: depth - WIN_SCORE, index: None };
            }
            None => {}
        }

        let moves = available_moves(cells);
        if moves.is_empty() {
            return Scored { score: 0, index: None };
        }

        let maximizing = to_move == me;
        let mut best: Option<Scored> = None;

        for index in moves {
            let mut child = *cells;
            child[index] = Some(to_move);
            let score = self.minimax(&child, to_move.other(), me, depth + 1).score;

            let better = match best {
                None => true,
                Some(b) if maximizing => score > b.score,
                Some(b) => score < b.score,
            };
            if better {
                best = Some(Scored { score, index: Some(index) });
            }
        }

        // `moves` was non-empty, so `best` is set
        best.unwrap_or(Scored { score: 0, index: None })
    }
}

impl MovePolicy for MinimaxPolicy {
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        let result = self.search(&board.cells(), mark);
        debug!(
            mark = %mark,
            score = result.score,
            index = ?result.index,
            nodes = self.nodes,
            "minimax search finished"
        );
        result.index
    }
}
