//! Move policies and the skill-blended selector.

use tracing::debug;

use super::minimax::MinimaxPolicy;
use crate::board::{Board, Mark};
use crate::core::GameRng;

/// Picks a cell for `mark` to play.
///
/// Returns `None` only when the board has no empty cell.
pub trait MovePolicy {
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<usize>;

    /// Adjust the skill blend. Policies without one ignore it.
    fn set_skill(&mut self, _skill: f64) {}
}

/// Uniformly random empty cell.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl MovePolicy for RandomPolicy {
    fn choose_move(&mut self, board: &Board, _mark: Mark) -> Option<usize> {
        let moves = board.available_moves();
        self.rng.choose(&moves).copied()
    }
}

/// Blends random and optimal play.
///
/// With probability `skill` the move comes from minimax search, otherwise it
/// is a uniformly random empty cell. `skill = 1` is perfect play, `skill = 0`
/// is fully random.
///
/// ```
/// use gridlock::ai::{MovePolicy, MoveSelector};
/// use gridlock::board::{Board, Mark};
/// use gridlock::core::GameRng;
///
/// let mut board = Board::new();
/// board.apply_move(0, Mark::O);
/// board.apply_move(1, Mark::O);
/// board.apply_move(4, Mark::X);
///
/// let mut selector = MoveSelector::new(1.0, GameRng::new(42));
/// assert_eq!(selector.choose_move(&board, Mark::O), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct MoveSelector {
    skill: f64,
    rng: GameRng,
    random: RandomPolicy,
    search: MinimaxPolicy,
}

impl MoveSelector {
    /// Create a selector. `skill` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(skill: f64, rng: GameRng) -> Self {
        Self {
            skill: clamp_skill(skill),
            random: RandomPolicy::new(rng.for_context("random-move")),
            rng,
            search: MinimaxPolicy::new(),
        }
    }

    /// Current skill.
    #[must_use]
    pub fn skill(&self) -> f64 {
        self.skill
    }
}

fn clamp_skill(skill: f64) -> f64 {
    if skill.is_nan() {
        0.0
    } else {
        skill.clamp(0.0, 1.0)
    }
}

impl MovePolicy for MoveSelector {
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        if self.rng.gen_bool(self.skill) {
            self.search.choose_move(board, mark)
        } else {
            let index = self.random.choose_move(board, mark);
            debug!(mark = %mark, index = ?index, "random move");
            index
        }
    }

    /// Clamped to `[0, 1]`; NaN counts as 0.
    fn set_skill(&mut self, skill: f64) {
        self.skill = clamp_skill(skill);
    }
}
