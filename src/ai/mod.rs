//! Move selection for the computer-controlled side.
//!
//! Policies are trait-based so the orchestrator does not care how a move
//! was picked:
//! - `RandomPolicy`: uniformly random empty cell
//! - `MinimaxPolicy`: exhaustive minimax search
//! - `MoveSelector`: blends the two with a single skill parameter
//!
//! No policy mutates the board it is given; search runs on copies.

pub mod minimax;
pub mod selector;

pub use minimax::{MinimaxPolicy, Scored};
pub use selector::{MovePolicy, MoveSelector, RandomPolicy};
