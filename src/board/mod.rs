//! Board engine: the 3×3 grid, move validation, line detection and line clears.
//!
//! The grid is never "won" for good. Completed lines are reported by
//! `Board::evaluate_lines`, scored by the orchestrator and then emptied with
//! `Board::clear_lines`, leaving every other mark in place so play continues.
//!
//! The board has no notion of turns; that lives in the orchestrator.

pub mod grid;
pub mod lines;

pub use grid::{available_moves, Board, Cells, Mark, BOARD_CELLS};
pub use lines::{completed_lines, first_completed, CompletedLine, LineCheck, LinePattern, LINE_PATTERNS};
