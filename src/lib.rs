//! # gridlock
//!
//! Rules engine for a two-player tic-tac-toe duel where completed lines deal
//! damage and are cleared, so play continues on the same board until one
//! side runs out of health.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, audio or input devices. Presentation
//!    drives the engine through requests and reads events and snapshots.
//!
//! 2. **Deterministic**: All randomness flows from one seed, split into
//!    named streams. Time is a virtual clock advanced by the caller.
//!
//! 3. **Configuration Over Constants**: Health, damage, deck sizes and
//!    delays live in `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration
//! - `board`: 3×3 grid, line detection and line clearing
//! - `ai`: Minimax search and the skill-blended move selector
//! - `cards`: Per-side deck, hand and discard pile
//! - `combat`: Characters, line damage and the running score
//! - `orchestrator`: Turn state machine, deferred transitions, events

pub mod core;
pub mod board;
pub mod ai;
pub mod cards;
pub mod combat;
pub mod orchestrator;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameConfig, GameRng, PlayMode, Side, SideMap};

pub use crate::board::{Board, Cells, LineCheck, LinePattern, Mark, LINE_PATTERNS};

pub use crate::ai::{MinimaxPolicy, MovePolicy, MoveSelector, RandomPolicy};

pub use crate::cards::{Card, CardEconomy, CardId, DeckCounts, DrawError};

pub use crate::combat::{Character, Score};

pub use crate::orchestrator::{
    GameEvent, MatchSnapshot, Orchestrator, Rejection,
    StatusMessage, StatusTone, TurnState,
};
