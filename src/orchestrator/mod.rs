//! Turn orchestration: the match state machine, its deferred transitions
//! and the events it publishes.
//!
//! ## Flow
//!
//! Inbound requests (`request_player_move`, `request_play_card`,
//! `request_end_turn`, `request_reset`, `set_difficulty`) either change
//! state and publish events, or are rejected with no effect. Pauses are
//! tasks on a virtual-clock `Scheduler`, driven by `tick` or
//! `run_until_idle`.

pub mod engine;
pub mod events;
pub mod scheduler;
pub mod state;

pub use engine::{Orchestrator, Rejection};
pub use events::{EventListener, EventLog, GameEvent, StatusMessage, StatusTone};
pub use scheduler::{Millis, Scheduler};
pub use state::{MatchSnapshot, TurnState};
