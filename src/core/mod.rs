//! Core types shared by every component: participants, RNG, configuration.

pub mod side;
pub mod rng;
pub mod config;

pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{ConfigError, GameConfig, PlayMode};
