//! Combat layer: characters, damage from completed lines, match score.

pub mod character;
pub mod score;

pub use character::{line_damage, Character};
pub use score::Score;
