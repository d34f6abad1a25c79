//! Match configuration.
//!
//! `GameConfig` gathers every tunable constant of a match: which play mode
//! is active, the opponent's skill, combat numbers, card economy sizes and
//! the pauses used by deferred transitions. Defaults give the standard
//! 12 vs 3 duel.

use serde::{Deserialize, Serialize};

use super::Side;

/// How the human chooses moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Click a cell; the opponent answers after a pause.
    #[default]
    Direct,
    /// Play a mark card onto a cell, then explicitly end the turn.
    Cards,
}

/// Errors reported by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("skill must be within [0, 1], got {0}")]
    SkillOutOfRange(f64),

    #[error("deck size must be positive")]
    EmptyDeck,

    #[error("hand size {hand} must be between 1 and the deck size {deck}")]
    HandSize { hand: usize, deck: usize },

    #[error("starting health for {0} must be positive")]
    NonPositiveHealth(Side),

    #[error("damage per line must be positive")]
    NonPositiveDamage,
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Direct clicks or card-driven moves.
    pub mode: PlayMode,

    /// Probability that the opponent searches for the optimal move instead
    /// of playing a uniformly random one.
    pub skill: f64,

    /// Damage dealt per completed line.
    pub damage_per_line: i32,

    /// Human starting (and maximum) health.
    pub player_health: i32,

    /// Opponent starting (and maximum) health.
    pub opponent_health: i32,

    /// Cards per side.
    pub deck_size: usize,

    /// Hand capacity.
    pub hand_size: usize,

    /// A scoring side refills its hand when it holds at most this many cards.
    pub refill_threshold: usize,

    /// Pause before the opponent moves.
    pub ai_delay_ms: u64,

    /// Pause between scoring and emptying the scored cells.
    pub line_clear_delay_ms: u64,

    /// Pause between scoring and resuming play (or ending the match).
    pub line_settle_delay_ms: u64,

    /// Pause between a tie and the board reset.
    pub tie_reset_delay_ms: u64,

    /// Seed for every random stream of the match.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::Direct,
            skill: 1.0,
            damage_per_line: 3,
            player_health: 12,
            opponent_health: 3,
            deck_size: 12,
            hand_size: 3,
            refill_threshold: 1,
            ai_delay_ms: 500,
            line_clear_delay_ms: 800,
            line_settle_delay_ms: 1000,
            tie_reset_delay_ms: 1500,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the play mode.
    #[must_use]
    pub fn with_mode(mut self, mode: PlayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the opponent skill.
    #[must_use]
    pub fn with_skill(mut self, skill: f64) -> Self {
        self.skill = skill;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both starting health values.
    #[must_use]
    pub fn with_health(mut self, player: i32, opponent: i32) -> Self {
        self.player_health = player;
        self.opponent_health = opponent;
        self
    }

    /// Set deck size and hand capacity.
    #[must_use]
    pub fn with_cards(mut self, deck_size: usize, hand_size: usize) -> Self {
        self.deck_size = deck_size;
        self.hand_size = hand_size;
        self
    }

    /// Remove every pause. Deferred transitions still run in order.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.ai_delay_ms = 0;
        self.line_clear_delay_ms = 0;
        self.line_settle_delay_ms = 0;
        self.tie_reset_delay_ms = 0;
        self
    }

    /// Starting health for a side.
    #[must_use]
    pub fn starting_health(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_health,
            Side::Opponent => self.opponent_health,
        }
    }

    /// Check that the configuration describes a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.skill) {
            return Err(ConfigError::SkillOutOfRange(self.skill));
        }
        if self.deck_size == 0 {
            return Err(ConfigError::EmptyDeck);
        }
        if self.hand_size == 0 || self.hand_size > self.deck_size {
            return Err(ConfigError::HandSize {
                hand: self.hand_size,
                deck: self.deck_size,
            });
        }
        for side in Side::ALL {
            if self.starting_health(side) <= 0 {
                return Err(ConfigError::NonPositiveHealth(side));
            }
        }
        if self.damage_per_line <= 0 {
            return Err(ConfigError::NonPositiveDamage);
        }
        Ok(())
    }
}
