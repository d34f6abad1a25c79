//! Combat participants.

use serde::{Deserialize, Serialize};

/// Damage for one scoring event: lines completed × damage per line.
#[must_use]
pub fn line_damage(lines: usize, damage_per_line: i32) -> i32 {
    i32::try_from(lines)
        .unwrap_or(i32::MAX)
        .saturating_mul(damage_per_line)
}

/// Health and damage record of one side.
///
/// `health` may go below zero; [`Character::display_health`] clamps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub health: i32,
    pub max_health: i32,
    /// Total damage this character has dealt during the current game.
    pub damage_dealt: i32,
}

impl Character {
    /// A character at full health.
    #[must_use]
    pub fn new(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            damage_dealt: 0,
        }
    }

    /// Restore full health and forget dealt damage.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_health);
    }

    /// Lose `amount` health.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Record `amount` dealt to the other side.
    pub fn record_dealt(&mut self, amount: i32) {
        self.damage_dealt = self.damage_dealt.saturating_add(amount);
    }

    /// True once health has reached zero or below.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Health clamped at zero, for display.
    #[must_use]
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }
}
