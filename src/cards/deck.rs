//! Draw pile and discard pile.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::GameRng;

/// A side's draw pile (a stack; the top is the last element) and its
/// unordered discard pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Create a deck whose draw pile holds `cards` shuffled.
    #[must_use]
    pub fn shuffled(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards,
            discard_pile: Vec::new(),
        }
    }

    /// Remove and return the top card of the draw pile.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.draw_pile.pop()
    }

    /// Add a card to the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Move every discarded card into the draw pile and shuffle the whole
    /// draw pile. Returns the number of cards moved.
    pub fn reshuffle_discards(&mut self, rng: &mut GameRng) -> usize {
        let moved = self.discard_pile.len();
        self.draw_pile.append(&mut self.discard_pile);
        rng.shuffle(&mut self.draw_pile);
        moved
    }

    /// Cards left to draw.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Discard pile, in discard order.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }
}
