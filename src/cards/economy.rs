//! Card economy: per-side deck, discard pile and hand.
//!
//! Both sides follow identical rules:
//! - A fresh deck holds `deck_size` cards of the side's mark, shuffled.
//! - Drawing from an empty draw pile first reshuffles the discard pile back in.
//! - Played cards leave the hand; the caller discards them explicitly.
//! - A side that scores with a near-empty hand reshuffles and refills.
//!
//! For each side, draw pile + discard pile + hand always holds exactly the
//! starting `deck_size` cards.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::card::{Card, CardId};
use super::deck::Deck;
use super::hand::Hand;
use crate::core::{GameConfig, GameRng, Side, SideMap};

/// Why a draw produced no card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("hand is full")]
    HandFull,

    #[error("draw pile and discard pile are both empty")]
    Exhausted,
}

/// Pile sizes for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCounts {
    pub draw: usize,
    pub discard: usize,
    pub hand: usize,
}

impl DeckCounts {
    /// Cards accounted for across all three piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw + self.discard + self.hand
    }
}

#[derive(Clone, Debug)]
struct SideCards {
    deck: Deck,
    hand: Hand,
}

/// Decks and hands for both sides.
///
/// ```
/// use gridlock::cards::CardEconomy;
/// use gridlock::core::{GameConfig, GameRng, Side};
///
/// let mut economy = CardEconomy::new(&GameConfig::default(), GameRng::new(42));
/// let drawn = economy.draw_initial_hand(Side::Player);
/// assert_eq!(drawn.len(), 3);
///
/// let card = economy.play(drawn[0].id, Side::Player).unwrap();
/// economy.discard(card, Side::Player);
/// assert_eq!(economy.deck_counts(Side::Player).total(), 12);
/// ```
#[derive(Clone, Debug)]
pub struct CardEconomy {
    sides: SideMap<SideCards>,
    rng: GameRng,
    deck_size: usize,
    hand_size: usize,
    refill_threshold: usize,
}

impl CardEconomy {
    /// Create both sides' decks, shuffled, with empty hands.
    #[must_use]
    pub fn new(config: &GameConfig, mut rng: GameRng) -> Self {
        let deck_size = config.deck_size;
        let hand_size = config.hand_size;
        let sides = SideMap::new(|side| fresh_side(side, deck_size, hand_size, &mut rng));
        Self {
            sides,
            rng,
            deck_size,
            hand_size,
            refill_threshold: config.refill_threshold,
        }
    }

    /// Rebuild one side's deck from scratch: all cards shuffled into the
    /// draw pile, empty discard pile, empty hand.
    pub fn initialize(&mut self, side: Side) {
        self.sides[side] = fresh_side(side, self.deck_size, self.hand_size, &mut self.rng);
        debug!(%side, cards = self.deck_size, "deck initialized");
    }

    /// Rebuild both sides.
    pub fn reset(&mut self) {
        for side in Side::ALL {
            self.initialize(side);
        }
    }

    /// Draw one card into the hand.
    ///
    /// An empty draw pile is refilled from the discard pile first.
    pub fn draw(&mut self, side: Side) -> Result<Card, DrawError> {
        let cards = &mut self.sides[side];
        if cards.hand.is_full() {
            return Err(DrawError::HandFull);
        }

        if cards.deck.draw_count() == 0 {
            let moved = cards.deck.reshuffle_discards(&mut self.rng);
            debug!(%side, moved, "draw pile empty, reshuffled discards");
        }

        let card = cards.deck.pop_top().ok_or(DrawError::Exhausted)?;
        if let Err(card) = cards.hand.push(card.clone()) {
            // Unreachable: fullness was checked above
            cards.deck.discard(card);
            return Err(DrawError::HandFull);
        }
        trace!(%side, card = %card.id, "drew card");
        Ok(card)
    }

    /// Draw until the hand is full or no card can be drawn.
    pub fn draw_initial_hand(&mut self, side: Side) -> Vec<Card> {
        self.draw_up_to_capacity(side)
    }

    /// Remove `id` from `side`'s hand. The caller is responsible for
    /// discarding the returned card.
    pub fn play(&mut self, id: CardId, side: Side) -> Option<Card> {
        let card = self.sides[side].hand.take(id)?;
        debug!(%side, card = %id, "played card");
        Some(card)
    }

    /// Put a card on `side`'s discard pile.
    pub fn discard(&mut self, card: Card, side: Side) {
        self.sides[side].deck.discard(card);
    }

    /// After scoring, a side holding at most `refill_threshold` cards
    /// reshuffles its discards into the draw pile and draws back up to
    /// capacity. Otherwise nothing happens and no card is returned.
    pub fn refill_after_score(&mut self, side: Side) -> Vec<Card> {
        let cards = &mut self.sides[side];
        if cards.hand.len() > self.refill_threshold {
            return Vec::new();
        }

        let moved = cards.deck.reshuffle_discards(&mut self.rng);
        debug!(%side, moved, held = cards.hand.len(), "refilling hand after score");
        self.draw_up_to_capacity(side)
    }

    fn draw_up_to_capacity(&mut self, side: Side) -> Vec<Card> {
        let mut drawn = Vec::new();
        while let Ok(card) = self.draw(side) {
            drawn.push(card);
        }
        drawn
    }

    /// Cards in `side`'s hand.
    #[must_use]
    pub fn hand(&self, side: Side) -> &[Card] {
        self.sides[side].hand.cards()
    }

    /// Whether `side` holds a card with `id`.
    #[must_use]
    pub fn holds(&self, side: Side, id: CardId) -> Option<&Card> {
        self.sides[side].hand.get(id)
    }

    /// Pile sizes for `side`.
    #[must_use]
    pub fn deck_counts(&self, side: Side) -> DeckCounts {
        let cards = &self.sides[side];
        DeckCounts {
            draw: cards.deck.draw_count(),
            discard: cards.deck.discard_count(),
            hand: cards.hand.len(),
        }
    }
}

fn fresh_side(side: Side, deck_size: usize, hand_size: usize, rng: &mut GameRng) -> SideCards {
    // Player ids come first, opponent ids follow, so ids are unique per match
    let base = (side.index() * deck_size) as u32;
    let cards = (0..deck_size as u32)
        .map(|i| Card::basic(CardId::new(base + i), side))
        .collect();
    SideCards {
        deck: Deck::shuffled(cards, rng),
        hand: Hand::new(hand_size),
    }
}
