//! Card identity.
//!
//! A card is immutable once created. Presentation keeps any visual state
//! (sprites, containers) in its own table keyed by `CardId`.

use serde::{Deserialize, Serialize};

use crate::board::Mark;
use crate::core::Side;

/// Unique identifier of a card within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card type. Each type places exactly one mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    NormalX,
    NormalO,
}

impl CardKind {
    /// The basic card kind for a side's mark.
    #[must_use]
    pub const fn basic(mark: Mark) -> Self {
        match mark {
            Mark::X => CardKind::NormalX,
            Mark::O => CardKind::NormalO,
        }
    }

    /// The mark this card places.
    #[must_use]
    pub const fn mark(self) -> Mark {
        match self {
            CardKind::NormalX => Mark::X,
            CardKind::NormalO => Mark::O,
        }
    }
}

/// A mark card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub name: String,
    pub description: String,
}

impl Card {
    /// Create a basic card placing `side`'s mark.
    #[must_use]
    pub fn basic(id: CardId, side: Side) -> Self {
        let mark = side.mark();
        Self {
            id,
            kind: CardKind::basic(mark),
            name: format!("{mark} Normal"),
            description: format!("A basic {mark} mark"),
        }
    }

    /// The mark this card places.
    #[must_use]
    pub fn mark(&self) -> Mark {
        self.kind.mark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_cards() {
        let x = Card::basic(CardId::new(0), Side::Player);
        assert_eq!(x.kind, CardKind::NormalX);
        assert_eq!(x.mark(), Mark::X);
        assert_eq!(x.name, "X Normal");

        let o = Card::basic(CardId::new(12), Side::Opponent);
        assert_eq!(o.kind, CardKind::NormalO);
        assert_eq!(o.mark(), Mark::O);
    }

    #[test]
    fn test_card_id_display() {
        assert_eq!(CardId::new(7).to_string(), "Card(7)");
        assert_eq!(CardId::new(7).raw(), 7);
    }
}
