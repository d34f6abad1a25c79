//! Card economy: mark cards, decks, hands.
//!
//! In the card-driven mode every move consumes a card from the mover's
//! hand, so the economy gates which moves each side may make.

pub mod card;
pub mod deck;
pub mod hand;
pub mod economy;

pub use card::{Card, CardId, CardKind};
pub use deck::Deck;
pub use hand::Hand;
pub use economy::{CardEconomy, DeckCounts, DrawError};
