//! Card economy tests: conservation, hand capacity and reshuffling.

use proptest::prelude::*;

use gridlock::cards::{CardEconomy, DeckCounts, DrawError};
use gridlock::core::{GameConfig, GameRng, Side};

#[derive(Clone, Debug)]
enum Op {
    Draw(Side),
    PlayAndDiscard(Side, usize),
    Refill(Side),
    Initialize(Side),
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Player), Just(Side::Opponent)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => side().prop_map(Op::Draw),
        4 => (side(), 0usize..3).prop_map(|(s, i)| Op::PlayAndDiscard(s, i)),
        1 => side().prop_map(Op::Refill),
        1 => side().prop_map(Op::Initialize),
    ]
}

fn apply(economy: &mut CardEconomy, op: &Op) {
    match *op {
        Op::Draw(side) => {
            let _ = economy.draw(side);
        }
        Op::PlayAndDiscard(side, slot) => {
            let Some(id) = economy.hand(side).get(slot).map(|card| card.id) else {
                return;
            };
            if let Some(card) = economy.play(id, side) {
                economy.discard(card, side);
            }
        }
        Op::Refill(side) => {
            economy.refill_after_score(side);
        }
        Op::Initialize(side) => economy.initialize(side),
    }
}

proptest! {
    /// Every card stays in exactly one pile and hands never exceed
    /// capacity, whatever sequence of operations runs.
    #[test]
    fn prop_cards_are_conserved(seed in any::<u64>(), ops in prop::collection::vec(op(), 0..120)) {
        let config = GameConfig::default();
        let mut economy = CardEconomy::new(&config, GameRng::new(seed));

        for op in &ops {
            apply(&mut economy, op);
            for side in Side::ALL {
                let counts = economy.deck_counts(side);
                prop_assert_eq!(counts.total(), 12);
                prop_assert!(counts.hand <= 3);
                prop_assert!(economy.hand(side).iter().all(|card| card.mark() == side.mark()));
            }
        }
    }

    /// Drawing fails only on a full hand or an exhausted deck.
    #[test]
    fn prop_draw_errors(seed in any::<u64>(), hand_size in 1usize..6, deck_size in 1usize..8) {
        let config = GameConfig::default().with_cards(deck_size, hand_size);
        let mut economy = CardEconomy::new(&config, GameRng::new(seed));

        let drawn = economy.draw_initial_hand(Side::Player);
        prop_assert_eq!(drawn.len(), hand_size.min(deck_size));

        let expected = if deck_size < hand_size { DrawError::Exhausted } else { DrawError::HandFull };
        prop_assert_eq!(economy.draw(Side::Player), Err(expected));
    }
}

#[test]
fn test_reshuffle_when_draw_pile_runs_out() {
    let mut economy = CardEconomy::new(&GameConfig::default(), GameRng::new(3));
    let side = Side::Player;
    economy.draw_initial_hand(side);

    // Cycle through the deck: play one, draw one, until the draw pile is empty
    while economy.deck_counts(side).draw > 0 {
        let id = economy.hand(side)[0].id;
        let card = economy.play(id, side).unwrap();
        economy.discard(card, side);
        economy.draw(side).unwrap();
    }
    assert_eq!(economy.deck_counts(side), DeckCounts { draw: 0, discard: 9, hand: 3 });

    let id = economy.hand(side)[0].id;
    let card = economy.play(id, side).unwrap();
    economy.discard(card, side);
    economy.draw(side).unwrap();
    assert_eq!(economy.deck_counts(side), DeckCounts { draw: 9, discard: 0, hand: 3 });
}

#[test]
fn test_refill_after_score_keeps_full_deck() {
    let mut economy = CardEconomy::new(&GameConfig::default(), GameRng::new(5));
    let side = Side::Opponent;
    let hand = economy.draw_initial_hand(side);
    for card in &hand[..2] {
        let played = economy.play(card.id, side).unwrap();
        economy.discard(played, side);
    }
    assert_eq!(economy.deck_counts(side), DeckCounts { draw: 9, discard: 2, hand: 1 });

    let drawn = economy.refill_after_score(side);
    assert_eq!(drawn.len(), 2);
    assert_eq!(economy.deck_counts(side), DeckCounts { draw: 9, discard: 0, hand: 3 });
}

#[test]
fn test_same_seed_same_draws() {
    let config = GameConfig::default();
    let mut a = CardEconomy::new(&config, GameRng::new(11));
    let mut b = CardEconomy::new(&config, GameRng::new(11));
    assert_eq!(a.draw_initial_hand(Side::Player), b.draw_initial_hand(Side::Player));
    assert_eq!(a.draw_initial_hand(Side::Opponent), b.draw_initial_hand(Side::Opponent));
}

#[test]
fn test_sides_are_independent() {
    let mut economy = CardEconomy::new(&GameConfig::default(), GameRng::new(8));
    economy.draw_initial_hand(Side::Player);
    assert_eq!(economy.deck_counts(Side::Player).hand, 3);
    assert_eq!(economy.deck_counts(Side::Opponent), DeckCounts { draw: 12, discard: 0, hand: 0 });
}
