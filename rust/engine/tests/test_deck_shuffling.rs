use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn shuffled_deck_has_52_unique_cards() {
    let mut deck = Deck::new_shuffled(42);
    let cards = deck.deal(52).expect("full deck");
    let set: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(set.len(), 52, "every card should appear exactly once");
    assert_eq!(deck.remaining(), 0);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_shuffled(12345);
    let mut d2 = Deck::new_shuffled(12345);
    assert_eq!(d1.deal(52).unwrap(), d2.deal(52).unwrap());
}

#[test]
fn different_seeds_give_different_orders() {
    let mut d1 = Deck::new_shuffled(1);
    let mut d2 = Deck::new_shuffled(2);
    assert_ne!(
        d1.deal(10).unwrap(),
        d2.deal(10).unwrap(),
        "seeds 1 and 2 should not shuffle identically"
    );
}

#[test]
fn dealing_removes_from_the_front_without_replacement() {
    let mut deck = Deck::new_shuffled(7);
    let preview: Vec<Card> = deck.undealt()[..5].to_vec();
    let first = deck.deal(2).unwrap();
    let next = deck.deal_card().unwrap();
    assert_eq!(first, preview[..2]);
    assert_eq!(next, preview[2]);
    assert_eq!(deck.remaining(), 49);
    assert!(!deck.undealt().contains(&next));
}

#[test]
fn deal_past_the_end_reports_deck_exhausted() {
    let mut deck = Deck::new_shuffled(9);
    deck.deal(51).unwrap();
    match deck.deal(2) {
        Err(GameError::DeckExhausted {
            requested,
            remaining,
        }) => {
            assert_eq!(requested, 2);
            assert_eq!(remaining, 1);
        }
        other => panic!("expected DeckExhausted, got {:?}", other),
    }
    assert!(deck.deal_card().is_ok(), "the last card is still dealable");
    assert!(deck.deal_card().is_err());
}
