use std::collections::HashMap;

use baccarat_engine::cards::{all_ranks, Card, Rank};
use baccarat_engine::errors::GameError;
use baccarat_engine::shoe::{Shoe, DEFAULT_DECKS, PENETRATION_THRESHOLD};

#[test]
fn shoe_holds_52_cards_per_deck() {
    for n in [1, 4, 6, 8] {
        let shoe = Shoe::new_with_seed(n, 9).unwrap();
        assert_eq!(shoe.remaining(), 52 * n);
    }
    assert_eq!(Shoe::new(DEFAULT_DECKS).unwrap().remaining(), 416);
}

#[test]
fn each_draw_removes_exactly_one_card_until_empty() {
    let mut shoe = Shoe::new_with_seed(2, 5).unwrap();
    let mut counts: HashMap<Rank, usize> = HashMap::new();
    for drawn in 1..=104 {
        let c = shoe.draw().expect("card available");
        *counts.entry(c.rank).or_default() += 1;
        assert_eq!(shoe.remaining(), 104 - drawn);
    }
    assert_eq!(shoe.draw(), Err(GameError::EmptyShoe));
    assert_eq!(shoe.remaining(), 0);
    for r in all_ranks() {
        assert_eq!(counts[&r], 8, "rank {} should appear 4 times per deck", r);
    }
}

#[test]
fn same_seed_deals_same_sequence() {
    let mut a = Shoe::new_with_seed(8, 12345).unwrap();
    let mut b = Shoe::new_with_seed(8, 12345).unwrap();
    let x: Vec<Card> = (0..20).map(|_| a.draw().unwrap()).collect();
    let y: Vec<Card> = (0..20).map(|_| b.draw().unwrap()).collect();
    assert_eq!(x, y);
}

#[test]
fn different_seeds_deal_different_sequences() {
    let mut a = Shoe::new_with_seed(8, 1).unwrap();
    let mut b = Shoe::new_with_seed(8, 2).unwrap();
    let x: Vec<Card> = (0..20).map(|_| a.draw().unwrap()).collect();
    let y: Vec<Card> = (0..20).map(|_| b.draw().unwrap()).collect();
    assert_ne!(x, y, "different seeds should produce different orders (high probability)");
}

#[test]
fn rebuild_restores_a_full_shoe() {
    let mut shoe = Shoe::new_with_seed(1, 77).unwrap();
    for _ in 0..50 {
        shoe.draw().unwrap();
    }
    assert!(shoe.needs_reshuffle(PENETRATION_THRESHOLD));
    shoe.rebuild();
    assert_eq!(shoe.remaining(), 52);
    assert!(!shoe.needs_reshuffle(PENETRATION_THRESHOLD));
}

#[test]
fn shuffle_keeps_the_remaining_count() {
    let mut shoe = Shoe::new_with_seed(1, 3).unwrap();
    shoe.draw().unwrap();
    shoe.shuffle();
    assert_eq!(shoe.remaining(), 51);
}

#[test]
fn zero_decks_is_an_error() {
    assert!(matches!(
        Shoe::new(0),
        Err(GameError::InvalidDeckCount { num_decks: 0 })
    ));
}

#[test]
fn oversized_deck_counts_are_errors_not_panics() {
    use baccarat_engine::shoe::MAX_DECKS;

    assert!(Shoe::new_with_seed(MAX_DECKS, 1).is_ok());
    for n in [MAX_DECKS + 1, 100_000_000, usize::MAX / 26, usize::MAX] {
        assert_eq!(
            Shoe::new_with_seed(n, 1).unwrap_err(),
            GameError::InvalidDeckCount { num_decks: n }
        );
    }
}
