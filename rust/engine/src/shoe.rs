use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{all_suits, full_deck_ranks, Card};
use crate::errors::GameError;

/// Number of 52-card decks in a freshly built shoe unless configured otherwise.
pub const DEFAULT_DECKS: usize = 8;

/// Largest shoe the engine will build.
pub const MAX_DECKS: usize = 64;

/// Below this many remaining cards the shoe must be rebuilt before the next round.
pub const PENETRATION_THRESHOLD: usize = 6;

/// A multi-deck card pool dealt from the back after a shuffle.
///
/// The shoe tracks ranks only. Unless disabled with
/// [`Shoe::set_assign_suits`], each drawn card receives a random suit from
/// the shoe's RNG, so suits are never depleted.
///
/// # Examples
///
/// ```
/// use baccarat_engine::shoe::Shoe;
///
/// let mut shoe = Shoe::new_with_seed(8, 42).unwrap();
/// assert_eq!(shoe.remaining(), 416);
/// let _card = shoe.draw().unwrap();
/// assert_eq!(shoe.remaining(), 415);
/// ```
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    num_decks: usize,
    rng: ChaCha20Rng,
    assign_suits: bool,
    /// Fixed dealing order for stacked shoes; restored on rebuild
    stack: Option<Vec<Card>>,
}

impl Shoe {
    pub fn new(num_decks: usize) -> Result<Self, GameError> {
        Self::new_with_seed(num_decks, rand::random())
    }

    pub fn new_with_seed(num_decks: usize, seed: u64) -> Result<Self, GameError> {
        let capacity = match num_decks.checked_mul(52) {
            Some(n) if (1..=MAX_DECKS).contains(&num_decks) => n,
            _ => return Err(GameError::InvalidDeckCount { num_decks }),
        };
        let mut shoe = Self {
            cards: Vec::with_capacity(capacity),
            num_decks,
            rng: ChaCha20Rng::seed_from_u64(seed),
            assign_suits: true,
            stack: None,
        };
        shoe.rebuild();
        Ok(shoe)
    }

    /// Builds a shoe that deals `cards` in the given order, first element first.
    /// Cards without a suit stay suitless. `num_decks` is the number of decks
    /// the stack would fill, rounded up.
    pub fn stacked(cards: Vec<Card>) -> Self {
        let mut order = cards;
        order.reverse();
        Self {
            num_decks: order.len().div_ceil(52),
            cards: order.clone(),
            rng: ChaCha20Rng::seed_from_u64(0),
            assign_suits: false,
            stack: Some(order),
        }
    }

    pub fn set_assign_suits(&mut self, on: bool) {
        self.assign_suits = on;
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Re-randomizes the remaining cards in place. Only valid between rounds.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Restores the full shoe and shuffles it.
    pub fn rebuild(&mut self) {
        if let Some(stack) = &self.stack {
            self.cards = stack.clone();
            return;
        }
        self.cards.clear();
        for _ in 0..self.num_decks {
            self.cards
                .extend(full_deck_ranks().into_iter().map(Card::new));
        }
        self.shuffle();
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let mut card = self.cards.pop().ok_or(GameError::EmptyShoe)?;
        if self.assign_suits && card.suit.is_none() {
            let suits = all_suits();
            card.suit = Some(suits[self.rng.random_range(0..suits.len())]);
        }
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.remaining() < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    #[test]
    fn zero_decks_is_rejected() {
        assert_eq!(
            Shoe::new_with_seed(0, 1).unwrap_err(),
            GameError::InvalidDeckCount { num_decks: 0 }
        );
    }

    #[test]
    fn stacked_shoe_deals_in_order_and_rebuilds_to_same_stack() {
        let mut shoe = Shoe::stacked(vec![Rank::Five.into(), Rank::King.into()]);
        assert_eq!(shoe.draw().unwrap().rank, Rank::Five);
        assert_eq!(shoe.draw().unwrap().rank, Rank::King);
        assert_eq!(shoe.draw(), Err(GameError::EmptyShoe));
        shoe.rebuild();
        assert_eq!(shoe.remaining(), 2);
        assert_eq!(shoe.draw().unwrap().rank, Rank::Five);
    }

    #[test]
    fn stacked_shoe_counts_the_decks_it_spans() {
        assert_eq!(Shoe::stacked(vec![Card::new(Rank::Ace); 3]).num_decks(), 1);
        assert_eq!(Shoe::stacked(vec![Card::new(Rank::Ace); 52]).num_decks(), 1);
        assert_eq!(Shoe::stacked(vec![Card::new(Rank::Ace); 53]).num_decks(), 2);
        assert_eq!(Shoe::stacked(Vec::new()).num_decks(), 0);
    }

    #[test]
    fn suits_are_attached_only_when_enabled() {
        let mut shoe = Shoe::new_with_seed(1, 3).unwrap();
        assert!(shoe.draw().unwrap().suit.is_some());
        shoe.set_assign_suits(false);
        assert!(shoe.draw().unwrap().suit.is_none());
    }
}
