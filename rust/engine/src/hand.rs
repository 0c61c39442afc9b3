use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// A side never holds more than two dealt cards plus one drawn card.
pub const MAX_HAND_SIZE: usize = 3;

/// Baccarat value of a single card: A=1, 2-9 face value, 10/J/Q/K=0.
pub fn card_value(card: &Card) -> u8 {
    card.point_value()
}

/// Sum of card values modulo 10. Always in `0..=9`.
///
/// # Examples
///
/// ```
/// use baccarat_engine::cards::{Card, Rank};
/// use baccarat_engine::hand::hand_score;
///
/// let cards = [Card::new(Rank::Seven), Card::new(Rank::Six)];
/// assert_eq!(hand_score(&cards), 3);
/// ```
pub fn hand_score(cards: &[Card]) -> u8 {
    let total: u32 = cards.iter().map(|c| u32::from(card_value(c))).sum();
    (total % 10) as u8
}

/// The cards held by one side (player or banker) during a single round.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HandRepr")]
pub struct Hand {
    cards: Vec<Card>,
}

/// Unchecked wire form of [`Hand`]; deserialized hands go through `from_cards`.
#[derive(Deserialize)]
struct HandRepr {
    cards: Vec<Card>,
}

impl TryFrom<HandRepr> for Hand {
    type Error = GameError;

    fn try_from(repr: HandRepr) -> Result<Self, Self::Error> {
        Hand::from_cards(repr.cards)
    }
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_HAND_SIZE),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Result<Self, GameError> {
        if cards.len() > MAX_HAND_SIZE {
            return Err(GameError::HandFull(cards.len()));
        }
        Ok(Self { cards })
    }

    pub fn push(&mut self, card: Card) -> Result<(), GameError> {
        if self.cards.len() >= MAX_HAND_SIZE {
            return Err(GameError::HandFull(self.cards.len()));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u8 {
        hand_score(&self.cards)
    }

    /// Score of the two dealt cards, ignoring any third card.
    pub fn initial_score(&self) -> u8 {
        hand_score(&self.cards[..self.cards.len().min(2)])
    }

    pub fn third_card(&self) -> Option<Card> {
        self.cards.get(2).copied()
    }
}

/// Space-joined `<suit><rank>` tokens, the form used in the round log.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::new(r)).collect()).unwrap()
    }

    #[test]
    fn initial_score_ignores_third_card() {
        let h = hand(&[Rank::Four, Rank::Four, Rank::Five]);
        assert_eq!(h.initial_score(), 8);
        assert_eq!(h.score(), 3);
        assert_eq!(h.third_card(), Some(Card::new(Rank::Five)));
    }

    #[test]
    fn fourth_card_is_rejected() {
        let mut h = hand(&[Rank::Ace, Rank::Two, Rank::Three]);
        assert_eq!(h.push(Card::new(Rank::Four)), Err(GameError::HandFull(3)));
    }

    #[test]
    fn display_joins_tokens_with_spaces() {
        let h = Hand::from_cards(vec![
            Card::with_suit(Rank::Ace, Suit::Spades),
            Card::new(Rank::Ten),
        ])
        .unwrap();
        assert_eq!(h.to_string(), "♠A 10");
    }

    #[test]
    fn deserialized_hands_respect_the_size_limit() {
        let h = hand(&[Rank::Ace, Rank::Two, Rank::Three]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(serde_json::from_str::<Hand>(&json).unwrap(), h);

        let mut four = serde_json::to_value(&h).unwrap();
        four["cards"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::to_value(Card::new(Rank::Four)).unwrap());
        let e = serde_json::from_value::<Hand>(four).unwrap_err();
        assert!(e.to_string().contains("Hand already has 4 cards"), "{e}");
    }
}
