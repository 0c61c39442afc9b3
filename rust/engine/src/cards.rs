use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// One of the four suits. Suits are display metadata only and never
/// influence scoring or the drawing rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades (♠)
    Spades,
    /// Hearts (♥)
    Hearts,
    /// Clubs (♣)
    Clubs,
    /// Diamonds (♦)
    Diamonds,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }

    pub fn from_symbol(c: char) -> Option<Suit> {
        match c {
            '♠' => Some(Suit::Spades),
            '♥' => Some(Suit::Hearts),
            '♣' => Some(Suit::Clubs),
            '♦' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// The thirteen rank symbols of a standard deck.
/// Baccarat point values are given by [`Rank::point_value`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1 point)
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    /// Ten (0 points)
    Ten,
    /// Jack (0 points)
    Jack,
    /// Queen (0 points)
    Queen,
    /// King (0 points)
    King,
}

impl Rank {
    /// Baccarat value of the rank: A=1, 2-9 face value, 10/J/Q/K=0.
    pub fn point_value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rank {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_ranks()
            .into_iter()
            .find(|r| r.symbol() == s)
            .ok_or_else(|| GameError::InvalidCard(s.to_string()))
    }
}

/// A card as dealt from the shoe. The suit is optional because the shoe
/// only tracks ranks; suits are attached at draw time for display.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    #[serde(default)]
    pub suit: Option<Suit>,
}

impl Card {
    pub fn new(rank: Rank) -> Self {
        Self { rank, suit: None }
    }

    pub fn with_suit(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub fn point_value(&self) -> u8 {
        self.rank.point_value()
    }
}

impl From<Rank> for Card {
    fn from(rank: Rank) -> Self {
        Card::new(rank)
    }
}

/// Renders as `<suit><rank>`, e.g. `♠10`; the suit is omitted when unset.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.suit {
            write!(f, "{}", s.symbol())?;
        }
        write!(f, "{}", self.rank)
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) => match Suit::from_symbol(c) {
                Some(suit) => Ok(Card::with_suit(chars.as_str().parse()?, suit)),
                None => Ok(Card::new(s.parse()?)),
            },
            None => Err(GameError::InvalidCard(s.to_string())),
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// Ranks of one 52-card deck: every rank four times.
pub fn full_deck_ranks() -> Vec<Rank> {
    let mut v = Vec::with_capacity(52);
    for &r in &all_ranks() {
        for _ in 0..4 {
            v.push(r);
        }
    }
    v
}
