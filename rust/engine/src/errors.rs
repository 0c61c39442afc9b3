use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("Shoe is empty")]
    EmptyShoe,
    #[error("Invalid deck count: {num_decks}, expected 1 to {max}", max = crate::shoe::MAX_DECKS)]
    InvalidDeckCount { num_decks: usize },
    #[error("Invalid bet amount: {amount}")]
    InvalidBetAmount { amount: f64 },
    #[error("Invalid bet type: {0}")]
    InvalidBetType(String),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Hand already has {0} cards")]
    HandFull(usize),
}
