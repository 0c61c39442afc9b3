use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{card_value, Hand};
use crate::payout::{Bet, BetType, Winner};

/// True when either side's two dealt cards score 8 or 9.
///
/// Only the first two cards of each hand are considered, so calling this
/// after a third card has been added still answers for the deal.
pub fn is_natural(player: &Hand, banker: &Hand) -> bool {
    is_natural_score(player.initial_score()) || is_natural_score(banker.initial_score())
}

pub fn is_natural_score(score: u8) -> bool {
    score == 8 || score == 9
}

/// Player draws on a two-card total of 0-5 and stands on 6 or 7.
pub fn should_player_draw(player: &Hand) -> bool {
    player_draws(player.initial_score())
}

pub fn player_draws(score: u8) -> bool {
    score <= 5
}

/// Banker third-card decision. `player_third` is the card the player drew,
/// or `None` when the player stood.
pub fn should_banker_draw(banker: &Hand, player_third: Option<&Card>) -> bool {
    banker_draws(banker.initial_score(), player_third.map(card_value))
}

/// Banker drawing table keyed on the banker's two-card score and the point
/// value of the player's third card.
///
/// # Examples
///
/// ```
/// use baccarat_engine::rules::banker_draws;
///
/// assert!(banker_draws(5, None));
/// assert!(!banker_draws(3, Some(8)));
/// assert!(banker_draws(6, Some(7)));
/// ```
pub fn banker_draws(banker_score: u8, player_third_value: Option<u8>) -> bool {
    let Some(v) = player_third_value else {
        return banker_score <= 5;
    };
    match banker_score {
        0..=2 => true,
        3 => v != 8,
        4 => (2..=7).contains(&v),
        5 => (4..=7).contains(&v),
        6 => v == 6 || v == 7,
        _ => false,
    }
}

/// Higher final score wins; equal scores tie.
pub fn determine_winner(player_score: u8, banker_score: u8) -> Winner {
    use std::cmp::Ordering;
    match player_score.cmp(&banker_score) {
        Ordering::Greater => BetType::Player,
        Ordering::Less => BetType::Banker,
        Ordering::Equal => BetType::Tie,
    }
}

/// Rejects non-positive or non-finite stakes before any card is dealt.
///
/// Whether the player can afford the bet is left to the caller.
///
/// ```
/// use baccarat_engine::errors::GameError;
/// use baccarat_engine::payout::{Bet, BetType};
/// use baccarat_engine::rules::validate_bet;
///
/// assert!(validate_bet(&Bet::new(BetType::Tie, 100.0)).is_ok());
/// assert!(matches!(
///     validate_bet(&Bet::new(BetType::Player, 0.0)),
///     Err(GameError::InvalidBetAmount { .. })
/// ));
/// ```
pub fn validate_bet(bet: &Bet) -> Result<(), GameError> {
    if !bet.amount.is_finite() || bet.amount <= 0.0 {
        return Err(GameError::InvalidBetAmount { amount: bet.amount });
    }
    Ok(())
}
