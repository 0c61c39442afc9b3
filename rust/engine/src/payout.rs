use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Money amounts. Banker wins pay a fractional rate, so balances are not integral.
pub type Money = f64;

/// The three wagers on offer. Also used as the round verdict.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetType {
    Player,
    Banker,
    Tie,
}

/// Round verdict; shares its values with [`BetType`] so bets compare directly.
pub type Winner = BetType;

impl BetType {
    pub fn as_str(self) -> &'static str {
        match self {
            BetType::Player => "PLAYER",
            BetType::Banker => "BANKER",
            BetType::Tie => "TIE",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLAYER" | "P" => Ok(BetType::Player),
            "BANKER" | "B" => Ok(BetType::Banker),
            "TIE" | "T" => Ok(BetType::Tie),
            _ => Err(GameError::InvalidBetType(s.to_string())),
        }
    }
}

/// A wager placed on a single round.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub bet_type: BetType,
    pub amount: Money,
}

impl Bet {
    pub fn new(bet_type: BetType, amount: Money) -> Self {
        Self { bet_type, amount }
    }
}

/// How a PLAYER or BANKER bet settles when the round ends in a tie.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// Stake is returned, net change zero.
    #[default]
    Push,
    /// Stake is lost like any other losing bet.
    Lose,
}

impl FromStr for TiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "push" => Ok(TiePolicy::Push),
            "lose" | "loss" => Ok(TiePolicy::Lose),
            other => Err(format!("unknown tie policy: {}", other)),
        }
    }
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiePolicy::Push => f.write_str("push"),
            TiePolicy::Lose => f.write_str("lose"),
        }
    }
}

/// Win multipliers applied to the stake.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutTable {
    pub player: f64,
    /// 0.95 by default: a 5% commission on banker wins
    pub banker: f64,
    pub tie: f64,
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            player: 1.0,
            banker: 0.95,
            tie: 8.0,
        }
    }
}

impl PayoutTable {
    pub fn rate(&self, bet_type: BetType) -> f64 {
        match bet_type {
            BetType::Player => self.player,
            BetType::Banker => self.banker,
            BetType::Tie => self.tie,
        }
    }
}

/// Signed money movement for one round.
///
/// `player_delta` and `casino_delta` are always equal and opposite. On a
/// winning BANKER bet the casino is debited the reduced payout, and the
/// withheld `commission` is reported here but credited to neither ledger.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub player_delta: Money,
    pub casino_delta: Money,
    pub commission: Money,
}

impl Settlement {
    fn transfer(player_delta: Money) -> Self {
        Self {
            player_delta,
            casino_delta: 0.0 - player_delta,
            commission: 0.0,
        }
    }
}

/// Converts a verdict and a bet into ledger deltas.
///
/// # Examples
///
/// ```
/// use baccarat_engine::payout::{calculate_payout, Bet, BetType, PayoutTable, TiePolicy};
///
/// let table = PayoutTable::default();
/// let s = calculate_payout(BetType::Banker, &Bet::new(BetType::Banker, 1000.0), &table, TiePolicy::Push);
/// assert_eq!(s.player_delta, 950.0);
/// assert_eq!(s.casino_delta, -950.0);
/// assert_eq!(s.commission, 50.0);
/// ```
pub fn calculate_payout(
    winner: Winner,
    bet: &Bet,
    table: &PayoutTable,
    tie_policy: TiePolicy,
) -> Settlement {
    let stake = bet.amount;
    if winner == bet.bet_type {
        let win = stake * table.rate(bet.bet_type);
        let mut s = Settlement::transfer(win);
        if bet.bet_type == BetType::Banker && table.banker < 1.0 {
            s.commission = stake - win;
        }
        return s;
    }
    match (winner, tie_policy) {
        (BetType::Tie, TiePolicy::Push) => Settlement::transfer(0.0),
        _ => Settlement::transfer(-stake),
    }
}
