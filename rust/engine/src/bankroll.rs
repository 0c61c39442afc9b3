use serde::{Deserialize, Serialize};

use crate::payout::{Money, Settlement};

/// Default opening balance for each side of a session.
pub const STARTING_MONEY: Money = 100_000.0;

/// Running balances of the bettor and the house for one playing session.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bankroll {
    player_money: Money,
    casino_money: Money,
}

impl Default for Bankroll {
    fn default() -> Self {
        Self::new(STARTING_MONEY, STARTING_MONEY)
    }
}

impl Bankroll {
    pub fn new(player_money: Money, casino_money: Money) -> Self {
        Self {
            player_money,
            casino_money,
        }
    }

    pub fn player_money(&self) -> Money {
        self.player_money
    }

    pub fn casino_money(&self) -> Money {
        self.casino_money
    }

    pub fn can_cover(&self, amount: Money) -> bool {
        amount <= self.player_money
    }

    /// Applies one round's deltas to both ledgers.
    pub fn apply(&mut self, settlement: &Settlement) {
        self.player_money += settlement.player_delta;
        self.casino_money += settlement.casino_delta;
    }
}
