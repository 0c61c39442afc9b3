use serde::{Deserialize, Serialize};

use crate::payout::{PayoutTable, TiePolicy};
use crate::shoe::{DEFAULT_DECKS, PENETRATION_THRESHOLD};

/// Table-level settings shared by every round of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRules {
    /// Number of 52-card decks in the shoe
    pub num_decks: usize,
    /// Remaining-card count below which the shoe is due for a rebuild
    pub penetration: usize,
    pub payouts: PayoutTable,
    /// Settlement of PLAYER/BANKER bets when the round ties
    pub tie_policy: TiePolicy,
    /// Rebuild the shoe before a round instead of dealing a last round
    pub auto_reshuffle: bool,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            num_decks: DEFAULT_DECKS,
            penetration: PENETRATION_THRESHOLD,
            payouts: PayoutTable::default(),
            tie_policy: TiePolicy::default(),
            auto_reshuffle: true,
        }
    }
}

impl TableRules {
    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    pub fn with_decks(mut self, num_decks: usize) -> Self {
        self.num_decks = num_decks;
        self
    }

    pub fn with_auto_reshuffle(mut self, on: bool) -> Self {
        self.auto_reshuffle = on;
        self
    }
}
