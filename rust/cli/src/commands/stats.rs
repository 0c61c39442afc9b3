//! Statistics aggregation over a round log.
//!
//! Reads a CSV round log and reports rounds played, wins per side,
//! naturals and net results per bet type, followed by the final balances.
//! Consecutive rows are also checked against each other: the player's
//! balance must move by exactly the logged payout.

use crate::error::CliError;
use crate::io_utils::resolve_log_input;
use crate::ui;
use baccarat_engine::logger::{RoundRecord, read_log};
use baccarat_engine::payout::{BetType, Money, Winner};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

const BALANCE_EPSILON: Money = 1e-6;

/// Per bet type results.
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub(crate) struct BetSummary {
    pub bets: usize,
    pub won: usize,
    pub pushed: usize,
    pub lost: usize,
    pub staked: Money,
    pub net: Money,
}

/// Running totals shared by `sim` and `stats`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Tally {
    pub rounds: usize,
    pub wins: BTreeMap<&'static str, usize>,
    pub naturals: usize,
    pub net_payout: Money,
    pub by_bet: BTreeMap<&'static str, BetSummary>,
}

impl Default for Tally {
    fn default() -> Self {
        let sides = [BetType::Player, BetType::Banker, BetType::Tie];
        Self {
            rounds: 0,
            wins: sides.iter().map(|s| (s.as_str(), 0)).collect(),
            naturals: 0,
            net_payout: 0.0,
            by_bet: BTreeMap::new(),
        }
    }
}

impl Tally {
    pub fn record(
        &mut self,
        bet_type: BetType,
        amount: Money,
        winner: Winner,
        payout: Money,
        natural: bool,
    ) {
        self.rounds += 1;
        *self.wins.entry(winner.as_str()).or_insert(0) += 1;
        if natural {
            self.naturals += 1;
        }
        self.net_payout += payout;

        let b = self.by_bet.entry(bet_type.as_str()).or_default();
        b.bets += 1;
        b.staked += amount;
        b.net += payout;
        if payout > 0.0 {
            b.won += 1;
        } else if payout < 0.0 {
            b.lost += 1;
        } else {
            b.pushed += 1;
        }
    }

    pub fn record_row(&mut self, rec: &RoundRecord) {
        self.record(rec.bet_type, rec.bet_amount, rec.winner, rec.payout, rec.natural);
    }
}

/// Aggregates a round log and prints a JSON summary.
///
/// # Returns
///
/// `Err` when the log cannot be read, holds no rounds, or its balances do
/// not follow the logged payouts. The summary is still printed in the last
/// case.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = resolve_log_input(&input)?;
    let records = read_log(&path)?;
    if records.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no rounds in {}",
            path.display()
        )));
    }

    let mut tally = Tally::default();
    let mut last_rounds = 0usize;
    let mut ledger_ok = true;
    let mut prev: Option<&RoundRecord> = None;
    for rec in &records {
        tally.record_row(rec);
        if rec.last_round {
            last_rounds += 1;
        }
        if let Some(p) = prev
            && rec.round == p.round + 1
        {
            // casino_delta is always -player_delta; commission reaches neither side
            if (p.player_money + rec.payout - rec.player_money).abs() > BALANCE_EPSILON {
                ledger_ok = false;
                ui::write_error(
                    err,
                    &format!(
                        "Balance mismatch at round {}: {} {:+} != {}",
                        rec.round, p.player_money, rec.payout, rec.player_money
                    ),
                )?;
            }
            if (p.casino_money - rec.payout - rec.casino_money).abs() > BALANCE_EPSILON {
                ledger_ok = false;
                ui::write_error(
                    err,
                    &format!(
                        "Casino balance mismatch at round {}: {} {:+} != {}",
                        rec.round, p.casino_money, -rec.payout, rec.casino_money
                    ),
                )?;
            }
        }
        prev = Some(rec);
    }

    // records is non-empty, checked above
    let last = &records[records.len() - 1];
    let summary = serde_json::json!({
        "file": path.display().to_string(),
        "rounds": tally.rounds,
        "wins": tally.wins,
        "naturals": tally.naturals,
        "last_rounds": last_rounds,
        "net_payout": tally.net_payout,
        "by_bet": tally.by_bet,
        "player_money": last.player_money,
        "casino_money": last.casino_money,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if ledger_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}
