//! Batch simulation: a fixed bet played round after round.
//!
//! The run stops at the requested number of rounds, when the player can
//! no longer cover the stake, or with `--until-shoe-end` after the round
//! dealt from a shoe below the cut card. Without `--until-shoe-end` the
//! shoe is rebuilt automatically. A JSON summary closes the output.
//!
//! # Environment Variables
//!
//! - `BACCARAT_SIM_BREAK_AFTER`: stop after N rounds as if interrupted (for testing)

use crate::cli::TableArgs;
use crate::commands::stats::Tally;
use crate::error::CliError;
use crate::formatters::{format_money, format_round};
use crate::session::{open_session, resolve_config};
use crate::ui;
use baccarat_engine::errors::GameError;
use baccarat_engine::payout::{Bet, BetType, Money};
use std::io::Write;

pub const BREAK_AFTER_ENV: &str = "BACCARAT_SIM_BREAK_AFTER";

/// Why a simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Completed,
    Bankrupt,
    ShoeEnd,
    ShoeExhausted,
}

impl StopReason {
    fn as_str(self) -> &'static str {
        match self {
            StopReason::Completed => "completed",
            StopReason::Bankrupt => "bankrupt",
            StopReason::ShoeEnd => "shoe_end",
            StopReason::ShoeExhausted => "shoe_exhausted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub rounds: u32,
    pub bet: BetType,
    /// Stake per round; the configured `bet_amount` when `None`
    pub amount: Option<Money>,
    pub until_shoe_end: bool,
    pub quiet: bool,
    pub table: TableArgs,
}

/// Handle the sim command.
///
/// # Returns
///
/// `Ok(())` when the run ends normally (including bankruptcy and shoe end),
/// `CliError::Interrupted` when stopped by `BACCARAT_SIM_BREAK_AFTER`, and
/// other errors for bad arguments or configuration.
pub fn handle_sim_command(
    opts: SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.rounds == 0 {
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let cfg = resolve_config(&opts.table, opts.amount)?;
    let amount = cfg.bet_amount;
    let mut session = open_session(cfg, opts.table.no_log, !opts.until_shoe_end, err)?;

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok());

    writeln!(
        out,
        "sim: rounds={} bet={} amount={} seed={} decks={} tie={}",
        opts.rounds,
        opts.bet,
        format_money(amount),
        session.seed,
        session.config.num_decks,
        session.config.tie_policy
    )?;
    if let Some(p) = &session.log_path {
        writeln!(out, "Logging to {}", p.display())?;
    }

    let mut tally = Tally::default();
    let mut commission: Money = 0.0;
    let mut stop = StopReason::Completed;
    for _ in 0..opts.rounds {
        if !session.engine.bankroll().can_cover(amount) {
            writeln!(
                out,
                "Player cannot cover a bet of {} with {}",
                format_money(amount),
                format_money(session.engine.bankroll().player_money())
            )?;
            stop = StopReason::Bankrupt;
            break;
        }
        if !opts.quiet && !opts.until_shoe_end && session.engine.needs_reshuffle() {
            ui::display_notice(out, "Shoe reshuffled")?;
        }

        let report = match session.engine.play_round(Bet::new(opts.bet, amount)) {
            Ok(r) => r,
            Err(GameError::EmptyShoe) if opts.until_shoe_end => {
                stop = StopReason::ShoeExhausted;
                break;
            }
            Err(e) => return Err(e.into()),
        };
        for w in &report.warnings {
            ui::display_warning(err, w)?;
        }

        let result = &report.result;
        if !opts.quiet {
            writeln!(out, "{}", format_round(result))?;
        }
        tally.record(
            result.bet().bet_type,
            result.bet().amount,
            result.winner(),
            result.payout(),
            result.is_natural(),
        );
        commission += result.settlement().commission;

        if opts.until_shoe_end && result.is_last_round() {
            stop = StopReason::ShoeEnd;
            break;
        }
        if let Some(b) = break_after
            && tally.rounds == b
        {
            writeln!(out, "Interrupted: played {}/{}", tally.rounds, opts.rounds)?;
            return Err(CliError::Interrupted(format!(
                "played {}/{}",
                tally.rounds, opts.rounds
            )));
        }
    }

    let bankroll = session.engine.bankroll();
    let summary = serde_json::json!({
        "rounds": tally.rounds,
        "stopped": stop.as_str(),
        "seed": session.seed,
        "wins": tally.wins,
        "naturals": tally.naturals,
        "net_payout": tally.net_payout,
        "commission": commission,
        "player_money": bankroll.player_money(),
        "casino_money": bankroll.casino_money(),
        "cards_remaining": session.engine.shoe().remaining(),
    });
    let json_output = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}
