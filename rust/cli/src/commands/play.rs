//! # Play Command
//!
//! Interactive baccarat table driven by stdin.
//!
//! Each line is a bet (`player`, `banker`, `tie`, or `p`/`b`/`t`, with an
//! optional amount) or a table command (`amount X`, `balance`,
//! `history [N]`, `help`, `quit`). Stakes must be at least the table
//! minimum and no more than the player's balance. When the shoe runs below
//! the cut card it is replaced before the next deal and a notice is shown.
//! The session ends on `quit`, end of input, or when the player can no
//! longer cover the minimum bet.

use crate::cli::TableArgs;
use crate::error::CliError;
use crate::formatters::{format_balances, format_money, format_record_row, format_round};
use crate::io_utils::read_stdin_line;
use crate::session::{open_session, resolve_config};
use crate::ui;
use crate::validation::{ParseResult, TableCommand, parse_table_input, validate_stake};
use baccarat_engine::logger::RoundRecord;
use baccarat_engine::payout::Bet;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  player|banker|tie [amount]   bet on a side (short: p, b, t)
  amount X                     set the default bet
  balance                      show both balances
  history [N]                  show the last N rounds of this session
  quit                         leave the table";

/// Handle the play command: an interactive session.
///
/// # Arguments
///
/// * `table` - Seed, deck count, tie policy and logging flags
/// * `out` - Output stream for game display
/// * `err` - Error stream for rejected input and warnings
/// * `stdin` - Input stream for bets and commands
///
/// # Examples
///
/// ```
/// use baccarat_cli::cli::TableArgs;
/// use baccarat_cli::commands::handle_play_command;
/// use std::io::Cursor;
///
/// let table = TableArgs { seed: Some(42), no_log: true, ..TableArgs::default() };
/// let mut input = Cursor::new("banker\nquit\n");
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// handle_play_command(table, &mut out, &mut err, &mut input).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("Round 1:"));
/// ```
pub fn handle_play_command(
    table: TableArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = resolve_config(&table, None)?;
    let min_bet = cfg.min_bet;
    let mut default_amount = cfg.bet_amount;
    let mut session = open_session(cfg, table.no_log, true, err)?;

    writeln!(
        out,
        "play: decks={} seed={} min_bet={} tie={}",
        session.config.num_decks,
        session.seed,
        format_money(min_bet),
        session.config.tie_policy
    )?;
    if let Some(p) = &session.log_path {
        writeln!(out, "Logging to {}", p.display())?;
    }
    writeln!(out, "{}", format_balances(session.engine.bankroll()))?;
    writeln!(out, "Type help for commands")?;

    let mut history: Vec<RoundRecord> = Vec::new();
    loop {
        ui::prompt(out, &format!("bet [{}]> ", format_money(default_amount)))?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };
        if line.is_empty() {
            continue;
        }

        let cmd = match parse_table_input(&line) {
            ParseResult::Command(cmd) => cmd,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        match cmd {
            TableCommand::Help => writeln!(out, "{}", HELP)?,
            TableCommand::Balance => {
                writeln!(out, "{}", format_balances(session.engine.bankroll()))?
            }
            TableCommand::SetAmount(amount) => {
                match validate_stake(amount, min_bet, session.engine.bankroll().player_money()) {
                    Ok(()) => {
                        default_amount = amount;
                        writeln!(out, "Default bet set to {}", format_money(amount))?;
                    }
                    Err(msg) => ui::write_error(err, &msg)?,
                }
            }
            TableCommand::History(n) => {
                if history.is_empty() {
                    writeln!(out, "No rounds played yet")?;
                }
                let skip = history.len().saturating_sub(n);
                for rec in &history[skip..] {
                    writeln!(out, "{}", format_record_row(rec))?;
                }
            }
            TableCommand::Bet { bet_type, amount } => {
                let amount = amount.unwrap_or(default_amount);
                if let Err(msg) =
                    validate_stake(amount, min_bet, session.engine.bankroll().player_money())
                {
                    ui::write_error(err, &msg)?;
                    continue;
                }
                if session.engine.needs_reshuffle() {
                    ui::display_notice(
                        out,
                        &format!(
                            "Fewer than {} cards left: new shoe shuffled",
                            session.engine.rules().penetration
                        ),
                    )?;
                }

                let report = session.engine.play_round(Bet::new(bet_type, amount))?;
                for w in &report.warnings {
                    ui::display_warning(err, w)?;
                }
                writeln!(out, "{}", format_round(&report.result))?;
                writeln!(out, "{}", format_balances(session.engine.bankroll()))?;
                history.push(RoundRecord::from_round(
                    &report.result,
                    session.engine.bankroll(),
                ));

                if !session.engine.bankroll().can_cover(min_bet) {
                    writeln!(
                        out,
                        "Player cannot cover the minimum bet of {}; table closed",
                        format_money(min_bet)
                    )?;
                    break;
                }
            }
        }
    }

    writeln!(out, "Rounds played: {}", session.engine.rounds_played())?;
    writeln!(out, "{}", format_balances(session.engine.bankroll()))?;
    Ok(())
}
