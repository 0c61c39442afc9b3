//! Builds a playing session from configuration and table flags.

use crate::cli::TableArgs;
use crate::config::{self, Config, Overrides};
use crate::error::CliError;
use crate::ui;
use baccarat_engine::engine::Engine;
use baccarat_engine::logger::{CsvRoundLogger, NullRoundLogger, RoundLogger};
use baccarat_engine::payout::Money;
use std::io::Write;
use std::path::PathBuf;

pub type TableEngine = Engine<Box<dyn RoundLogger>>;

pub struct Session {
    pub engine: TableEngine,
    pub config: Config,
    /// Seed the shoe was built from, echoed so a run can be repeated
    pub seed: u64,
    pub log_path: Option<PathBuf>,
}

/// Loads the layered config and applies the command-line values on top.
pub fn resolve_config(table: &TableArgs, bet_amount: Option<Money>) -> Result<Config, CliError> {
    let mut resolved = config::load_with_sources()?;
    resolved.apply_overrides(&Overrides {
        seed: table.seed,
        num_decks: table.decks,
        tie_policy: table.tie_policy.map(Into::into),
        log_dir: table.log_dir.clone(),
        bet_amount,
    })?;
    Ok(resolved.config)
}

/// Opens the shoe, bankroll and round log for `cfg`.
///
/// A log that cannot be opened is reported as a warning and the session
/// continues without one.
pub fn open_session(
    cfg: Config,
    no_log: bool,
    auto_reshuffle: bool,
    err: &mut dyn Write,
) -> Result<Session, CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut log_path = None;
    let logger: Box<dyn RoundLogger> = if no_log {
        Box::new(NullRoundLogger)
    } else {
        match CsvRoundLogger::open_daily(&cfg.log_dir) {
            Ok(l) => {
                log_path = Some(l.path().to_path_buf());
                Box::new(l)
            }
            Err(e) => {
                ui::display_warning(
                    err,
                    &format!("cannot open round log in {}: {}; not logging", cfg.log_dir, e),
                )?;
                Box::new(NullRoundLogger)
            }
        }
    };
    let rules = cfg.table_rules().with_auto_reshuffle(auto_reshuffle);
    let engine = Engine::new(rules, cfg.bankroll(), Some(seed), logger)?;
    Ok(Session {
        engine,
        config: cfg,
        seed,
        log_path,
    })
}
