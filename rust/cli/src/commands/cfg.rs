//! Configuration command handler.
//!
//! Prints the resolved configuration with the layer each value came from
//! (default, file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "num_decks": {
//!     "value": 8,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;

    let display = serde_json::json!({
        "num_decks": {
            "value": config.num_decks,
            "source": sources.num_decks,
        },
        "player_money": {
            "value": config.player_money,
            "source": sources.player_money,
        },
        "casino_money": {
            "value": config.casino_money,
            "source": sources.casino_money,
        },
        "min_bet": {
            "value": config.min_bet,
            "source": sources.min_bet,
        },
        "bet_amount": {
            "value": config.bet_amount,
            "source": sources.bet_amount,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "tie_policy": {
            "value": config.tie_policy,
            "source": sources.tie_policy,
        },
        "log_dir": {
            "value": config.log_dir,
            "source": sources.log_dir,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
