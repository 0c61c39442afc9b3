//! Command-line argument definitions.

use baccarat_engine::payout::{BetType, TiePolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "baccarat",
    version,
    about = "Punto banco baccarat simulator and table"
)]
pub struct BaccaratCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds interactively, reading bets from stdin
    Play {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Play a batch of rounds with a fixed bet
    Sim {
        /// Number of rounds to play
        #[arg(long, default_value_t = 100)]
        rounds: u32,
        #[arg(long, value_enum, default_value_t = BetSide::Player)]
        bet: BetSide,
        /// Stake per round (defaults to the configured bet_amount)
        #[arg(long)]
        amount: Option<f64>,
        /// Stop after the round dealt from a shoe below the cut card
        #[arg(long)]
        until_shoe_end: bool,
        /// Print only the JSON summary
        #[arg(long)]
        quiet: bool,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Print rounds recorded in a log file
    History {
        /// Log file, or a directory holding daily logs
        #[arg(long)]
        input: String,
        #[arg(long, default_value_t = 10, conflicts_with = "all")]
        last: usize,
        #[arg(long)]
        all: bool,
    },
    /// Aggregate a log file
    Stats {
        /// Log file, or a directory holding daily logs
        #[arg(long)]
        input: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Flags shared by the commands that deal rounds.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of decks in the shoe
    #[arg(long)]
    pub decks: Option<usize>,
    #[arg(long, value_enum)]
    pub tie_policy: Option<TiePolicyArg>,
    /// Directory for the daily round log
    #[arg(long, conflicts_with = "no_log")]
    pub log_dir: Option<String>,
    /// Do not write a round log
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BetSide {
    Player,
    Banker,
    Tie,
}

impl From<BetSide> for BetType {
    fn from(side: BetSide) -> Self {
        match side {
            BetSide::Player => BetType::Player,
            BetSide::Banker => BetType::Banker,
            BetSide::Tie => BetType::Tie,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TiePolicyArg {
    /// PLAYER/BANKER stakes are returned on a tie
    Push,
    /// PLAYER/BANKER stakes are lost on a tie
    Lose,
}

impl From<TiePolicyArg> for TiePolicy {
    fn from(arg: TiePolicyArg) -> Self {
        match arg {
            TiePolicyArg::Push => TiePolicy::Push,
            TiePolicyArg::Lose => TiePolicy::Lose,
        }
    }
}
