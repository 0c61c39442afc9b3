//! # baccarat-engine: Punto Banco Simulation Core
//!
//! A single-shoe baccarat engine: shoe management, the fixed third-card
//! drawing rules, scoring, winner determination and bet settlement against
//! a two-sided bankroll, with every settled round handed to a pluggable
//! round logger.
//!
//! ## Core Modules
//!
//! - [`cards`] - Rank and suit model, baccarat point values
//! - [`shoe`] - Multi-deck shoe with seeded ChaCha20 shuffling
//! - [`hand`] - Hands and modulo-10 scoring
//! - [`rules`] - Natural check, player/banker drawing table, winner, bet validation
//! - [`payout`] - Bet types, payout table, tie policy and settlement
//! - [`bankroll`] - Player and casino balances
//! - [`game`] - Table rules shared across rounds
//! - [`engine`] - Round orchestration and the playing session
//! - [`logger`] - Round logger trait, CSV and in-memory sinks
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use baccarat_engine::bankroll::Bankroll;
//! use baccarat_engine::engine::Engine;
//! use baccarat_engine::game::TableRules;
//! use baccarat_engine::logger::NullRoundLogger;
//! use baccarat_engine::payout::{Bet, BetType};
//!
//! let mut engine = Engine::new(TableRules::default(), Bankroll::default(), Some(42), NullRoundLogger)
//!     .expect("valid rules");
//! let report = engine.play_round(Bet::new(BetType::Player, 1000.0)).unwrap();
//! println!(
//!     "{} {} vs {} {} -> {}",
//!     report.result.player_hand(),
//!     report.result.player_score(),
//!     report.result.banker_hand(),
//!     report.result.banker_score(),
//!     report.result.winner()
//! );
//! ```
//!
//! ## Deterministic Play
//!
//! Shoes seeded with the same value deal the same cards:
//!
//! ```rust
//! use baccarat_engine::shoe::Shoe;
//!
//! let mut a = Shoe::new_with_seed(8, 42).unwrap();
//! let mut b = Shoe::new_with_seed(8, 42).unwrap();
//! assert_eq!(a.draw().unwrap(), b.draw().unwrap());
//! ```

pub mod bankroll;
pub mod cards;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod payout;
pub mod rules;
pub mod shoe;
