use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bankroll::Bankroll;
use crate::cards::Card;
use crate::errors::GameError;
use crate::game::TableRules;
use crate::hand::Hand;
use crate::logger::RoundLogger;
use crate::payout::{calculate_payout, Bet, Money, Settlement, Winner};
use crate::rules::{
    determine_winner, is_natural, should_banker_draw, should_player_draw, validate_bet,
};
use crate::shoe::Shoe;

/// Stages a round passes through. A natural jumps from
/// `NaturalCheck` straight to `Settled`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum RoundPhase {
    /// Two cards each, dealt player, banker, player, banker
    Dealt,
    NaturalCheck,
    PlayerDraw,
    BankerDraw,
    Settled,
}

/// Outcome of one settled round. Built once by [`play_round`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    round_no: u32,
    bet: Bet,
    player_hand: Hand,
    banker_hand: Hand,
    player_score: u8,
    banker_score: u8,
    winner: Winner,
    settlement: Settlement,
    natural: bool,
    last_round: bool,
}

impl RoundResult {
    pub fn round_no(&self) -> u32 {
        self.round_no
    }
    pub fn bet(&self) -> &Bet {
        &self.bet
    }
    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }
    pub fn banker_hand(&self) -> &Hand {
        &self.banker_hand
    }
    pub fn player_score(&self) -> u8 {
        self.player_score
    }
    pub fn banker_score(&self) -> u8 {
        self.banker_score
    }
    pub fn winner(&self) -> Winner {
        self.winner
    }
    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }
    /// Signed change to the bettor's balance.
    pub fn payout(&self) -> Money {
        self.settlement.player_delta
    }
    pub fn is_natural(&self) -> bool {
        self.natural
    }
    /// The round was dealt from a shoe already below the penetration threshold.
    pub fn is_last_round(&self) -> bool {
        self.last_round
    }
    pub fn player_third_card(&self) -> Option<Card> {
        self.player_hand.third_card()
    }
}

/// A settled round plus any non-fatal problems met while recording it.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub result: RoundResult,
    pub warnings: Vec<String>,
}

struct Round {
    player: Hand,
    banker: Hand,
    phase: RoundPhase,
}

impl Round {
    fn deal(shoe: &mut Shoe) -> Result<Self, GameError> {
        let mut player = Hand::new();
        let mut banker = Hand::new();
        for _ in 0..2 {
            player.push(shoe.draw()?)?;
            banker.push(shoe.draw()?)?;
        }
        Ok(Self {
            player,
            banker,
            phase: RoundPhase::Dealt,
        })
    }

    fn advance(&mut self, next: RoundPhase) {
        debug!(from = ?self.phase, to = ?next, "round phase");
        self.phase = next;
    }
}

/// Plays one complete round from `shoe` and settles `bet` against `bankroll`.
///
/// The bet is validated before any card is dealt. Running out of cards
/// mid-round aborts with [`GameError::EmptyShoe`] and leaves the bankroll
/// untouched. Logger failures are returned as warnings after settlement.
///
/// # Examples
///
/// ```
/// use baccarat_engine::bankroll::Bankroll;
/// use baccarat_engine::cards::{Card, Rank};
/// use baccarat_engine::engine::play_round;
/// use baccarat_engine::game::TableRules;
/// use baccarat_engine::logger::NullRoundLogger;
/// use baccarat_engine::payout::{Bet, BetType};
/// use baccarat_engine::shoe::Shoe;
///
/// // player 5,3 / banker 2,2: player natural 8
/// let ranks = [Rank::Five, Rank::Two, Rank::Three, Rank::Two];
/// let mut shoe = Shoe::stacked(ranks.iter().map(|&r| Card::new(r)).collect());
/// let mut bankroll = Bankroll::new(10_000.0, 10_000.0);
/// let report = play_round(
///     1,
///     &mut shoe,
///     Bet::new(BetType::Player, 1000.0),
///     &mut bankroll,
///     &TableRules::default(),
///     &mut NullRoundLogger,
/// )
/// .unwrap();
/// assert!(report.result.is_natural());
/// assert_eq!(bankroll.player_money(), 11_000.0);
/// ```
pub fn play_round(
    round_no: u32,
    shoe: &mut Shoe,
    bet: Bet,
    bankroll: &mut Bankroll,
    rules: &TableRules,
    logger: &mut dyn RoundLogger,
) -> Result<RoundReport, GameError> {
    validate_bet(&bet)?;
    let last_round = shoe.needs_reshuffle(rules.penetration);

    let mut round = Round::deal(shoe)?;
    round.advance(RoundPhase::NaturalCheck);
    let natural = is_natural(&round.player, &round.banker);

    if !natural {
        round.advance(RoundPhase::PlayerDraw);
        let mut player_third = None;
        if should_player_draw(&round.player) {
            let c = shoe.draw()?;
            round.player.push(c)?;
            player_third = Some(c);
        }

        round.advance(RoundPhase::BankerDraw);
        if should_banker_draw(&round.banker, player_third.as_ref()) {
            round.banker.push(shoe.draw()?)?;
        }
    }
    round.advance(RoundPhase::Settled);

    let player_score = round.player.score();
    let banker_score = round.banker.score();
    let winner = determine_winner(player_score, banker_score);
    let settlement = calculate_payout(winner, &bet, &rules.payouts, rules.tie_policy);
    bankroll.apply(&settlement);

    let result = RoundResult {
        round_no,
        bet,
        player_hand: round.player,
        banker_hand: round.banker,
        player_score,
        banker_score,
        winner,
        settlement,
        natural,
        last_round,
    };
    info!(
        round = round_no,
        winner = %winner,
        player_score,
        banker_score,
        payout = settlement.player_delta,
        natural,
        "round settled"
    );

    let mut warnings = Vec::new();
    if let Err(e) = logger.record_round(&result, bankroll) {
        warn!(round = round_no, error = %e, "failed to record round");
        warnings.push(format!("round {} was not logged: {}", round_no, e));
    }
    Ok(RoundReport { result, warnings })
}

/// A playing session: one shoe, one bankroll and one round logger, with
/// rounds numbered from 1.
///
/// # Examples
///
/// ```
/// use baccarat_engine::bankroll::Bankroll;
/// use baccarat_engine::engine::Engine;
/// use baccarat_engine::game::TableRules;
/// use baccarat_engine::logger::MemoryRoundLogger;
/// use baccarat_engine::payout::{Bet, BetType};
///
/// let mut engine = Engine::new(
///     TableRules::default(),
///     Bankroll::default(),
///     Some(7),
///     MemoryRoundLogger::new(),
/// )
/// .unwrap();
/// let report = engine.play_round(Bet::new(BetType::Banker, 1000.0)).unwrap();
/// assert_eq!(report.result.round_no(), 1);
/// assert_eq!(engine.logger().records().len(), 1);
/// ```
#[derive(Debug)]
pub struct Engine<L: RoundLogger> {
    shoe: Shoe,
    bankroll: Bankroll,
    rules: TableRules,
    logger: L,
    rounds_played: u32,
}

impl<L: RoundLogger> Engine<L> {
    pub fn new(
        rules: TableRules,
        bankroll: Bankroll,
        seed: Option<u64>,
        logger: L,
    ) -> Result<Self, GameError> {
        let shoe = match seed {
            Some(s) => Shoe::new_with_seed(rules.num_decks, s)?,
            None => Shoe::new(rules.num_decks)?,
        };
        Ok(Self::with_shoe(shoe, rules, bankroll, logger))
    }

    pub fn with_shoe(shoe: Shoe, rules: TableRules, bankroll: Bankroll, logger: L) -> Self {
        Self {
            shoe,
            bankroll,
            rules,
            logger,
            rounds_played: 0,
        }
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }
    pub fn bankroll(&self) -> &Bankroll {
        &self.bankroll
    }
    pub fn rules(&self) -> &TableRules {
        &self.rules
    }
    pub fn logger(&self) -> &L {
        &self.logger
    }
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.shoe.needs_reshuffle(self.rules.penetration)
    }

    /// Rebuilds and reshuffles the shoe. Only called between rounds.
    pub fn reshuffle(&mut self) {
        info!(remaining = self.shoe.remaining(), "rebuilding shoe");
        self.shoe.rebuild();
    }

    pub fn play_round(&mut self, bet: Bet) -> Result<RoundReport, GameError> {
        validate_bet(&bet)?;
        if self.rules.auto_reshuffle && self.needs_reshuffle() {
            self.reshuffle();
        }
        let report = play_round(
            self.rounds_played + 1,
            &mut self.shoe,
            bet,
            &mut self.bankroll,
            &self.rules,
            &mut self.logger,
        )?;
        self.rounds_played += 1;
        Ok(report)
    }
}
