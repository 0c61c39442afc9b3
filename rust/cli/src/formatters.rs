//! Card, hand and round formatters for terminal display.
//!
//! Suits render as Unicode symbols with an ASCII letter fallback for
//! terminals that cannot show them.
//!
//! - **Unicode mode**: ♠ ♥ ♣ ♦
//! - **ASCII mode**: s h c d
//!
//! ## Example
//!
//! ```rust
//! use baccarat_engine::cards::{Card, Rank, Suit};
//! use baccarat_cli::formatters::format_card;
//!
//! let ace = Card::with_suit(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "♠A" || format_card(&ace) == "sA");
//! assert_eq!(format_card(&Card::new(Rank::Ten)), "10");
//! ```

use baccarat_engine::bankroll::Bankroll;
use baccarat_engine::cards::{Card, Suit};
use baccarat_engine::engine::RoundResult;
use baccarat_engine::logger::RoundRecord;
use baccarat_engine::payout::Money;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// `<suit><rank>`, or the bare rank for an unsuited card.
pub fn format_card(card: &Card) -> String {
    match card.suit {
        Some(s) => format!("{}{}", format_suit(s), card.rank),
        None => card.rank.to_string(),
    }
}

pub fn format_hand(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// Money without a trailing `.0` for whole amounts.
pub fn format_money(amount: Money) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

/// Signed form used for payouts: `+950`, `-1000`, `0`.
pub fn format_delta(amount: Money) -> String {
    if amount > 0.0 {
        format!("+{}", format_money(amount))
    } else {
        format_money(amount)
    }
}

/// One line summarising a settled round.
///
/// ```text
/// Round 3: Player ♠5 ♥3 (8) | Banker ♦K ♣9 (9) natural -> BANKER | PLAYER 1000 -1000
/// ```
pub fn format_round(result: &RoundResult) -> String {
    let mut line = format!(
        "Round {}: Player {} ({}) | Banker {} ({})",
        result.round_no(),
        format_hand(result.player_hand().cards()),
        result.player_score(),
        format_hand(result.banker_hand().cards()),
        result.banker_score(),
    );
    if result.is_natural() {
        line.push_str(" natural");
    }
    line.push_str(&format!(
        " -> {} | {} {} {}",
        result.winner(),
        result.bet().bet_type,
        format_money(result.bet().amount),
        format_delta(result.payout())
    ));
    line
}

pub fn format_balances(bankroll: &Bankroll) -> String {
    format!(
        "Player: {}  Casino: {}",
        format_money(bankroll.player_money()),
        format_money(bankroll.casino_money())
    )
}

/// Column header matching [`format_record_row`].
pub fn record_table_header() -> String {
    format!(
        "{:>5}  {:<6} {:>8}  {:<6} {:>9}  {:<14} {:<14} {:>10}",
        "round", "bet", "amount", "winner", "payout", "player", "banker", "balance"
    )
}

/// One row of a logged round for `history`.
pub fn format_record_row(rec: &RoundRecord) -> String {
    let mut row = format!(
        "{:>5}  {:<6} {:>8}  {:<6} {:>9}  {:<14} {:<14} {:>10}",
        rec.round,
        rec.bet_type.as_str(),
        format_money(rec.bet_amount),
        rec.winner.as_str(),
        format_delta(rec.payout),
        format!("{} ({})", rec.player_hand, rec.player_score),
        format!("{} ({})", rec.banker_hand, rec.banker_score),
        format_money(rec.player_money),
    );
    if rec.natural {
        row.push_str("  N");
    }
    if rec.last_round {
        row.push_str("  L");
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use baccarat_engine::cards::Rank;
    use baccarat_engine::payout::BetType;

    #[test]
    fn money_drops_trailing_zero_fraction() {
        assert_eq!(format_money(950.0), "950");
        assert_eq!(format_money(-1000.0), "-1000");
        assert_eq!(format_money(11727.75), "11727.75");
        assert_eq!(format_money(0.5), "0.50");
    }

    #[test]
    fn deltas_carry_a_sign() {
        assert_eq!(format_delta(950.0), "+950");
        assert_eq!(format_delta(-1000.0), "-1000");
        assert_eq!(format_delta(0.0), "0");
    }

    #[test]
    fn unsuited_cards_show_rank_only() {
        let hand = [Card::new(Rank::Ace), Card::new(Rank::Ten)];
        assert_eq!(format_hand(&hand), "A 10");
    }

    #[test]
    fn suited_card_puts_suit_first() {
        let c = Card::with_suit(Rank::King, Suit::Hearts);
        let s = format_card(&c);
        assert!(s == "♥K" || s == "hK");
    }

    #[test]
    fn record_rows_flag_naturals_and_last_round() {
        let rec = RoundRecord {
            round: 7,
            bet_type: BetType::Banker,
            bet_amount: 1000.0,
            winner: BetType::Banker,
            payout: 950.0,
            player_score: 2,
            banker_score: 9,
            player_hand: "♠2 ♥K".into(),
            banker_hand: "♣4 ♦5".into(),
            player_money: 100_950.0,
            casino_money: 99_050.0,
            natural: true,
            last_round: true,
        };
        let row = format_record_row(&rec);
        assert!(row.contains("BANKER"));
        assert!(row.contains("+950"));
        assert!(row.contains("100950"));
        assert!(row.ends_with("N  L"));
    }
}
