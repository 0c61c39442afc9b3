//! Input parsing and validation for the interactive table.
//!
//! Turns one line typed at the `play` prompt into a [`ParseResult`] and
//! checks stakes against the table minimum and the player's balance.

use baccarat_engine::payout::{BetType, Money};

/// Default number of rounds shown by the `history` input.
pub const DEFAULT_HISTORY: usize = 10;

/// A recognised table command.
#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand {
    /// Place a bet; `None` uses the current default amount
    Bet {
        bet_type: BetType,
        amount: Option<Money>,
    },
    /// Change the default amount
    SetAmount(Money),
    Balance,
    History(usize),
    Help,
}

/// Result type for parsing one line of table input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(TableCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a line typed at the table prompt.
///
/// Accepted forms (case-insensitive):
/// - "player", "banker", "tie" or "p", "b", "t", optionally followed by an amount
/// - "amount X" sets the default stake
/// - "balance", "history [N]", "help", "q" / "quit"
///
/// # Example
///
/// ```rust
/// # use baccarat_cli::validation::{parse_table_input, ParseResult, TableCommand};
/// use baccarat_engine::payout::BetType;
///
/// assert_eq!(
///     parse_table_input("b 2500"),
///     ParseResult::Command(TableCommand::Bet {
///         bet_type: BetType::Banker,
///         amount: Some(2500.0)
///     })
/// );
/// assert_eq!(parse_table_input("quit"), ParseResult::Quit);
/// ```
pub fn parse_table_input(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some((&head, rest)) = parts.split_first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match head {
        "q" | "quit" | "exit" => ParseResult::Quit,
        "help" | "?" => ParseResult::Command(TableCommand::Help),
        "balance" | "bal" => ParseResult::Command(TableCommand::Balance),
        "history" | "h" => match rest {
            [] => ParseResult::Command(TableCommand::History(DEFAULT_HISTORY)),
            [n] => match n.parse::<usize>() {
                Ok(n) if n > 0 => ParseResult::Command(TableCommand::History(n)),
                _ => ParseResult::Invalid(format!("Invalid history length: {}", n)),
            },
            _ => ParseResult::Invalid("Usage: history [N]".to_string()),
        },
        "amount" => match rest {
            [a] => match parse_amount(a) {
                Ok(v) => ParseResult::Command(TableCommand::SetAmount(v)),
                Err(e) => ParseResult::Invalid(e),
            },
            _ => ParseResult::Invalid("Usage: amount X".to_string()),
        },
        other => {
            let Ok(bet_type) = other.parse::<BetType>() else {
                return ParseResult::Invalid(format!(
                    "Unrecognized input: {}. Type help for commands",
                    other
                ));
            };
            match rest {
                [] => ParseResult::Command(TableCommand::Bet {
                    bet_type,
                    amount: None,
                }),
                [a] => match parse_amount(a) {
                    Ok(v) => ParseResult::Command(TableCommand::Bet {
                        bet_type,
                        amount: Some(v),
                    }),
                    Err(e) => ParseResult::Invalid(e),
                },
                _ => ParseResult::Invalid(format!("Usage: {} [amount]", bet_type.as_str())),
            }
        }
    }
}

fn parse_amount(s: &str) -> Result<Money, String> {
    match s.parse::<Money>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("Invalid amount: {}", s)),
    }
}

/// Checks a stake against the table minimum and what the player holds.
pub fn validate_stake(amount: Money, min_bet: Money, balance: Money) -> Result<(), String> {
    if amount < min_bet {
        return Err(format!(
            "Minimum bet is {}",
            crate::formatters::format_money(min_bet)
        ));
    }
    if amount > balance {
        return Err(format!(
            "Bet {} exceeds balance {}",
            crate::formatters::format_money(amount),
            crate::formatters::format_money(balance)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bet(bet_type: BetType, amount: Option<Money>) -> ParseResult {
        ParseResult::Command(TableCommand::Bet { bet_type, amount })
    }

    #[test]
    fn long_and_short_bet_forms() {
        assert_eq!(parse_table_input("player"), bet(BetType::Player, None));
        assert_eq!(parse_table_input("P"), bet(BetType::Player, None));
        assert_eq!(parse_table_input("Banker 1500"), bet(BetType::Banker, Some(1500.0)));
        assert_eq!(parse_table_input("t 1000"), bet(BetType::Tie, Some(1000.0)));
    }

    #[test]
    fn amount_and_history() {
        assert_eq!(
            parse_table_input("amount 2000"),
            ParseResult::Command(TableCommand::SetAmount(2000.0))
        );
        assert_eq!(
            parse_table_input("history"),
            ParseResult::Command(TableCommand::History(10))
        );
        assert_eq!(
            parse_table_input("history 3"),
            ParseResult::Command(TableCommand::History(3))
        );
    }

    #[test]
    fn rejects_bad_amounts() {
        for s in ["b -5", "b 0", "b abc", "b nan", "amount inf", "history 0"] {
            assert!(
                matches!(parse_table_input(s), ParseResult::Invalid(_)),
                "{s} should be invalid"
            );
        }
    }

    #[test]
    fn rejects_unknown_words() {
        match parse_table_input("double") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(
            parse_table_input("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }

    #[test]
    fn stake_must_meet_minimum_and_fit_balance() {
        assert!(validate_stake(1000.0, 1000.0, 1000.0).is_ok());
        assert!(validate_stake(999.0, 1000.0, 5000.0).unwrap_err().contains("Minimum"));
        assert!(validate_stake(6000.0, 1000.0, 5000.0).unwrap_err().contains("exceeds"));
    }
}
