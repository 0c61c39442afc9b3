mod helpers;

use baccarat_cli::cli::TableArgs;
use baccarat_cli::commands::handle_play_command;
use helpers::{clear_env, only_log_in, use_config_file};
use serial_test::serial;
use std::io::Cursor;

fn table(seed: u64) -> TableArgs {
    TableArgs {
        seed: Some(seed),
        no_log: true,
        ..TableArgs::default()
    }
}

fn play(args: TableArgs, input: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    handle_play_command(args, &mut out, &mut err, &mut stdin).expect("play succeeds");
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
#[serial]
fn one_bet_then_quit() {
    clear_env();
    let (out, err) = play(table(42), "banker\nquit\n");
    assert!(err.is_empty(), "{err}");
    assert!(out.starts_with("play: decks=8 seed=42 min_bet=1000 tie=push"));
    assert!(out.contains("Round 1:"));
    assert!(out.contains("| BANKER 1000 "));
    assert!(out.contains("Rounds played: 1"));
}

#[test]
#[serial]
fn end_of_input_closes_the_table() {
    clear_env();
    let (out, _) = play(table(1), "p\nt\n");
    assert!(out.contains("Round 2:"));
    assert!(out.contains("Rounds played: 2"));
}

#[test]
#[serial]
fn stakes_below_minimum_or_above_balance_are_refused() {
    clear_env();
    let (out, err) = play(table(3), "b 500\np 100001\nquit\n");
    assert!(err.contains("Error: Minimum bet is 1000"));
    assert!(err.contains("Error: Bet 100001 exceeds balance 100000"));
    assert!(!out.contains("Round 1:"));
    assert!(out.contains("Rounds played: 0"));
}

#[test]
#[serial]
fn bad_input_reprompts() {
    clear_env();
    let (out, err) = play(table(4), "double down\n\nb\nq\n");
    assert!(err.contains("Unrecognized input: double"));
    assert!(out.contains("Rounds played: 1"));
}

#[test]
#[serial]
fn default_amount_balance_and_history() {
    clear_env();
    let (out, err) = play(
        table(5),
        "history\namount 2000\nbalance\nplayer\nhistory 1\nquit\n",
    );
    assert!(err.is_empty(), "{err}");
    assert!(out.contains("No rounds played yet"));
    assert!(out.contains("Default bet set to 2000"));
    assert!(out.contains("Player: 100000  Casino: 100000"));
    assert!(out.contains("| PLAYER 2000 "));
    let history_row = out
        .lines()
        .find(|l| l.trim_start().starts_with("1  PLAYER"))
        .expect("history row for round 1");
    assert!(history_row.contains("2000"));
}

#[test]
#[serial]
fn help_lists_commands() {
    clear_env();
    let (out, _) = play(table(6), "help\nquit\n");
    for word in ["player|banker|tie", "amount X", "balance", "history [N]", "quit"] {
        assert!(out.contains(word), "help is missing {word}");
    }
}

#[test]
#[serial]
fn shoe_is_replaced_when_it_runs_low() {
    clear_env();
    let mut args = table(8);
    args.decks = Some(1);
    let input = "p\n".repeat(15) + "quit\n";
    let (out, _) = play(args, &input);
    assert!(out.contains("*** Fewer than 6 cards left: new shoe shuffled ***"));
    assert!(out.contains("Rounds played: 15"));
}

#[test]
#[serial]
fn table_closes_when_player_cannot_cover_minimum() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    use_config_file(dir.path(), "player_money = 1000\n");
    let input = "t\n".repeat(5000);
    let (out, _) = play(table(12), &input);
    assert!(out.contains("Player cannot cover the minimum bet of 1000; table closed"));
    clear_env();
}

#[test]
#[serial]
fn rounds_are_logged_when_enabled() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let args = TableArgs {
        seed: Some(9),
        log_dir: Some(dir.path().to_str().unwrap().to_string()),
        ..TableArgs::default()
    };
    let (out, _) = play(args, "b\nb 3000\nquit\n");
    assert!(out.contains("Logging to"));

    let rows = baccarat_engine::logger::read_log(only_log_in(dir.path())).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].round, 2);
    assert_eq!(rows[1].bet_amount, 3000.0);
}
