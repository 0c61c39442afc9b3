use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bankroll::Bankroll;
use crate::cards::Card;
use crate::engine::RoundResult;
use crate::payout::{BetType, Money, Winner};

/// Column order of the round log. Fixed; readers rely on it.
pub const CSV_HEADER: [&str; 13] = [
    "round",
    "bet_type",
    "bet_amount",
    "winner",
    "payout",
    "player_score",
    "banker_score",
    "player_hand",
    "banker_hand",
    "player_money",
    "casino_money",
    "natural",
    "last_round",
];

#[derive(Debug, Error)]
pub enum LogError {
    #[error("log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed log row: {0}")]
    Parse(String),
}

/// Sink for settled rounds. Called once per round after the bankroll has
/// been updated; a failure here never undoes settlement.
pub trait RoundLogger {
    fn record_round(&mut self, result: &RoundResult, bankroll: &Bankroll) -> Result<(), LogError>;
}

impl<L: RoundLogger + ?Sized> RoundLogger for Box<L> {
    fn record_round(&mut self, result: &RoundResult, bankroll: &Bankroll) -> Result<(), LogError> {
        (**self).record_round(result, bankroll)
    }
}

/// One row of the round log: the round outcome plus a bankroll snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub bet_type: BetType,
    pub bet_amount: Money,
    pub winner: Winner,
    /// Signed change to the player's balance
    pub payout: Money,
    pub player_score: u8,
    pub banker_score: u8,
    /// Space-joined `<suit><rank>` tokens
    pub player_hand: String,
    pub banker_hand: String,
    pub player_money: Money,
    pub casino_money: Money,
    pub natural: bool,
    pub last_round: bool,
}

impl RoundRecord {
    pub fn from_round(result: &RoundResult, bankroll: &Bankroll) -> Self {
        Self {
            round: result.round_no(),
            bet_type: result.bet().bet_type,
            bet_amount: result.bet().amount,
            winner: result.winner(),
            payout: result.payout(),
            player_score: result.player_score(),
            banker_score: result.banker_score(),
            player_hand: result.player_hand().to_string(),
            banker_hand: result.banker_hand().to_string(),
            player_money: bankroll.player_money(),
            casino_money: bankroll.casino_money(),
            natural: result.is_natural(),
            last_round: result.is_last_round(),
        }
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.round,
            self.bet_type,
            self.bet_amount,
            self.winner,
            self.payout,
            self.player_score,
            self.banker_score,
            self.player_hand,
            self.banker_hand,
            self.player_money,
            self.casino_money,
            self.natural,
            self.last_round
        )
    }

    pub fn parse_csv_row(line: &str) -> Result<Self, LogError> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        if fields.len() != CSV_HEADER.len() {
            return Err(LogError::Parse(format!(
                "expected {} fields, found {}",
                CSV_HEADER.len(),
                fields.len()
            )));
        }
        Ok(Self {
            round: parse_field(fields[0], "round")?,
            bet_type: fields[1]
                .parse()
                .map_err(|e| LogError::Parse(format!("bet_type: {}", e)))?,
            bet_amount: parse_field(fields[2], "bet_amount")?,
            winner: fields[3]
                .parse()
                .map_err(|e| LogError::Parse(format!("winner: {}", e)))?,
            payout: parse_field(fields[4], "payout")?,
            player_score: parse_field(fields[5], "player_score")?,
            banker_score: parse_field(fields[6], "banker_score")?,
            player_hand: fields[7].to_string(),
            banker_hand: fields[8].to_string(),
            player_money: parse_field(fields[9], "player_money")?,
            casino_money: parse_field(fields[10], "casino_money")?,
            natural: parse_bool(fields[11], "natural")?,
            last_round: parse_bool(fields[12], "last_round")?,
        })
    }

    pub fn player_cards(&self) -> Result<Vec<Card>, LogError> {
        parse_cards(&self.player_hand)
    }

    pub fn banker_cards(&self) -> Result<Vec<Card>, LogError> {
        parse_cards(&self.banker_hand)
    }
}

fn parse_field<T: std::str::FromStr>(s: &str, name: &str) -> Result<T, LogError> {
    s.trim()
        .parse()
        .map_err(|_| LogError::Parse(format!("{}: {:?}", name, s)))
}

// Accepts True/False as well as true/false.
fn parse_bool(s: &str, name: &str) -> Result<bool, LogError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LogError::Parse(format!("{}: {:?}", name, s))),
    }
}

fn parse_cards(s: &str) -> Result<Vec<Card>, LogError> {
    s.split_whitespace()
        .map(|t| t.parse().map_err(|e| LogError::Parse(format!("{}", e))))
        .collect()
}

/// `baccarat_YYYY_MM_DD.csv`
pub fn daily_file_name(date: NaiveDate) -> String {
    format!("baccarat_{}.csv", date.format("%Y_%m_%d"))
}

/// Appends one CSV row per round. The header is written when the file is
/// new or empty.
#[derive(Debug)]
pub struct CsvRoundLogger {
    path: PathBuf,
}

impl CsvRoundLogger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let mut f = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;
        if f.metadata()?.len() == 0 {
            writeln!(f, "{}", CSV_HEADER.join(","))?;
        } else {
            // an interrupted write can leave the last row unterminated
            let mut last = [0u8; 1];
            f.seek(SeekFrom::End(-1))?;
            f.read_exact(&mut last)?;
            if last[0] != b'\n' {
                f.write_all(b"\n")?;
            }
        }
        Ok(Self { path })
    }

    /// Opens today's log under `dir`, one file per calendar day.
    pub fn open_daily<P: AsRef<Path>>(dir: P) -> Result<Self, LogError> {
        Self::open(dir.as_ref().join(daily_file_name(Local::now().date_naive())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, record: &RoundRecord) -> Result<(), LogError> {
        let f = OpenOptions::new().append(true).open(&self.path)?;
        let mut w = BufWriter::new(f);
        w.write_all(record.to_csv_row().as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}

impl RoundLogger for CsvRoundLogger {
    fn record_round(&mut self, result: &RoundResult, bankroll: &Bankroll) -> Result<(), LogError> {
        self.append(&RoundRecord::from_round(result, bankroll))
    }
}

/// Keeps rows in memory; useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRoundLogger {
    records: Vec<RoundRecord>,
}

impl MemoryRoundLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
}

impl RoundLogger for MemoryRoundLogger {
    fn record_round(&mut self, result: &RoundResult, bankroll: &Bankroll) -> Result<(), LogError> {
        self.records.push(RoundRecord::from_round(result, bankroll));
        Ok(())
    }
}

/// Discards every round.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRoundLogger;

impl RoundLogger for NullRoundLogger {
    fn record_round(&mut self, _: &RoundResult, _: &Bankroll) -> Result<(), LogError> {
        Ok(())
    }
}

/// Reads a round log back, skipping the header and blank lines.
pub fn read_log<P: AsRef<Path>>(path: P) -> Result<Vec<RoundRecord>, LogError> {
    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let mut out = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with("round,") {
            continue;
        }
        let rec = RoundRecord::parse_csv_row(line)
            .map_err(|e| LogError::Parse(format!("line {}: {}", idx + 1, e)))?;
        out.push(rec);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_file_name_uses_underscored_date() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();
        assert_eq!(daily_file_name(d), "baccarat_2025_12_16.csv");
    }

    #[test]
    fn parses_capitalised_booleans() {
        let rec = RoundRecord::parse_csv_row(
            "3,TIE,1000,BANKER,-1000,4,7,♠2 ♥2 ♦K,♣3 ♣4,99000,101000,False,True",
        )
        .unwrap();
        assert!(!rec.natural);
        assert!(rec.last_round);
        assert_eq!(rec.player_cards().unwrap().len(), 3);
    }

    #[test]
    fn records_serialize_with_uppercase_sides() {
        let rec = RoundRecord::parse_csv_row(
            "9,BANKER,2500,TIE,0,6,6,♠6 ♥K,♦3 ♣3,100000,100000,false,false",
        )
        .unwrap();
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["bet_type"], "BANKER");
        assert_eq!(v["winner"], "TIE");
        assert_eq!(v["payout"], 0.0);
    }

    #[test]
    fn short_rows_are_rejected() {
        assert!(matches!(
            RoundRecord::parse_csv_row("1,PLAYER,1000"),
            Err(LogError::Parse(_))
        ));
    }
}
