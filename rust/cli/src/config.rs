//! Layered table configuration.
//!
//! Values resolve in order: built-in defaults, then the TOML file named by
//! `BACCARAT_CONFIG`, then `BACCARAT_*` environment variables, then
//! command-line flags. Every value remembers where it came from so `cfg`
//! can report it.
//!
//! ```toml
//! num_decks = 6
//! player_money = 50000
//! min_bet = 500
//! bet_amount = 500
//! tie_policy = "lose"
//! log_dir = "var/baccarat"
//! ```

use baccarat_engine::bankroll::{Bankroll, STARTING_MONEY};
use baccarat_engine::game::TableRules;
use baccarat_engine::payout::{Money, TiePolicy};
use baccarat_engine::shoe::{DEFAULT_DECKS, MAX_DECKS};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "BACCARAT_CONFIG";
pub const SEED_ENV: &str = "BACCARAT_SEED";
pub const DECKS_ENV: &str = "BACCARAT_DECKS";
pub const TIE_POLICY_ENV: &str = "BACCARAT_TIE_POLICY";
pub const LOG_DIR_ENV: &str = "BACCARAT_LOG_DIR";

/// Smallest stake the interactive table accepts.
pub const DEFAULT_MIN_BET: Money = 1000.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub num_decks: usize,
    pub player_money: Money,
    pub casino_money: Money,
    pub min_bet: Money,
    /// Stake used when a command or input line gives none
    pub bet_amount: Money,
    pub seed: Option<u64>,
    pub tie_policy: TiePolicy,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_decks: DEFAULT_DECKS,
            player_money: STARTING_MONEY,
            casino_money: STARTING_MONEY,
            min_bet: DEFAULT_MIN_BET,
            bet_amount: DEFAULT_MIN_BET,
            seed: None,
            tie_policy: TiePolicy::Push,
            log_dir: "logs".into(),
        }
    }
}

impl Config {
    pub fn table_rules(&self) -> TableRules {
        TableRules::default()
            .with_decks(self.num_decks)
            .with_tie_policy(self.tie_policy)
    }

    pub fn bankroll(&self) -> Bankroll {
        Bankroll::new(self.player_money, self.casino_money)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigSources {
    pub num_decks: ValueSource,
    pub player_money: ValueSource,
    pub casino_money: ValueSource,
    pub min_bet: ValueSource,
    pub bet_amount: ValueSource,
    pub seed: ValueSource,
    pub tie_policy: ValueSource,
    pub log_dir: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            num_decks: ValueSource::Default,
            player_money: ValueSource::Default,
            casino_money: ValueSource::Default,
            min_bet: ValueSource::Default,
            bet_amount: ValueSource::Default,
            seed: ValueSource::Default,
            tie_policy: ValueSource::Default,
            log_dir: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub num_decks: Option<usize>,
    pub tie_policy: Option<TiePolicy>,
    pub log_dir: Option<String>,
    pub bet_amount: Option<Money>,
}

impl ConfigResolved {
    /// Applies command-line values on top and re-validates.
    pub fn apply_overrides(&mut self, o: &Overrides) -> Result<(), ConfigError> {
        if let Some(v) = o.seed {
            self.config.seed = Some(v);
            self.sources.seed = ValueSource::Cli;
        }
        if let Some(v) = o.num_decks {
            self.config.num_decks = v;
            self.sources.num_decks = ValueSource::Cli;
        }
        if let Some(v) = o.tie_policy {
            self.config.tie_policy = v;
            self.sources.tie_policy = ValueSource::Cli;
        }
        if let Some(v) = &o.log_dir {
            self.config.log_dir = v.clone();
            self.sources.log_dir = ValueSource::Cli;
        }
        if let Some(v) = o.bet_amount {
            self.config.bet_amount = v;
            self.sources.bet_amount = ValueSource::Cli;
        }
        validate(&self.config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolves defaults, file and environment, reading variables through `var`.
pub fn load_from<F>(var: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.num_decks {
            cfg.num_decks = v;
            sources.num_decks = ValueSource::File;
        }
        if let Some(v) = f.player_money {
            cfg.player_money = v;
            sources.player_money = ValueSource::File;
        }
        if let Some(v) = f.casino_money {
            cfg.casino_money = v;
            sources.casino_money = ValueSource::File;
        }
        if let Some(v) = f.min_bet {
            cfg.min_bet = v;
            sources.min_bet = ValueSource::File;
        }
        if let Some(v) = f.bet_amount {
            cfg.bet_amount = v;
            sources.bet_amount = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.tie_policy {
            cfg.tie_policy = v.parse().map_err(ConfigError::Invalid)?;
            sources.tie_policy = ValueSource::File;
        }
        if let Some(v) = f.log_dir {
            cfg.log_dir = v;
            sources.log_dir = ValueSource::File;
        }
    }

    if let Some(seed) = var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(decks) = var(DECKS_ENV)
        && !decks.is_empty()
    {
        cfg.num_decks = decks
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid deck count: {}", decks)))?;
        sources.num_decks = ValueSource::Env;
    }
    if let Some(policy) = var(TIE_POLICY_ENV)
        && !policy.is_empty()
    {
        cfg.tie_policy = policy.parse().map_err(ConfigError::Invalid)?;
        sources.tie_policy = ValueSource::Env;
    }
    if let Some(dir) = var(LOG_DIR_ENV)
        && !dir.is_empty()
    {
        cfg.log_dir = dir;
        sources.log_dir = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    num_decks: Option<usize>,
    #[serde(default)]
    player_money: Option<Money>,
    #[serde(default)]
    casino_money: Option<Money>,
    #[serde(default)]
    min_bet: Option<Money>,
    #[serde(default)]
    bet_amount: Option<Money>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    tie_policy: Option<String>,
    #[serde(default)]
    log_dir: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(1..=MAX_DECKS).contains(&cfg.num_decks) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: num_decks must be between 1 and {}",
            MAX_DECKS
        )));
    }
    if !(cfg.player_money >= 0.0 && cfg.casino_money >= 0.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: balances must be >=0".into(),
        ));
    }
    if !(cfg.min_bet > 0.0 && cfg.min_bet.is_finite()) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: min_bet must be >0".into(),
        ));
    }
    if !(cfg.bet_amount >= cfg.min_bet && cfg.bet_amount.is_finite()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bet_amount must be >= min_bet ({})",
            cfg.min_bet
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let r = load_from(env(&[])).unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources, ConfigSources::default());
        assert_eq!(r.config.num_decks, 8);
        assert_eq!(r.config.min_bet, 1000.0);
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.toml");
        fs::write(&path, "num_decks = 6\nseed = 1\nmin_bet = 500\nbet_amount = 500\n").unwrap();
        let r = load_from(env(&[
            (CONFIG_ENV, path.to_str().unwrap()),
            (SEED_ENV, "99"),
        ]))
        .unwrap();
        assert_eq!(r.config.num_decks, 6);
        assert_eq!(r.sources.num_decks, ValueSource::File);
        assert_eq!(r.config.seed, Some(99));
        assert_eq!(r.sources.seed, ValueSource::Env);
        assert_eq!(r.config.min_bet, 500.0);
    }

    #[test]
    fn tie_policy_from_env_accepts_loss_alias() {
        let r = load_from(env(&[(TIE_POLICY_ENV, "Loss")])).unwrap();
        assert_eq!(r.config.tie_policy, TiePolicy::Lose);
        assert_eq!(r.sources.tie_policy, ValueSource::Env);
    }

    #[test]
    fn zero_decks_is_rejected() {
        let e = load_from(env(&[(DECKS_ENV, "0")])).unwrap_err();
        assert!(e.to_string().contains("num_decks"));
    }

    #[test]
    fn oversized_deck_counts_are_rejected_from_every_layer() {
        let e = load_from(env(&[(DECKS_ENV, "709490156681136600")])).unwrap_err();
        assert!(e.to_string().contains("num_decks must be between 1 and 64"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.toml");
        fs::write(&path, "num_decks = 100000000\n").unwrap();
        assert!(load_from(env(&[(CONFIG_ENV, path.to_str().unwrap())])).is_err());

        let mut r = load_from(env(&[])).unwrap();
        let e = r
            .apply_overrides(&Overrides {
                num_decks: Some(MAX_DECKS + 1),
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(e.to_string().contains("num_decks"));
        assert!(r
            .apply_overrides(&Overrides {
                num_decks: Some(MAX_DECKS),
                ..Overrides::default()
            })
            .is_ok());
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "decks = 6\n").unwrap();
        let e = load_from(env(&[(CONFIG_ENV, path.to_str().unwrap())])).unwrap_err();
        assert!(matches!(e, ConfigError::Parse(_)));
    }

    #[test]
    fn bet_below_minimum_is_rejected_after_overrides() {
        let mut r = load_from(env(&[])).unwrap();
        let e = r
            .apply_overrides(&Overrides {
                bet_amount: Some(10.0),
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(e.to_string().contains("bet_amount"));
    }

    #[test]
    fn overrides_are_marked_cli() {
        let mut r = load_from(env(&[(SEED_ENV, "5")])).unwrap();
        r.apply_overrides(&Overrides {
            seed: Some(6),
            log_dir: Some("elsewhere".into()),
            ..Overrides::default()
        })
        .unwrap();
        assert_eq!(r.config.seed, Some(6));
        assert_eq!(r.sources.seed, ValueSource::Cli);
        assert_eq!(r.sources.log_dir, ValueSource::Cli);
        assert_eq!(r.sources.num_decks, ValueSource::Default);
    }
}
