//! Shared helpers for the CLI integration tests.
//!
//! Commands read `BACCARAT_*` variables, so every test that calls [`run_cli`]
//! is `#[serial]` and starts from [`clear_env`].
#![allow(dead_code)]

use baccarat_cli::commands::sim::BREAK_AFTER_ENV;
use baccarat_cli::config::{CONFIG_ENV, DECKS_ENV, LOG_DIR_ENV, SEED_ENV, TIE_POLICY_ENV};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    /// The pretty-printed JSON object that closes `sim`/`stats` output.
    pub fn summary(&self) -> Value {
        let start = if self.stdout.starts_with('{') {
            0
        } else {
            self.stdout
                .find("\n{")
                .map(|i| i + 1)
                .unwrap_or_else(|| panic!("no JSON summary in:\n{}", self.stdout))
        };
        serde_json::from_str(&self.stdout[start..]).expect("summary is JSON")
    }

    pub fn round_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|l| l.starts_with("Round "))
            .collect()
    }
}

pub fn run_cli(args: &[&str]) -> CliOutput {
    let mut argv = vec!["baccarat"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = baccarat_cli::run(argv, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8(out).expect("utf8 stdout"),
        stderr: String::from_utf8(err).expect("utf8 stderr"),
    }
}

pub fn clear_env() {
    for key in [
        CONFIG_ENV,
        SEED_ENV,
        DECKS_ENV,
        TIE_POLICY_ENV,
        LOG_DIR_ENV,
        BREAK_AFTER_ENV,
    ] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

pub fn set_env(key: &str, value: &str) {
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Writes `body` as a TOML config in `dir` and points `BACCARAT_CONFIG` at it.
pub fn use_config_file(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("baccarat.toml");
    std::fs::write(&path, body).expect("write config");
    set_env(CONFIG_ENV, path.to_str().expect("utf8 path"));
    path
}

/// The single daily log written into `dir`.
pub fn only_log_in(dir: &Path) -> PathBuf {
    let logs: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("read log dir")
        .map(|e| e.expect("entry").path())
        .filter(|p| p.extension().is_some_and(|x| x == "csv"))
        .collect();
    assert_eq!(logs.len(), 1, "expected one log in {:?}: {:?}", dir, logs);
    logs[0].clone()
}
