//! Subcommand implementations and the session plumbing they share.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizledger_core::config::{load_config_from, QuizLedgerConfig};
use quizledger_core::{JsonFileStore, Ledger, User};

pub mod init;
pub mod rewards;
pub mod session;
pub mod stats;
pub mod submit;
pub mod validate;

/// Flags accepted by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Loaded configuration plus the ledger it points at.
pub struct Session {
    pub config: QuizLedgerConfig,
    pub ledger: Ledger<JsonFileStore>,
}

impl Session {
    pub fn open(opts: &GlobalOpts) -> Result<Self> {
        let mut config = load_config_from(opts.config.as_deref())?;
        if let Some(dir) = &opts.data_dir {
            config.data_dir = dir.clone();
        }

        let store = JsonFileStore::open(&config.data_dir)
            .with_context(|| format!("failed to open ledger at {}", config.data_dir.display()))?;
        let ledger = Ledger::open(store).with_policy(config.policy());

        Ok(Self { config, ledger })
    }

    /// The logged-in user, or an error telling the caller to log in.
    pub fn require_user(&self) -> Result<User> {
        self.ledger
            .get_user()
            .context("not logged in; run `quizledger login --email <address>` first")
    }
}

/// Format a millisecond timestamp in local time.
pub fn format_timestamp(ms: i64) -> String {
    use chrono::{Local, TimeZone};

    match Local.timestamp_millis_opt(ms).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => ms.to_string(),
    }
}
