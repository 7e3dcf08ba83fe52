//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerPolicy;
use crate::rewards::{default_catalog, Reward};
use crate::scoring::RepeatPolicy;

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "QUIZLEDGER_DATA_DIR";

/// Top-level quizledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizLedgerConfig {
    /// Directory the ledger entries are stored in.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Points for a perfect quiz.
    #[serde(default = "default_max_points")]
    pub max_points_per_quiz: u32,
    /// Distinct subjects needed to complete a week.
    #[serde(default = "default_subjects_per_week")]
    pub subjects_per_week: usize,
    /// Scoring of repeat completions within a week.
    #[serde(default)]
    pub repeat_policy: RepeatPolicy,
    /// Reward ladder, in display order.
    #[serde(default = "default_catalog")]
    pub rewards: Vec<Reward>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.quizledger")
}
fn default_max_points() -> u32 {
    10
}
fn default_subjects_per_week() -> usize {
    4
}

impl Default for QuizLedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_points_per_quiz: default_max_points(),
            subjects_per_week: default_subjects_per_week(),
            repeat_policy: RepeatPolicy::default(),
            rewards: default_catalog(),
        }
    }
}

impl QuizLedgerConfig {
    /// The scoring policy this configuration describes.
    pub fn policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            max_points_per_quiz: self.max_points_per_quiz,
            subjects_per_week: self.subjects_per_week,
            repeat_policy: self.repeat_policy,
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizledger.toml` in the current directory
/// 2. `~/.config/quizledger/config.toml`
///
/// Environment variable override: `QUIZLEDGER_DATA_DIR`.
pub fn load_config() -> Result<QuizLedgerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizLedgerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizledger.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizLedgerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizLedgerConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &QuizLedgerConfig) -> Result<()> {
    anyhow::ensure!(
        config.subjects_per_week >= 1,
        "subjects_per_week must be at least 1"
    );
    let mut ids = std::collections::HashSet::new();
    for reward in &config.rewards {
        anyhow::ensure!(ids.insert(&reward.id), "duplicate reward id: {}", reward.id);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizledger"))
}
