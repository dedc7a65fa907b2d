//! Runtime configuration read from the environment.
//!
//! Every variable is optional. A value that fails to parse is replaced by its
//! default and recorded in [`AppConfig::rejected`]. The log file is configured
//! here too, so those values are reported later by [`AppConfig::warn_rejected`].

use std::path::PathBuf;

use log::warn;

use crate::core::SessionConfig;
use crate::types::{ScoringRules, SpawnCheck, DEFAULT_FALL_INTERVAL_MS};

pub const ENV_FALL_MS: &str = "BLOCKFALL_FALL_MS";
pub const ENV_SCORING: &str = "BLOCKFALL_SCORING";
pub const ENV_SPAWN_CHECK: &str = "BLOCKFALL_SPAWN_CHECK";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";

/// A variable whose value could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVar {
    pub name: &'static str,
    pub raw: String,
}

/// Settings for the interactive binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Fixed piece-sequence seed; random when unset
    pub seed: Option<u32>,
    /// Log file; no logger is installed without one
    pub log_path: Option<PathBuf>,
    /// Values that fell back to their defaults
    pub rejected: Vec<RejectedVar>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            seed: None,
            log_path: None,
            rejected: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from any name-to-value lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut rejected = Vec::new();

        let fall_interval_ms = get(ENV_FALL_MS)
            .and_then(|s| {
                parse_or_reject(ENV_FALL_MS, s, &mut rejected, |v| {
                    v.parse::<u32>().ok().filter(|n| *n > 0)
                })
            })
            .unwrap_or(DEFAULT_FALL_INTERVAL_MS);

        let scoring = get(ENV_SCORING)
            .and_then(|s| parse_or_reject(ENV_SCORING, s, &mut rejected, ScoringRules::from_str))
            .unwrap_or_default();

        let spawn_check = get(ENV_SPAWN_CHECK)
            .and_then(|s| {
                parse_or_reject(ENV_SPAWN_CHECK, s, &mut rejected, SpawnCheck::from_str)
            })
            .unwrap_or_default();

        let seed = get(ENV_SEED).and_then(|s| {
            parse_or_reject(ENV_SEED, s, &mut rejected, |v| v.parse::<u32>().ok())
        });

        let log_path = get(ENV_LOG_PATH).map(PathBuf::from);

        Self {
            session: SessionConfig {
                fall_interval_ms,
                scoring,
                spawn_check,
                ..SessionConfig::default()
            },
            seed,
            log_path,
            rejected,
        }
    }

    /// Log every rejected value. Call after the logger is installed.
    pub fn warn_rejected(&self) {
        for var in &self.rejected {
            warn!("ignoring invalid {}={:?}, using default", var.name, var.raw);
        }
    }

    /// The configured seed, or a fresh random one
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn parse_or_reject<T>(
    name: &'static str,
    raw: String,
    rejected: &mut Vec<RejectedVar>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(&raw);
    if parsed.is_none() {
        rejected.push(RejectedVar { name, raw });
    }
    parsed
}
