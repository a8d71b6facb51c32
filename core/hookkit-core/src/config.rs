//! Configuration sources for hookkit.
//!
//! Handles:
//! - Environment variables set by Claude Code or the user (`HookEnv`)
//! - The continuous-learning config file (`LearningConfig`)
//!
//! Both load with defaults; a missing or malformed source is never an error.

use std::path::PathBuf;

use serde::Deserialize;

use crate::fs_utils::read_file;
use crate::storage::StorageConfig;

pub const ENV_PACKAGE_MANAGER: &str = "CLAUDE_PACKAGE_MANAGER";
pub const ENV_SESSION_ID: &str = "CLAUDE_SESSION_ID";
pub const ENV_TRANSCRIPT_PATH: &str = "CLAUDE_TRANSCRIPT_PATH";
pub const ENV_COMPACT_THRESHOLD: &str = "COMPACT_THRESHOLD";

pub const DEFAULT_COMPACT_THRESHOLD: u64 = 50;
pub const DEFAULT_MIN_SESSION_LENGTH: u32 = 10;

/// Snapshot of the environment variables hookkit reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookEnv {
    /// Raw package manager override; validated by the resolver, not here.
    pub package_manager: Option<String>,
    /// Non-empty session identifier.
    pub session_id: Option<String>,
    pub transcript_path: Option<PathBuf>,
    pub compact_threshold: u64,
}

impl HookEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds from an arbitrary variable lookup. Tests use this instead of
    /// mutating the process environment.
    ///
    /// `COMPACT_THRESHOLD` values that are unparseable or `0` fall back to
    /// [`DEFAULT_COMPACT_THRESHOLD`]. A zero threshold is not honored: it would
    /// disable the one-time advisory and leave only the periodic one.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let compact_threshold = non_empty(ENV_COMPACT_THRESHOLD)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_COMPACT_THRESHOLD);

        Self {
            package_manager: non_empty(ENV_PACKAGE_MANAGER),
            session_id: non_empty(ENV_SESSION_ID),
            transcript_path: non_empty(ENV_TRANSCRIPT_PATH).map(PathBuf::from),
            compact_threshold,
        }
    }
}

/// Continuous-learning settings from
/// `~/.claude/skills/continuous-learning/config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LearningConfig {
    #[serde(default)]
    min_session_length: Option<u32>,
    #[serde(default)]
    learned_skills_path: Option<String>,
}

impl LearningConfig {
    /// Loads the config, returning defaults if the file is missing or invalid.
    pub fn load(storage: &StorageConfig) -> Self {
        let path = storage.learning_config_file();
        let Some(content) = read_file(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid learning config, using defaults");
                Self::default()
            }
        }
    }

    /// Minimum user messages before a session is worth evaluating.
    /// Zero counts as unset.
    pub fn min_session_length(&self) -> u32 {
        self.min_session_length
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MIN_SESSION_LENGTH)
    }

    /// Where learned skills live, with a leading `~` expanded.
    pub fn learned_skills_dir(&self, storage: &StorageConfig) -> PathBuf {
        match self.learned_skills_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => match path.strip_prefix('~') {
                Some(rest) => {
                    let rest = rest.trim_start_matches(['/', '\\']);
                    storage.home_dir().join(rest)
                }
                None => PathBuf::from(path),
            },
            None => storage.learned_skills_dir(),
        }
    }
}
