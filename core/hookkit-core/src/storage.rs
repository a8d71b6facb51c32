//! Storage configuration and path management for hookkit.
//!
//! `StorageConfig` is the single place that decides where hookkit reads and
//! writes. Every other module receives one instead of calling `dirs` itself,
//! which keeps the home-directory config files an explicit dependency:
//!
//! - Production code uses [`StorageConfig::from_env`] (real home + OS temp dir)
//! - Tests use [`StorageConfig::with_roots`] pointing at temp directories
//!
//! All accessors are pure path composition; nothing here touches the disk
//! except [`StorageConfig::ensure_dirs`].

use std::path::{Path, PathBuf};

use crate::error::{HookkitError, Result};

/// Directory name of the Claude Code config root, both under `$HOME` and
/// inside a project.
pub const CLAUDE_DIR_NAME: &str = ".claude";

/// File name of a persisted package manager preference.
pub const PACKAGE_MANAGER_FILE: &str = "package-manager.json";

/// Prefix of the per-session tool-call counter files in the temp dir.
const COUNTER_FILE_PREFIX: &str = "claude-tool-count-";

/// Central configuration for all hookkit storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// User home directory (default: `dirs::home_dir()`)
    home: PathBuf,
    /// Scratch directory for ephemeral counters (default: OS temp dir)
    temp: PathBuf,
}

impl StorageConfig {
    /// Resolves the real home and temp directories.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(HookkitError::HomeDirNotFound)?;
        Ok(Self {
            home,
            temp: std::env::temp_dir(),
        })
    }

    /// Creates a StorageConfig rooted at a custom home, using `<home>/tmp` as
    /// the temp directory. Used for testing with temp directories.
    pub fn with_root(home: PathBuf) -> Self {
        let temp = home.join("tmp");
        Self { home, temp }
    }

    /// Creates a StorageConfig with both custom home and temp directories.
    pub fn with_roots(home: PathBuf, temp: PathBuf) -> Self {
        Self { home, temp }
    }

    /// Returns the home directory.
    pub fn home_dir(&self) -> &Path {
        &self.home
    }

    /// Returns the temp directory used for counters.
    pub fn temp_dir(&self) -> &Path {
        &self.temp
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Global Paths
    // ─────────────────────────────────────────────────────────────────────────────

    /// Path to the Claude config root (~/.claude).
    pub fn claude_dir(&self) -> PathBuf {
        self.home.join(CLAUDE_DIR_NAME)
    }

    /// Path to sessions/ directory (session records and compaction log).
    pub fn sessions_dir(&self) -> PathBuf {
        self.claude_dir().join("sessions")
    }

    /// Path to skills/learned/ directory.
    pub fn learned_skills_dir(&self) -> PathBuf {
        self.claude_dir().join("skills").join("learned")
    }

    /// Path to the continuous-learning config file.
    pub fn learning_config_file(&self) -> PathBuf {
        self.claude_dir()
            .join("skills")
            .join("continuous-learning")
            .join("config.json")
    }

    /// Path to the global package manager preference.
    pub fn global_package_manager_file(&self) -> PathBuf {
        self.claude_dir().join(PACKAGE_MANAGER_FILE)
    }

    /// Path to the append-only compaction log.
    pub fn compaction_log_file(&self) -> PathBuf {
        self.sessions_dir().join("compaction-log.txt")
    }

    /// Path to the hook log directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.claude_dir().join("logs")
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Per-Session / Per-Project Paths
    // ─────────────────────────────────────────────────────────────────────────────

    /// Path to a session record.
    /// Example: ~/.claude/sessions/2026-01-15-a1b2c3d4-session.tmp
    pub fn session_file(&self, date: &str, short_id: &str) -> PathBuf {
        self.sessions_dir()
            .join(format!("{}-{}-session.tmp", date, short_id))
    }

    /// Path to the tool-call counter for a session key.
    /// Example: /tmp/claude-tool-count-4242
    pub fn counter_file(&self, key: &str) -> PathBuf {
        self.temp.join(format!("{}{}", COUNTER_FILE_PREFIX, key))
    }

    /// Path to a project's package manager preference. Independent of the
    /// home root: project scope lives inside the project itself.
    pub fn project_package_manager_file(project_dir: &Path) -> PathBuf {
        project_dir.join(CLAUDE_DIR_NAME).join(PACKAGE_MANAGER_FILE)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Directory Creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Ensures the sessions and learned-skills directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        crate::fs_utils::ensure_dir(&self.sessions_dir())?;
        crate::fs_utils::ensure_dir(&self.learned_skills_dir())?;
        Ok(())
    }
}
