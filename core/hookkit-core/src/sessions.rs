//! Session continuity records under `~/.claude/sessions`.
//!
//! ## Files
//!
//! ```text
//! sessions/
//! ├── 2026-01-15-a1b2c3d4-session.tmp   one record per (date, short id)
//! ├── 2026-01-09-session.tmp            legacy name, still discovered
//! └── compaction-log.txt                append-only, never rotated
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! Stop (session-end)  → create record from template, or refresh "Last Updated"
//! SessionStart        → report recent records (7 days) and learned skills
//! PreCompact          → log the event, mark the newest active record
//! ```
//!
//! Records are never deleted here. Updates are plain read-modify-write with
//! no locking; the host runs these hooks sequentially per session.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::fs_utils::{append_file, ensure_dir, find_files, replace_bytes_in_file, write_file};
use crate::fs_utils::{FileMatch, FindOptions};
use crate::patterns::RE_LAST_UPDATED;
use crate::storage::StorageConfig;
use crate::timefmt::{date_string, datetime_string, time_string};

/// Records older than this are not reported at session start.
pub const RECENT_SESSION_DAYS: u32 = 7;

/// Matches both `YYYY-MM-DD-session.tmp` and `YYYY-MM-DD-<id>-session.tmp`.
const SESSION_RECORD_PATTERN: &str = "*-session.tmp";

/// Any unfinished record.
const ACTIVE_RECORD_PATTERN: &str = "*.tmp";

const LEARNED_SKILL_PATTERN: &str = "*.md";

const SHORT_ID_LEN: usize = 8;

/// What session-end did to the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEndOutcome {
    Created(PathBuf),
    Updated(PathBuf),
}

impl SessionEndOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SessionEndOutcome::Created(path) | SessionEndOutcome::Updated(path) => path,
        }
    }
}

/// Read-only summary produced at session start.
#[derive(Debug, Clone, Default)]
pub struct SessionStartReport {
    /// Records modified in the last [`RECENT_SESSION_DAYS`] days, newest first.
    pub recent_sessions: Vec<FileMatch>,
    pub learned_skills: usize,
    pub learned_skills_dir: PathBuf,
}

impl SessionStartReport {
    pub fn latest(&self) -> Option<&FileMatch> {
        self.recent_sessions.first()
    }
}

/// Result of recording a compaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionMarker {
    pub log_file: PathBuf,
    /// The active record that received a marker line, if any existed.
    pub annotated: Option<PathBuf>,
}

pub struct SessionStore {
    storage: StorageConfig,
}

impl SessionStore {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Creates today's record for `short_id`, or refreshes its
    /// `Last Updated` line if it exists. The body is never touched: an
    /// existing record that cannot be read is an error, never recreated.
    pub fn end_session(&self, short_id: &str, now: &NaiveDateTime) -> Result<SessionEndOutcome> {
        let date = date_string(now);
        let time = time_string(now);
        let path = self.storage.session_file(&date, short_id);

        ensure_dir(&self.storage.sessions_dir())?;

        if path.exists() {
            let replacement = format!("**Last Updated:** {}", time);
            if replace_bytes_in_file(&path, &RE_LAST_UPDATED, replacement.as_bytes())? {
                tracing::debug!(path = %path.display(), "Updated session record");
                return Ok(SessionEndOutcome::Updated(path));
            }
        }

        write_file(&path, &session_template(&date, &time))?;
        tracing::debug!(path = %path.display(), "Created session record");
        Ok(SessionEndOutcome::Created(path))
    }

    /// Finds recent session records and learned skills. Never writes.
    pub fn scan_recent(&self, learned_skills_dir: &Path) -> SessionStartReport {
        let recent_sessions = find_files(
            &self.storage.sessions_dir(),
            SESSION_RECORD_PATTERN,
            FindOptions::max_age_days(RECENT_SESSION_DAYS),
        );
        let learned_skills =
            find_files(learned_skills_dir, LEARNED_SKILL_PATTERN, FindOptions::default()).len();

        SessionStartReport {
            recent_sessions,
            learned_skills,
            learned_skills_dir: learned_skills_dir.to_path_buf(),
        }
    }

    /// Logs a compaction and marks the newest active record.
    pub fn record_compaction(&self, now: &NaiveDateTime) -> Result<CompactionMarker> {
        let sessions_dir = self.storage.sessions_dir();
        let log_file = self.storage.compaction_log_file();
        ensure_dir(&sessions_dir)?;

        append_file(
            &log_file,
            &format!("[{}] Context compaction triggered\n", datetime_string(now)),
        )?;

        let annotated = match find_files(&sessions_dir, ACTIVE_RECORD_PATTERN, FindOptions::default())
            .into_iter()
            .next()
        {
            Some(active) => {
                append_file(
                    &active.path,
                    &format!(
                        "\n---\n**[Compaction occurred at {}]** - Context was summarized\n",
                        time_string(now)
                    ),
                )?;
                Some(active.path)
            }
            None => None,
        };

        Ok(CompactionMarker {
            log_file,
            annotated,
        })
    }
}

/// Template for a new session record.
pub fn session_template(date: &str, time: &str) -> String {
    format!(
        "# Session: {date}
**Date:** {date}
**Started:** {time}
**Last Updated:** {time}

---

## Current State

[Session context goes here]

### Completed
- [ ]

### In Progress
- [ ]

### Notes for Next Session
-

### Context to Load
```
[relevant files]
```
"
    )
}

/// Derives the id that keys session files: the last 8 characters of the
/// session id, else the project name, else `default`.
///
/// `project_name` is only evaluated when no session id is set.
pub fn short_session_id<F>(session_id: Option<&str>, project_name: F) -> String
where
    F: FnOnce() -> Option<String>,
{
    if let Some(id) = session_id.filter(|id| !id.is_empty()) {
        let chars: Vec<char> = id.chars().collect();
        let start = chars.len().saturating_sub(SHORT_ID_LEN);
        return chars[start..].iter().collect();
    }
    project_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "default".to_string())
}
