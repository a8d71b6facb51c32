//! Tool-call counter behind the strategic compaction advisor.
//!
//! Each `suggest-compact` invocation is one [`CompactionAdvisor::tick`]:
//!
//! ```text
//! read counter (absent/garbage → 0) → +1 → persist → evaluate
//!
//!   count == threshold                      → ThresholdReached
//!   count >  threshold && count % 25 == 0   → Periodic
//!   otherwise                               → silent
//! ```
//!
//! The counter is a bare decimal in `<temp>/claude-tool-count-<key>`. It is
//! never reset or cleaned up here.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs_utils::{read_file, write_file};
use crate::storage::StorageConfig;

/// Interval between reminders once past the threshold.
pub const PERIODIC_INTERVAL: u64 = 25;

/// A suggestion to run `/compact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    ThresholdReached { threshold: u64 },
    Periodic { count: u64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ThresholdReached { threshold } => write!(
                f,
                "{} tool calls reached - consider /compact if transitioning phases",
                threshold
            ),
            Advisory::Periodic { count } => write!(
                f,
                "{} tool calls - good checkpoint for /compact if context is stale",
                count
            ),
        }
    }
}

/// Outcome of one counted tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub count: u64,
    pub advisory: Option<Advisory>,
}

pub struct CompactionAdvisor {
    counter_file: PathBuf,
    threshold: u64,
}

impl CompactionAdvisor {
    /// Advisor for the counter keyed by `key` (see [`counter_key`]).
    pub fn new(storage: &StorageConfig, key: &str, threshold: u64) -> Self {
        Self {
            counter_file: storage.counter_file(key),
            threshold,
        }
    }

    pub fn counter_file(&self) -> &Path {
        &self.counter_file
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Current persisted count without incrementing.
    pub fn current(&self) -> u64 {
        read_file(&self.counter_file)
            .and_then(|content| content.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }

    /// Counts one tool call and decides whether to advise.
    pub fn tick(&self) -> Result<Tick> {
        let count = self.current().saturating_add(1);
        write_file(&self.counter_file, &count.to_string())?;

        let advisory = evaluate(count, self.threshold);
        if let Some(advisory) = advisory {
            tracing::info!(count, threshold = self.threshold, ?advisory, "Compaction advised");
        }
        Ok(Tick { count, advisory })
    }
}

/// Pure advisory rule.
pub fn evaluate(count: u64, threshold: u64) -> Option<Advisory> {
    if count == threshold {
        Some(Advisory::ThresholdReached { threshold })
    } else if count > threshold && count % PERIODIC_INTERVAL == 0 {
        Some(Advisory::Periodic { count })
    } else {
        None
    }
}

/// Counter key: the session id when set, else the parent process id.
pub fn counter_key(session_id: Option<&str>, parent_pid: Option<u32>) -> String {
    match (session_id.filter(|id| !id.is_empty()), parent_pid) {
        (Some(id), _) => id.to_string(),
        (None, Some(pid)) if pid > 0 => pid.to_string(),
        _ => "default".to_string(),
    }
}
