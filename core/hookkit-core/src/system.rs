//! External command probing and git introspection.
//!
//! Everything here degrades instead of failing: a missing `git`, a non-repo
//! directory or an unknown binary all come back as `false`/empty/`None`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use regex::Regex;

use crate::patterns::RE_COMMAND_NAME;

/// Answers "is this binary invocable here?".
///
/// The resolution cascade takes this as a dependency so tests can fake which
/// package managers are installed.
pub trait CommandProbe {
    fn exists(&self, name: &str) -> bool;
}

/// Probes the real `PATH` via [`command_exists`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl CommandProbe for SystemProbe {
    fn exists(&self, name: &str) -> bool {
        command_exists(name)
    }
}

/// Returns true if `name` is on `PATH`.
///
/// Names outside `[a-zA-Z0-9_.-]` are rejected before any subprocess starts,
/// and the probe passes the name as an argument, never through a shell.
pub fn command_exists(name: &str) -> bool {
    if !RE_COMMAND_NAME.is_match(name) {
        tracing::debug!(name, "Rejected command name");
        return false;
    }

    let locator = if cfg!(windows) { "where" } else { "which" };
    Command::new(locator)
        .arg(name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Result of [`run_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Trimmed stdout on success; stderr (or the spawn error) on failure.
    pub output: String,
}

/// Runs a trusted command line through the platform shell.
///
/// Only pass hard-coded commands. User input belongs in [`Command`] args.
pub fn run_command(cmd: &str) -> CommandOutput {
    run_command_in(cmd, None)
}

/// Like [`run_command`], with an optional working directory.
pub fn run_command_in(cmd: &str, dir: Option<&Path>) -> CommandOutput {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", cmd]);
        c
    };
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    match command.stdin(Stdio::null()).output() {
        Ok(out) if out.status.success() => CommandOutput {
            success: true,
            output: String::from_utf8_lossy(&out.stdout).trim().to_string(),
        },
        Ok(out) => CommandOutput {
            success: false,
            output: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        },
        Err(e) => CommandOutput {
            success: false,
            output: e.to_string(),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Git Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Returns true if `dir` is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    run_command_in("git rev-parse --git-dir", Some(dir)).success
}

/// Files changed against `HEAD`, optionally filtered by regex patterns.
///
/// An empty pattern list keeps every file; invalid patterns match nothing.
pub fn git_modified_files(dir: &Path, patterns: &[&str]) -> Vec<String> {
    if !is_git_repo(dir) {
        return Vec::new();
    }

    let result = run_command_in("git diff --name-only HEAD", Some(dir));
    if !result.success {
        return Vec::new();
    }

    let compiled: Vec<Regex> = patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "Ignoring invalid file pattern");
                None
            }
        })
        .collect();

    result
        .output
        .lines()
        .filter(|line| !line.is_empty())
        .filter(|file| patterns.is_empty() || compiled.iter().any(|re| re.is_match(file)))
        .map(str::to_string)
        .collect()
}

/// Basename of the git top-level directory containing `dir`.
pub fn git_repo_name(dir: &Path) -> Option<String> {
    let result = run_command_in("git rev-parse --show-toplevel", Some(dir));
    if !result.success {
        return None;
    }
    basename(&PathBuf::from(result.output))
}

/// Project name for `dir`: git repo name, else the directory's own basename.
pub fn project_name(dir: &Path) -> Option<String> {
    git_repo_name(dir).or_else(|| basename(dir))
}

fn basename(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| !name.is_empty())
}
