//! Everything a hook reads from its surroundings, gathered once in `main`.
//!
//! Handlers take a [`HookContext`] plus a writer for user-facing messages, so
//! tests can point them at a temp home, a fake `PATH` and a buffer.

use std::env;
use std::fmt::Display;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use hookkit_core::{CommandProbe, HookEnv, StorageConfig, SystemProbe};
use serde::Deserialize;

pub struct HookContext {
    pub storage: StorageConfig,
    pub env: HookEnv,
    pub cwd: PathBuf,
    pub parent_pid: Option<u32>,
    pub probe: Box<dyn CommandProbe>,
}

impl HookContext {
    pub fn from_env() -> Result<Self, String> {
        let storage = StorageConfig::from_env().map_err(String::from)?;
        let cwd = env::current_dir().map_err(|e| format!("Failed to read cwd: {}", e))?;
        Ok(Self {
            storage,
            env: HookEnv::from_env(),
            cwd,
            parent_pid: get_ppid(),
            probe: Box::new(SystemProbe),
        })
    }
}

/// Writes one user-facing line. A closed stderr is not worth failing over.
pub fn emit(out: &mut dyn Write, message: impl Display) {
    let _ = writeln!(out, "{}", message);
}

/// The subset of the hook payload hookkit uses.
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
}

impl HookInput {
    /// Unparseable or empty payloads read as "no fields".
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring unparseable hook input");
            Self::default()
        })
    }
}

/// Reads stdin to end. Claude Code blocks on the pipe until it is consumed.
pub fn read_stdin() -> String {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        tracing::warn!(error = %e, "Failed to read stdin");
    }
    input
}

fn get_ppid() -> Option<u32> {
    #[cfg(unix)]
    {
        // SAFETY: getppid() cannot fail and has no preconditions.
        #[allow(unsafe_code)]
        Some(unsafe { libc::getppid() } as u32)
    }
    #[cfg(not(unix))]
    {
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    pub struct Installed(pub &'static [&'static str]);

    impl CommandProbe for Installed {
        fn exists(&self, name: &str) -> bool {
            self.0.iter().any(|installed| *installed == name)
        }
    }

    /// Context rooted in `temp`, with `<temp>/project` as cwd.
    pub fn context(temp: &TempDir, env: HookEnv, installed: &'static [&'static str]) -> HookContext {
        let cwd = temp.path().join("project");
        std::fs::create_dir_all(&cwd).unwrap();
        HookContext {
            storage: StorageConfig::with_root(temp.path().join("home")),
            env,
            cwd,
            parent_pid: Some(4242),
            probe: Box::new(Installed(installed)),
        }
    }

    pub fn env_with(vars: &[(&str, &str)]) -> HookEnv {
        HookEnv::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    pub fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}
