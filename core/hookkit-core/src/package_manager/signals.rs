//! Readers for the file-backed signals the resolution cascade consults.
//!
//! Each reader returns a [`SignalOutcome`] rather than an `Option`, so callers
//! (and `setup-pm --detect`) can tell "no file" from "file is broken" from
//! "file names a manager we don't support". The cascade only acts on `Found`.

use std::path::Path;

use serde_json::Value;

use super::registry::{PackageManagerName, DETECTION_PRIORITY};
use crate::fs_utils::read_file;

/// Result of reading one signal source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalOutcome {
    Found(PackageManagerName),
    Absent,
    Malformed(String),
    Unsupported(String),
}

impl SignalOutcome {
    pub fn found(&self) -> Option<PackageManagerName> {
        match self {
            SignalOutcome::Found(pm) => Some(*pm),
            _ => None,
        }
    }

    fn from_name(value: &str) -> Self {
        match PackageManagerName::parse(value) {
            Some(pm) => SignalOutcome::Found(pm),
            None => SignalOutcome::Unsupported(value.to_string()),
        }
    }
}

/// Reads the `packageManager` field of a JSON file, passing the raw string
/// through `normalize` before validation.
fn read_manager_field(path: &Path, normalize: fn(&str) -> &str) -> SignalOutcome {
    let Some(content) = read_file(path) else {
        return SignalOutcome::Absent;
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Ignoring malformed JSON");
            return SignalOutcome::Malformed(e.to_string());
        }
    };

    match value.get("packageManager") {
        None | Some(Value::Null) => SignalOutcome::Absent,
        Some(Value::String(raw)) if raw.is_empty() => SignalOutcome::Absent,
        Some(Value::String(raw)) => SignalOutcome::from_name(normalize(raw)),
        Some(other) => SignalOutcome::Malformed(format!(
            "packageManager must be a string, got {}",
            other
        )),
    }
}

/// Reads a persisted preference file (global or project scope).
pub fn read_preference(path: &Path) -> SignalOutcome {
    read_manager_field(path, |raw| raw)
}

/// Reads `package.json`'s `packageManager` field. A version suffix
/// (`pnpm@8.6.0`) is dropped; only the name before `@` counts.
pub fn read_package_json(project_dir: &Path) -> SignalOutcome {
    read_manager_field(&project_dir.join("package.json"), |raw| {
        raw.split('@').next().unwrap_or(raw)
    })
}

/// Manager named by `package.json`, if supported.
pub fn detect_from_package_json(project_dir: &Path) -> Option<PackageManagerName> {
    read_package_json(project_dir).found()
}

/// First lock file present in [`DETECTION_PRIORITY`] order. Filesystem order
/// never matters.
pub fn detect_from_lock_file(project_dir: &Path) -> Option<PackageManagerName> {
    DETECTION_PRIORITY
        .into_iter()
        .find(|pm| project_dir.join(pm.descriptor().lock_file).exists())
}
