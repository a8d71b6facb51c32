//! Persisted package manager preferences.
//!
//! Two independent scopes, same file format:
//!
//! ```json
//! { "packageManager": "pnpm", "setAt": "2026-01-15T09:30:00.000Z" }
//! ```
//!
//! - global: `~/.claude/package-manager.json`
//! - project: `<project>/.claude/package-manager.json`
//!
//! Setters overwrite the whole file; nothing from a previous record survives.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::registry::PackageManagerName;
use crate::error::{HookkitError, Result};
use crate::fs_utils::write_file_atomic;
use crate::storage::StorageConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub package_manager: PackageManagerName,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub set_at: String,
}

impl PreferenceRecord {
    pub fn now(package_manager: PackageManagerName) -> Self {
        Self {
            package_manager,
            set_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Sets the user's global preference.
///
/// Fails with [`HookkitError::UnknownPackageManager`] before touching disk if
/// `name` is not supported.
pub fn set_preferred_package_manager(
    storage: &StorageConfig,
    name: &str,
) -> Result<PreferenceRecord> {
    let pm: PackageManagerName = name.parse()?;
    save(&storage.global_package_manager_file(), pm)
}

/// Sets the preference for a single project.
pub fn set_project_package_manager(name: &str, project_dir: &Path) -> Result<PreferenceRecord> {
    let pm: PackageManagerName = name.parse()?;
    save(&StorageConfig::project_package_manager_file(project_dir), pm)
}

fn save(path: &Path, pm: PackageManagerName) -> Result<PreferenceRecord> {
    let record = PreferenceRecord::now(pm);
    let content = serde_json::to_string_pretty(&record).map_err(|e| HookkitError::Json {
        context: "serializing package manager preference".to_string(),
        source: e,
    })?;
    write_file_atomic(path, &content)?;
    tracing::info!(package_manager = %pm, path = %path.display(), "Saved package manager preference");
    Ok(record)
}
