//! The package manager resolution cascade.
//!
//! ## Priority
//!
//! ```text
//! 1. environment     CLAUDE_PACKAGE_MANAGER
//! 2. project-config  <project>/.claude/package-manager.json
//! 3. package.json    "packageManager": "pnpm@8.6.0"
//! 4. lock-file       pnpm-lock.yaml > bun.lockb > yarn.lock > package-lock.json
//! 5. global-config   ~/.claude/package-manager.json
//! 6. fallback        first installed manager in the fallback order
//! 7. default         npm
//! ```
//!
//! Tiers are independent functions listed in [`CASCADE`]; the first one that
//! returns a manager wins. Reordering the cascade means reordering that list.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::registry::{PackageManagerDescriptor, PackageManagerName, DETECTION_PRIORITY};
use super::signals::{detect_from_lock_file, read_package_json, read_preference};
use crate::config::HookEnv;
use crate::storage::StorageConfig;
use crate::system::CommandProbe;

/// Which tier produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResolutionSource {
    #[serde(rename = "environment")]
    Environment,
    #[serde(rename = "project-config")]
    ProjectConfig,
    #[serde(rename = "package.json")]
    PackageJson,
    #[serde(rename = "lock-file")]
    LockFile,
    #[serde(rename = "global-config")]
    GlobalConfig,
    #[serde(rename = "fallback")]
    Fallback,
    #[serde(rename = "default")]
    Default,
}

impl ResolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionSource::Environment => "environment",
            ResolutionSource::ProjectConfig => "project-config",
            ResolutionSource::PackageJson => "package.json",
            ResolutionSource::LockFile => "lock-file",
            ResolutionSource::GlobalConfig => "global-config",
            ResolutionSource::Fallback => "fallback",
            ResolutionSource::Default => "default",
        }
    }

    /// True when no explicit signal chose the manager.
    pub fn is_guess(self) -> bool {
        matches!(self, ResolutionSource::Fallback | ResolutionSource::Default)
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one resolution call. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub name: PackageManagerName,
    pub config: &'static PackageManagerDescriptor,
    pub source: ResolutionSource,
}

impl Resolution {
    fn new(name: PackageManagerName, source: ResolutionSource) -> Self {
        Self {
            name,
            config: name.descriptor(),
            source,
        }
    }
}

type Tier = fn(
    &PackageManagerResolver<'_>,
    &Path,
    &[PackageManagerName],
) -> Option<PackageManagerName>;

/// Resolution order. The `default` tier is implicit and always matches.
const CASCADE: [(ResolutionSource, Tier); 6] = [
    (ResolutionSource::Environment, environment_tier),
    (ResolutionSource::ProjectConfig, project_config_tier),
    (ResolutionSource::PackageJson, package_json_tier),
    (ResolutionSource::LockFile, lock_file_tier),
    (ResolutionSource::GlobalConfig, global_config_tier),
    (ResolutionSource::Fallback, installed_tier),
];

/// Picks the package manager for a project.
pub struct PackageManagerResolver<'a> {
    storage: &'a StorageConfig,
    probe: &'a dyn CommandProbe,
    env_override: Option<String>,
}

impl<'a> PackageManagerResolver<'a> {
    /// `env_override` is the raw value of `CLAUDE_PACKAGE_MANAGER`, if any.
    pub fn new(
        storage: &'a StorageConfig,
        probe: &'a dyn CommandProbe,
        env_override: Option<String>,
    ) -> Self {
        Self {
            storage,
            probe,
            env_override,
        }
    }

    /// Reads the override from the process environment.
    pub fn from_env(storage: &'a StorageConfig, probe: &'a dyn CommandProbe) -> Self {
        Self::new(storage, probe, HookEnv::from_env().package_manager)
    }

    pub fn env_override(&self) -> Option<&str> {
        self.env_override.as_deref()
    }

    /// Runs the cascade with [`DETECTION_PRIORITY`] as fallback order.
    pub fn resolve_default(&self, project_dir: &Path) -> Resolution {
        self.resolve(project_dir, &DETECTION_PRIORITY)
    }

    /// Runs the cascade, stopping at the first tier that matches.
    pub fn resolve(&self, project_dir: &Path, fallback_order: &[PackageManagerName]) -> Resolution {
        let resolution = CASCADE
            .iter()
            .find_map(|(source, tier)| {
                tier(self, project_dir, fallback_order).map(|name| Resolution::new(name, *source))
            })
            .unwrap_or_else(|| Resolution::new(PackageManagerName::Npm, ResolutionSource::Default));

        tracing::debug!(
            project = %project_dir.display(),
            package_manager = %resolution.name,
            source = %resolution.source,
            "Resolved package manager"
        );
        resolution
    }

    /// Installed managers, in registry order.
    pub fn available(&self) -> Vec<PackageManagerName> {
        super::available_package_managers(self.probe)
    }
}

fn environment_tier(
    resolver: &PackageManagerResolver<'_>,
    _project_dir: &Path,
    _fallback_order: &[PackageManagerName],
) -> Option<PackageManagerName> {
    resolver.env_override().and_then(PackageManagerName::parse)
}

fn project_config_tier(
    _resolver: &PackageManagerResolver<'_>,
    project_dir: &Path,
    _fallback_order: &[PackageManagerName],
) -> Option<PackageManagerName> {
    read_preference(&StorageConfig::project_package_manager_file(project_dir)).found()
}

fn package_json_tier(
    _resolver: &PackageManagerResolver<'_>,
    project_dir: &Path,
    _fallback_order: &[PackageManagerName],
) -> Option<PackageManagerName> {
    read_package_json(project_dir).found()
}

fn lock_file_tier(
    _resolver: &PackageManagerResolver<'_>,
    project_dir: &Path,
    _fallback_order: &[PackageManagerName],
) -> Option<PackageManagerName> {
    detect_from_lock_file(project_dir)
}

fn global_config_tier(
    resolver: &PackageManagerResolver<'_>,
    _project_dir: &Path,
    _fallback_order: &[PackageManagerName],
) -> Option<PackageManagerName> {
    read_preference(&resolver.storage.global_package_manager_file()).found()
}

fn installed_tier(
    resolver: &PackageManagerResolver<'_>,
    _project_dir: &Path,
    fallback_order: &[PackageManagerName],
) -> Option<PackageManagerName> {
    fallback_order
        .iter()
        .copied()
        .find(|pm| resolver.probe.exists(pm.as_str()))
}
