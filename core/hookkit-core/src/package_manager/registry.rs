//! Static catalog of supported package managers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HookkitError;

/// A supported package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerName {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lock-file scan order, also the default fallback order. Faster/stricter
/// tools are preferred over npm when signals are missing.
pub const DETECTION_PRIORITY: [PackageManagerName; 4] = [
    PackageManagerName::Pnpm,
    PackageManagerName::Bun,
    PackageManagerName::Yarn,
    PackageManagerName::Npm,
];

impl PackageManagerName {
    /// Registry order, used for listings.
    pub const ALL: [PackageManagerName; 4] = [
        PackageManagerName::Npm,
        PackageManagerName::Pnpm,
        PackageManagerName::Yarn,
        PackageManagerName::Bun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PackageManagerName::Npm => "npm",
            PackageManagerName::Pnpm => "pnpm",
            PackageManagerName::Yarn => "yarn",
            PackageManagerName::Bun => "bun",
        }
    }

    /// Exact, case-sensitive lookup. Returns `None` for anything unsupported.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pm| pm.as_str() == value)
    }

    pub fn descriptor(self) -> &'static PackageManagerDescriptor {
        match self {
            PackageManagerName::Npm => &NPM,
            PackageManagerName::Pnpm => &PNPM,
            PackageManagerName::Yarn => &YARN,
            PackageManagerName::Bun => &BUN,
        }
    }

    /// One-line description for help output.
    pub fn summary(self) -> &'static str {
        match self {
            PackageManagerName::Npm => "Node Package Manager (ships with Node.js)",
            PackageManagerName::Pnpm => "Fast, disk space efficient package manager",
            PackageManagerName::Yarn => "Classic Yarn package manager",
            PackageManagerName::Bun => "All-in-one JavaScript runtime & toolkit",
        }
    }
}

impl fmt::Display for PackageManagerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManagerName {
    type Err = HookkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| HookkitError::UnknownPackageManager(s.to_string()))
    }
}

/// Identity, lock file and command templates of one package manager.
#[derive(Debug, PartialEq, Eq)]
pub struct PackageManagerDescriptor {
    pub name: PackageManagerName,
    pub lock_file: &'static str,
    pub install_cmd: &'static str,
    pub run_cmd: &'static str,
    pub exec_cmd: &'static str,
    pub test_cmd: &'static str,
    pub build_cmd: &'static str,
    pub dev_cmd: &'static str,
}

static NPM: PackageManagerDescriptor = PackageManagerDescriptor {
    name: PackageManagerName::Npm,
    lock_file: "package-lock.json",
    install_cmd: "npm install",
    run_cmd: "npm run",
    exec_cmd: "npx",
    test_cmd: "npm test",
    build_cmd: "npm run build",
    dev_cmd: "npm run dev",
};

static PNPM: PackageManagerDescriptor = PackageManagerDescriptor {
    name: PackageManagerName::Pnpm,
    lock_file: "pnpm-lock.yaml",
    install_cmd: "pnpm install",
    run_cmd: "pnpm",
    exec_cmd: "pnpm dlx",
    test_cmd: "pnpm test",
    build_cmd: "pnpm build",
    dev_cmd: "pnpm dev",
};

static YARN: PackageManagerDescriptor = PackageManagerDescriptor {
    name: PackageManagerName::Yarn,
    lock_file: "yarn.lock",
    install_cmd: "yarn",
    run_cmd: "yarn",
    exec_cmd: "yarn dlx",
    test_cmd: "yarn test",
    build_cmd: "yarn build",
    dev_cmd: "yarn dev",
};

static BUN: PackageManagerDescriptor = PackageManagerDescriptor {
    name: PackageManagerName::Bun,
    lock_file: "bun.lockb",
    install_cmd: "bun install",
    run_cmd: "bun run",
    exec_cmd: "bunx",
    test_cmd: "bun test",
    build_cmd: "bun run build",
    dev_cmd: "bun run dev",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_name() {
        for pm in PackageManagerName::ALL {
            assert_eq!(PackageManagerName::parse(pm.as_str()), Some(pm));
            assert_eq!(pm.descriptor().name, pm);
        }
    }

    #[test]
    fn test_parse_is_strict() {
        assert_eq!(PackageManagerName::parse("PNPM"), None);
        assert_eq!(PackageManagerName::parse("pnpm@8"), None);
        assert_eq!(PackageManagerName::parse(""), None);
        assert!(matches!(
            "invalid-pm".parse::<PackageManagerName>(),
            Err(HookkitError::UnknownPackageManager(name)) if name == "invalid-pm"
        ));
    }

    #[test]
    fn test_detection_priority_order() {
        let names: Vec<_> = DETECTION_PRIORITY.iter().map(|pm| pm.as_str()).collect();
        assert_eq!(names, vec!["pnpm", "bun", "yarn", "npm"]);
    }

    #[test]
    fn test_lock_files() {
        assert_eq!(PackageManagerName::Npm.descriptor().lock_file, "package-lock.json");
        assert_eq!(PackageManagerName::Pnpm.descriptor().lock_file, "pnpm-lock.yaml");
        assert_eq!(PackageManagerName::Yarn.descriptor().lock_file, "yarn.lock");
        assert_eq!(PackageManagerName::Bun.descriptor().lock_file, "bun.lockb");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PackageManagerName::Pnpm).unwrap();
        assert_eq!(json, "\"pnpm\"");
        let back: PackageManagerName = serde_json::from_str("\"bun\"").unwrap();
        assert_eq!(back, PackageManagerName::Bun);
    }
}
