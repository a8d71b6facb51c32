//! Package manager detection and selection for npm, pnpm, yarn and bun.
//!
//! - `registry`: the fixed descriptor set and detection priority
//! - `signals`: readers for preference files, `package.json` and lock files
//! - `resolver`: the resolution cascade
//! - `preference`: persisting global/project preferences
//! - `commands`: command synthesis and the selection prompt

mod commands;
mod preference;
mod registry;
mod resolver;
mod signals;

pub use commands::{command_pattern, selection_prompt};
pub use preference::{set_preferred_package_manager, set_project_package_manager, PreferenceRecord};
pub use registry::{PackageManagerDescriptor, PackageManagerName, DETECTION_PRIORITY};
pub use resolver::{PackageManagerResolver, Resolution, ResolutionSource};
pub use signals::{
    detect_from_lock_file, detect_from_package_json, read_package_json, read_preference,
    SignalOutcome,
};

use crate::system::CommandProbe;

/// Installed package managers, in registry order (npm, pnpm, yarn, bun).
pub fn available_package_managers(probe: &dyn CommandProbe) -> Vec<PackageManagerName> {
    PackageManagerName::ALL
        .into_iter()
        .filter(|pm| probe.exists(pm.as_str()))
        .collect()
}
