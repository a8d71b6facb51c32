//! # hookkit-core
//!
//! Core library for hookkit, the Claude Code hook toolkit. It owns two pieces
//! of decision logic that the hook binaries call into:
//!
//! - **Package manager resolution**: a fixed-priority cascade over environment,
//!   project preferences, `package.json`, lock files, global preferences and
//!   installed binaries.
//! - **Session continuity**: per-session markdown records under
//!   `~/.claude/sessions`, recent-session discovery, compaction markers and the
//!   tool-call counter behind the compaction advisor.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Every call is a short-lived
//!   filesystem operation.
//! - **Graceful degradation**: Missing or malformed files read as "absent", never
//!   as errors. Only explicit user requests (setting an unknown package manager)
//!   fail hard.
//! - **Injected roots**: All paths flow from a [`StorageConfig`], so tests run
//!   against temp directories instead of the real home directory.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookkit_core::{PackageManagerResolver, StorageConfig, SystemProbe};
//!
//! let storage = StorageConfig::from_env()?;
//! let resolver = PackageManagerResolver::from_env(&storage, &SystemProbe);
//! let resolution = resolver.resolve_default(std::path::Path::new("."));
//! println!("{} ({})", resolution.name, resolution.source);
//! ```

pub mod compaction;
pub mod config;
pub mod error;
pub mod fs_utils;
pub mod learning;
pub mod package_manager;
pub mod patterns;
pub mod sessions;
pub mod storage;
pub mod system;
pub mod timefmt;

pub use compaction::{Advisory, CompactionAdvisor, Tick};
pub use config::{HookEnv, LearningConfig};
pub use error::{HookkitError, Result};
pub use fs_utils::{find_files, FileMatch, FindOptions};
pub use learning::{EvaluationOutcome, SessionEvaluator};
pub use package_manager::{
    PackageManagerDescriptor, PackageManagerName, PackageManagerResolver, PreferenceRecord,
    Resolution, ResolutionSource, SignalOutcome, DETECTION_PRIORITY,
};
pub use sessions::{CompactionMarker, SessionEndOutcome, SessionStartReport, SessionStore};
pub use storage::StorageConfig;
pub use system::{CommandOutput, CommandProbe, SystemProbe};
