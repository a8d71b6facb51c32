//! SessionStart: surface recent session records, learned skills and the
//! package manager in use. Read-only.

use std::io::Write;

use hookkit_core::package_manager::selection_prompt;
use hookkit_core::{LearningConfig, PackageManagerResolver, SessionStore};

use crate::context::{emit, HookContext};

const TAG: &str = "[SessionStart]";

pub fn run(ctx: &HookContext, out: &mut dyn Write) -> Result<(), String> {
    let learned_dir = LearningConfig::load(&ctx.storage).learned_skills_dir(&ctx.storage);
    let store = SessionStore::new(ctx.storage.clone());
    let report = store.scan_recent(&learned_dir);

    if let Some(latest) = report.latest() {
        emit(
            out,
            format!("{} Found {} recent session(s)", TAG, report.recent_sessions.len()),
        );
        emit(out, format!("{} Latest: {}", TAG, latest.path.display()));
    }

    if report.learned_skills > 0 {
        emit(
            out,
            format!(
                "{} {} learned skill(s) available in {}",
                TAG,
                report.learned_skills,
                report.learned_skills_dir.display()
            ),
        );
    }

    let resolver = PackageManagerResolver::new(
        &ctx.storage,
        ctx.probe.as_ref(),
        ctx.env.package_manager.clone(),
    );
    let pm = resolver.resolve_default(&ctx.cwd);
    emit(out, format!("{} Package manager: {} ({})", TAG, pm.name, pm.source));

    if pm.source.is_guess() {
        emit(out, format!("{} No package manager preference found.", TAG));
        let _ = write!(out, "{}", selection_prompt(&resolver.available(), pm.name));
    }

    Ok(())
}
