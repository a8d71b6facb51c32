//! PreCompact: log the compaction and mark the active session record.

use std::io::Write;

use hookkit_core::timefmt::local_now;
use hookkit_core::SessionStore;

use crate::context::{emit, HookContext};

const TAG: &str = "[PreCompact]";

pub fn run(ctx: &HookContext, out: &mut dyn Write) -> Result<(), String> {
    let store = SessionStore::new(ctx.storage.clone());
    let marker = store.record_compaction(&local_now())?;

    tracing::debug!(
        log = %marker.log_file.display(),
        annotated = ?marker.annotated,
        "Recorded compaction"
    );
    emit(out, format!("{} State saved before compaction", TAG));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{context, output};
    use hookkit_core::fs_utils::{read_file, write_file};
    use hookkit_core::HookEnv;
    use tempfile::TempDir;

    #[test]
    fn test_logs_and_marks_active_record() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, HookEnv::default(), &[]);
        let record = ctx.storage.sessions_dir().join("2026-01-15-abcd1234-session.tmp");
        write_file(&record, "# Session\n").unwrap();
        let mut buf = Vec::new();

        run(&ctx, &mut buf).unwrap();

        assert_eq!(output(buf), "[PreCompact] State saved before compaction\n");
        let log = read_file(&ctx.storage.compaction_log_file()).unwrap();
        assert!(log.ends_with("] Context compaction triggered\n"));
        let content = read_file(&record).unwrap();
        assert!(content.contains("**[Compaction occurred at "));
    }

    #[test]
    fn test_without_sessions_only_logs() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, HookEnv::default(), &[]);
        let mut buf = Vec::new();

        run(&ctx, &mut buf).unwrap();

        assert!(ctx.storage.compaction_log_file().exists());
    }
}
