//! PreToolUse: count tool calls and suggest `/compact` at logical intervals.

use std::io::Write;

use hookkit_core::compaction::counter_key;
use hookkit_core::CompactionAdvisor;

use crate::context::{emit, HookContext};

const TAG: &str = "[StrategicCompact]";

pub fn run(ctx: &HookContext, out: &mut dyn Write) -> Result<(), String> {
    let key = counter_key(ctx.env.session_id.as_deref(), ctx.parent_pid);
    let advisor = CompactionAdvisor::new(&ctx.storage, &key, ctx.env.compact_threshold);
    let tick = advisor.tick()?;

    if let Some(advisory) = tick.advisory {
        emit(out, format!("{} {}", TAG, advisory));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{context, env_with, output};
    use tempfile::TempDir;

    #[test]
    fn test_advises_at_threshold_only() {
        let temp = TempDir::new().unwrap();
        let ctx = context(
            &temp,
            env_with(&[("CLAUDE_SESSION_ID", "sess-1"), ("COMPACT_THRESHOLD", "2")]),
            &[],
        );

        let mut first = Vec::new();
        run(&ctx, &mut first).unwrap();
        assert_eq!(output(first), "");

        let mut second = Vec::new();
        run(&ctx, &mut second).unwrap();
        assert!(output(second).starts_with("[StrategicCompact] 2 tool calls reached"));

        let mut third = Vec::new();
        run(&ctx, &mut third).unwrap();
        assert_eq!(output(third), "");

        assert!(ctx.storage.counter_file("sess-1").exists());
    }

    #[test]
    fn test_counter_keyed_by_parent_pid_without_session() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, env_with(&[]), &[]);
        run(&ctx, &mut Vec::new()).unwrap();
        assert!(ctx.storage.counter_file("4242").exists());
    }
}
