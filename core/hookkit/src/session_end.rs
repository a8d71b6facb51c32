//! Stop: create or refresh today's session record.

use std::io::Write;

use hookkit_core::sessions::short_session_id;
use hookkit_core::system::project_name;
use hookkit_core::timefmt::local_now;
use hookkit_core::{SessionEndOutcome, SessionStore};

use crate::context::{emit, HookContext};

const TAG: &str = "[SessionEnd]";

pub fn run(ctx: &HookContext, out: &mut dyn Write) -> Result<(), String> {
    let short_id = short_session_id(ctx.env.session_id.as_deref(), || project_name(&ctx.cwd));
    let store = SessionStore::new(ctx.storage.clone());

    match store.end_session(&short_id, &local_now())? {
        SessionEndOutcome::Created(path) => {
            emit(out, format!("{} Created session file: {}", TAG, path.display()));
        }
        SessionEndOutcome::Updated(path) => {
            emit(out, format!("{} Updated session file: {}", TAG, path.display()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{context, env_with, output};
    use hookkit_core::{find_files, FindOptions};
    use tempfile::TempDir;

    #[test]
    fn test_creates_then_updates_one_record() {
        let temp = TempDir::new().unwrap();
        let ctx = context(
            &temp,
            env_with(&[("CLAUDE_SESSION_ID", "0f1e2d3c-aaaa-bbbb-cccc-1234abcd5678")]),
            &[],
        );

        let mut first = Vec::new();
        run(&ctx, &mut first).unwrap();
        let mut second = Vec::new();
        run(&ctx, &mut second).unwrap();

        assert!(output(first).starts_with("[SessionEnd] Created session file: "));
        let second = output(second);
        assert!(second.starts_with("[SessionEnd] Updated session file: "));
        assert!(second.trim_end().ends_with("-abcd5678-session.tmp"));

        let records = find_files(
            &ctx.storage.sessions_dir(),
            "*-session.tmp",
            FindOptions::default(),
        );
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_without_session_id_uses_directory_name() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, env_with(&[]), &[]);
        let mut buf = Vec::new();

        run(&ctx, &mut buf).unwrap();

        if !hookkit_core::system::is_git_repo(&ctx.cwd) {
            assert!(output(buf).trim_end().ends_with("-project-session.tmp"));
        }
    }
}
