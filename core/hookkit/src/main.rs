//! hookkit: Claude Code hook handlers for session continuity.
//!
//! Called directly by hooks configured in ~/.claude/settings.json.
//!
//! ## Subcommands
//!
//! - `session-start`: report recent sessions, learned skills, package manager
//! - `session-end`: create or refresh today's session record (reads stdin)
//! - `pre-compact`: log compaction and mark the active record
//! - `suggest-compact`: count tool calls, suggest `/compact` (reads stdin)
//! - `evaluate-session`: continuous-learning length check (reads stdin)
//!
//! Every subcommand exits 0, including on failure, so a broken hook never
//! blocks the session. Failures go to stderr and the log file.

mod context;
mod evaluate_session;
mod pre_compact;
mod session_end;
mod session_start;
mod suggest_compact;

use std::io;

use clap::{Parser, Subcommand};
use hookkit::logging;

use crate::context::{read_stdin, HookContext, HookInput};

#[derive(Parser)]
#[command(name = "hookkit")]
#[command(about = "Claude Code session continuity hooks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// SessionStart hook
    SessionStart,
    /// Stop hook: persist the session record
    SessionEnd,
    /// PreCompact hook
    PreCompact,
    /// PreToolUse hook: strategic compaction advisor
    SuggestCompact,
    /// Stop hook: continuous-learning session evaluation
    EvaluateSession,
}

impl Commands {
    fn tag(self) -> &'static str {
        match self {
            Commands::SessionStart => "SessionStart",
            Commands::SessionEnd => "SessionEnd",
            Commands::PreCompact => "PreCompact",
            Commands::SuggestCompact => "StrategicCompact",
            Commands::EvaluateSession => "ContinuousLearning",
        }
    }
}

fn main() {
    let _logging_guard = logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    let command = cli.command;
    if let Err(e) = run(command) {
        tracing::error!(hook = command.tag(), error = %e, "hookkit hook failed");
        eprintln!("[{}] Error: {}", command.tag(), e);
    }
}

fn run(command: Commands) -> Result<(), String> {
    let ctx = HookContext::from_env()?;
    let mut stderr = io::stderr();

    match command {
        Commands::SessionStart => session_start::run(&ctx, &mut stderr),
        Commands::SessionEnd => {
            read_stdin();
            session_end::run(&ctx, &mut stderr)
        }
        Commands::PreCompact => pre_compact::run(&ctx, &mut stderr),
        Commands::SuggestCompact => {
            read_stdin();
            suggest_compact::run(&ctx, &mut stderr)
        }
        Commands::EvaluateSession => {
            let input = HookInput::parse(&read_stdin());
            evaluate_session::run(&ctx, &input, &mut stderr)
        }
    }
}
