//! Stop: decide whether the session is worth mining for learned skills.

use std::io::Write;

use hookkit_core::{EvaluationOutcome, SessionEvaluator};

use crate::context::{emit, HookContext, HookInput};

const TAG: &str = "[ContinuousLearning]";

/// `CLAUDE_TRANSCRIPT_PATH` wins over the payload's `transcript_path`.
pub fn run(ctx: &HookContext, input: &HookInput, out: &mut dyn Write) -> Result<(), String> {
    let transcript = ctx
        .env
        .transcript_path
        .as_deref()
        .or(input.transcript_path.as_deref());

    let evaluator = SessionEvaluator::load(&ctx.storage);
    match evaluator.evaluate(transcript)? {
        EvaluationOutcome::NoTranscript => {
            tracing::debug!("No transcript to evaluate");
        }
        EvaluationOutcome::TooShort { messages } => {
            emit(
                out,
                format!("{} Session too short ({} messages), skipping", TAG, messages),
            );
        }
        EvaluationOutcome::Evaluate {
            messages,
            learned_dir,
        } => {
            emit(
                out,
                format!(
                    "{} Session has {} messages - evaluate for extractable patterns",
                    TAG, messages
                ),
            );
            emit(
                out,
                format!("{} Save learned skills to: {}", TAG, learned_dir.display()),
            );
        }
    }
    Ok(())
}
