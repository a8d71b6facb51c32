//! Continuous-learning session evaluation.
//!
//! Decides whether a finished session was long enough to be worth mining for
//! reusable patterns. Only reports; skills are written by the model, not here.

use std::path::{Path, PathBuf};

use crate::config::LearningConfig;
use crate::error::Result;
use crate::fs_utils::{count_in_file, ensure_dir};
use crate::patterns::RE_USER_MESSAGE;
use crate::storage::StorageConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// No transcript path given, or the file does not exist.
    NoTranscript,
    TooShort {
        messages: usize,
    },
    Evaluate {
        messages: usize,
        learned_dir: PathBuf,
    },
}

pub struct SessionEvaluator {
    min_session_length: usize,
    learned_dir: PathBuf,
}

impl SessionEvaluator {
    pub fn new(storage: &StorageConfig, config: &LearningConfig) -> Self {
        Self {
            min_session_length: config.min_session_length() as usize,
            learned_dir: config.learned_skills_dir(storage),
        }
    }

    /// Loads `LearningConfig` from its default location.
    pub fn load(storage: &StorageConfig) -> Self {
        Self::new(storage, &LearningConfig::load(storage))
    }

    pub fn learned_dir(&self) -> &Path {
        &self.learned_dir
    }

    pub fn evaluate(&self, transcript: Option<&Path>) -> Result<EvaluationOutcome> {
        ensure_dir(&self.learned_dir)?;

        let Some(transcript) = transcript.filter(|path| path.is_file()) else {
            return Ok(EvaluationOutcome::NoTranscript);
        };

        let messages = count_in_file(transcript, &RE_USER_MESSAGE);
        tracing::debug!(
            transcript = %transcript.display(),
            messages,
            min = self.min_session_length,
            "Evaluated session transcript"
        );

        if messages < self.min_session_length {
            Ok(EvaluationOutcome::TooShort { messages })
        } else {
            Ok(EvaluationOutcome::Evaluate {
                messages,
                learned_dir: self.learned_dir.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_utils::write_file;
    use tempfile::TempDir;

    fn transcript(dir: &Path, user_messages: usize) -> PathBuf {
        let mut lines = String::new();
        for i in 0..user_messages {
            lines.push_str(&format!("{{\"type\":\"user\",\"n\":{}}}\n", i));
            lines.push_str("{\"type\":\"assistant\"}\n");
        }
        let path = dir.join("transcript.jsonl");
        write_file(&path, &lines).unwrap();
        path
    }

    #[test]
    fn test_missing_transcript() {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        let evaluator = SessionEvaluator::load(&storage);

        assert_eq!(evaluator.evaluate(None).unwrap(), EvaluationOutcome::NoTranscript);
        assert_eq!(
            evaluator
                .evaluate(Some(&temp.path().join("missing.jsonl")))
                .unwrap(),
            EvaluationOutcome::NoTranscript
        );
        // The learned dir is created regardless.
        assert!(storage.learned_skills_dir().is_dir());
    }

    #[test]
    fn test_short_session_uses_default_minimum() {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        let path = transcript(temp.path(), 9);

        let outcome = SessionEvaluator::load(&storage).evaluate(Some(&path)).unwrap();
        assert_eq!(outcome, EvaluationOutcome::TooShort { messages: 9 });
    }

    #[test]
    fn test_long_session_is_evaluated() {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        let path = transcript(temp.path(), 10);

        let outcome = SessionEvaluator::load(&storage).evaluate(Some(&path)).unwrap();
        assert_eq!(
            outcome,
            EvaluationOutcome::Evaluate {
                messages: 10,
                learned_dir: storage.learned_skills_dir(),
            }
        );
    }

    #[test]
    fn test_config_overrides_minimum_and_dir() {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        write_file(
            &storage.learning_config_file(),
            r#"{"min_session_length": 2, "learned_skills_path": "~/skills-out"}"#,
        )
        .unwrap();
        let path = transcript(temp.path(), 3);

        let evaluator = SessionEvaluator::load(&storage);
        assert_eq!(evaluator.learned_dir(), temp.path().join("skills-out"));
        assert_eq!(
            evaluator.evaluate(Some(&path)).unwrap(),
            EvaluationOutcome::Evaluate {
                messages: 3,
                learned_dir: temp.path().join("skills-out"),
            }
        );
        assert!(temp.path().join("skills-out").is_dir());
    }
}
