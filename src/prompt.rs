//! Confirmation contract.
//!
//! The orchestrator never reads the terminal itself: the CLI injects a
//! callback that receives the classified file lists and the honesty policy
//! and returns a continue/abort decision. This module holds the pieces both
//! sides share.

use std::sync::OnceLock;

use regex::Regex;

/// The fixed question asked when no course-specific one is configured.
pub const DEFAULT_HONESTY_QUESTION: &str = "Keeping in mind the course's policy on academic \
     honesty, are you sure you want to submit these files (yes/no)? ";

/// Honesty-confirmation policy for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Honesty {
    /// Do not ask; always continue.
    Skip,
    /// Ask the fixed default question.
    Default,
    /// Ask a course-specific question verbatim.
    Custom(String),
}

impl Honesty {
    /// The question to ask, or `None` when confirmation is skipped.
    pub fn question(&self) -> Option<&str> {
        match self {
            Honesty::Skip => None,
            Honesty::Default => Some(DEFAULT_HONESTY_QUESTION),
            Honesty::Custom(question) => Some(question),
        }
    }
}

/// Whether an answer accepts the submission.
///
/// Only `y` or `yes`, case-insensitive, optionally surrounded by whitespace.
/// Anything else declines, including empty input and end-of-input.
pub fn is_affirmative(answer: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*(?:y|yes)\s*$").unwrap())
        .is_match(answer)
}
