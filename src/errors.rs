//! Domain error taxonomy.
//!
//! Every failure a student can act on gets its own variant with a fixed,
//! user-facing message. Anything outside this taxonomy (network failures
//! during preflight, I/O surprises) stays an `anyhow::Error` and is rendered
//! by the CLI with a generic message instead.

use thiserror::Error;

/// Errors with user-tailored messages.
///
/// The CLI downcasts the `anyhow` chain to this type to decide what to print;
/// the message text here is the full terminal output for that failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The `git` binary could not be spawned at all.
    #[error("It looks like git is not installed. Please install git then try again.")]
    GitMissing,

    /// The identifier did not match the `org/template-submitter` grammar.
    #[error("Invalid identifier \"{0}\".")]
    InvalidIdentifier(String),

    /// Cloning the assignment template failed.
    #[error("Failed to clone \"{remote}\".")]
    CloneFailed { remote: String },

    /// Cloning the per-student repository failed. The most common cause is
    /// that the student never accepted the assignment, so the hint names it.
    #[error("Failed to clone \"{remote}\". Did you accept assignment {template_repo}?")]
    StudentCloneFailed {
        remote: String,
        template_repo: String,
    },

    /// `add --all` staged nothing.
    #[error("No files in this directory are expected for submission.")]
    EmptySubmission,

    /// The student answered no (or EOF) to the confirmation prompt.
    #[error("No files were submitted.")]
    Declined,

    /// add/commit/push failed after confirmation. Step-level detail is only
    /// logged at debug level, never shown to the student.
    #[error("Failed to submit.")]
    SubmissionFailed,

    /// The submission service published an announcement; its text is shown
    /// verbatim and the run aborts before touching the student's directory.
    #[error("{0}")]
    Announcement(String),

    #[error(
        "You have an unknown version of submit50. Please visit our status page \
         https://cs50.statuspage.io for more information."
    )]
    UnknownVersion,

    #[error("You have an outdated version of submit50. Please upgrade.")]
    OutdatedVersion,
}
