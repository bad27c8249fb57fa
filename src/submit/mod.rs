//! Submission orchestrator.
//!
//! A linear state machine with no branching loops:
//! validate → clone template → snapshot working copy → reconcile dotfiles →
//! bare-clone student repo → stage → confirm → commit & push. Any step's
//! failure propagates immediately; the only rollback is resource release
//! (the temporary clones and the snapshot remove themselves).

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::dotfiles::copy_dotfiles;
use crate::errors::Error;
use crate::git::{StudentGitClient, TemplateGitClient, assert_git_installed};
use crate::identifier::Identifier;
use crate::progress::with_phase;
use crate::prompt::Honesty;
use crate::staging::WorkingCopy;

/// Default git host; `SUBMIT50_GIT_HOST` overrides it.
pub const DEFAULT_GIT_HOST: &str = "https://github.com";

/// The git host for this run, from the environment or the default.
pub fn git_host_from_env() -> String {
    env::var("SUBMIT50_GIT_HOST").unwrap_or_else(|_| DEFAULT_GIT_HOST.to_string())
}

/// Run-scoped submission parameters. Built once per invocation and threaded
/// through explicitly; there is no process-wide mutable state.
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// The raw `org/template-submitter` identifier, validated by [`submit`].
    pub identifier: String,
    /// The student's working directory. Read, never written.
    pub student_dir: PathBuf,
    /// Base URL all remotes are formed under.
    pub git_host: String,
    /// Confirmation policy passed through to the callback.
    pub honesty: Honesty,
}

impl SubmitOptions {
    pub fn new(identifier: impl Into<String>, student_dir: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            student_dir: student_dir.into(),
            git_host: git_host_from_env(),
            honesty: Honesty::Default,
        }
    }
}

/// A completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub submitter: String,
    pub commit: String,
    pub branch: String,
}

/// Submit the student's working directory for the given assignment.
///
/// `confirm` receives the honesty policy and the classified file lists
/// (included: what the commit will contain; excluded: present but kept out
/// by ignore rules) and decides whether to continue. It is invoked exactly
/// once per attempt, after staging, so the lists reflect exactly what will
/// be committed, including dotfiles just materialized from the template.
/// It is never invoked when nothing is staged.
///
/// # Errors
/// The typed variants of [`Error`], per step; anything else untyped.
pub fn submit<F>(opts: &SubmitOptions, mut confirm: F) -> Result<Submission>
where
    F: FnMut(&Honesty, &[String], &[String]) -> bool,
{
    assert_git_installed()?;
    let identifier = Identifier::parse(&opts.identifier)?;

    info!("fetching configurations from {}", identifier.template_repo());
    let template = TemplateGitClient::new(&identifier, &opts.git_host);
    let template_dir = with_phase("Preparing", || template.clone_shallow())?;

    // Stage inside a disposable copy; the student's real files are only read.
    let staging = WorkingCopy::snapshot(&opts.student_dir)?;
    copy_dotfiles(template_dir.path(), staging.path())?;

    let student = StudentGitClient::new(&identifier, &opts.git_host, staging.path());
    let staged = with_phase("Connecting", || student.clone_bare())?;
    staged.add_all()?;

    let included = staged.tracked_files()?;
    if included.is_empty() {
        return Err(Error::EmptySubmission.into());
    }
    let excluded = staged.untracked_files()?;

    if !confirm(&opts.honesty, &included, &excluded) {
        return Err(Error::Declined.into());
    }

    info!("pushing to {}", student.remote());
    let (commit, branch) = with_phase("Submitting", || staged.commit_and_push())?;

    Ok(Submission {
        submitter: identifier.submitter().to_string(),
        commit,
        branch,
    })
}
