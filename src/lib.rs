//! Crate entry point for **submit50**.
//!
//! This library provides the internal implementation for the `submit50` CLI:
//! packaging a student's working directory and pushing it as a commit to the
//! per-student assignment repository. Each submodule encapsulates one
//! responsibility (identifier parsing, git operations, dotfile
//! reconciliation, the submission state machine, etc.). The `pub use`
//! re-exports make the pieces the CLI and tests need accessible directly
//! from the crate root.

mod cleanup;
mod dotfiles;
mod errors;
mod git;
mod identifier;
mod preflight;
mod progress;
mod prompt;
mod staging;
mod submit;

pub use cleanup::install_interrupt_handler;
pub use dotfiles::DOTFILES;
pub use errors::Error;
pub use git::COMMIT_MESSAGE;
pub use identifier::Identifier;
pub use preflight::{SUBMIT_URL, check_announcements, check_version, http_client};
pub use prompt::{DEFAULT_HONESTY_QUESTION, Honesty, is_affirmative};
pub use submit::{DEFAULT_GIT_HOST, SubmitOptions, Submission, git_host_from_env, submit};
