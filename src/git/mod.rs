//! Git integration layer.
//!
//! This module wraps the actual backend implementation (`cli_backend`)
//! and re-exports only the stable public API.
//!
//! The backend drives the external `git` binary as a subprocess and reasons
//! only about exit codes and captured output; nothing else in the codebase
//! touches raw process plumbing. Swapping in another backend (e.g. a library
//! binding) would not affect the rest of the crate.

mod cli_backend;

pub use cli_backend::{
    COMMIT_MESSAGE, StagedRepo, StudentGitClient, TemplateGitClient, assert_git_installed,
};
