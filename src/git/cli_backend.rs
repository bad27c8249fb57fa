use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Result, anyhow};
use tracing::{debug, info};

use crate::cleanup::TrackedTempDir;
use crate::errors::Error;
use crate::identifier::Identifier;

/// Fixed commit message; submissions are never customized per run.
pub const COMMIT_MESSAGE: &str = "Automated commit by submit50";

/// Identity and credential defaults, applied as `-c` arguments only when the
/// corresponding key is not already configured. A contributor's existing
/// identity is never clobbered.
const CONFIG_DEFAULTS: &[(&str, &str)] = &[
    ("user.name", "submit50"),
    ("user.email", "submit50@users.noreply.github.com"),
    ("credential.helper", "cache"),
];

/// Ensure that the `git` binary is installed and on `PATH`.
///
/// Runs before any temporary directory is created, so nothing needs cleanup
/// when it fails.
///
/// # Errors
/// Returns [`Error::GitMissing`] if `git` cannot be spawned.
pub fn assert_git_installed() -> Result<()> {
    run_git(&["--version"], None).map(drop)
}

/// Run `git` with the given arguments and return its trimmed stdout.
///
/// `overlay` supplies explicit `GIT_DIR`/`GIT_WORK_TREE` environment
/// overrides so staged operations run against the caller's directory without
/// it being a repository itself. Clones and config probes run without them.
///
/// Commands are logged at info level, their output at debug level; a
/// non-zero exit becomes an error carrying the exit status, with stderr
/// visible only in debug logs.
fn run_git(args: &[&str], overlay: Option<(&Path, &Path)>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some((git_dir, work_tree)) = overlay {
        cmd.env("GIT_DIR", git_dir)
            .env("GIT_WORK_TREE", work_tree)
            .current_dir(work_tree);
    }

    info!("git {}", args.join(" "));
    let output = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow!(Error::GitMissing)
        } else {
            e.into()
        }
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        debug!("{}", stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        debug!("{}", stderr.trim_end());
    }

    if !output.status.success() {
        return Err(anyhow!("git {} exited with {}", args.join(" "), output.status));
    }
    Ok(stdout.trim_end().to_string())
}

fn remote_for(git_host: &str, repo: &str) -> String {
    format!("{}/{}", git_host.trim_end_matches('/'), repo)
}

/// Client for the instructor-maintained assignment template repository.
pub struct TemplateGitClient {
    remote: String,
}

impl TemplateGitClient {
    pub fn new(identifier: &Identifier, git_host: &str) -> Self {
        Self {
            remote: remote_for(git_host, &identifier.template_repo()),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Shallow-clone the template into an owned temporary directory.
    ///
    /// Single attempt, no retry.
    ///
    /// # Errors
    /// Returns [`Error::CloneFailed`] naming the remote on non-zero exit.
    pub fn clone_shallow(&self) -> Result<TrackedTempDir> {
        let dir = TrackedTempDir::new()?;
        let dest = dir.path().to_string_lossy().into_owned();
        run_git(&["clone", "--depth", "1", "--quiet", &self.remote, &dest], None).map_err(
            |_| {
                anyhow!(Error::CloneFailed {
                    remote: self.remote.clone(),
                })
            },
        )?;
        Ok(dir)
    }
}

/// Client for the per-student assignment repository.
///
/// Config defaults are probed once, before any clone, so `git config --get`
/// sees only the user's global configuration.
pub struct StudentGitClient {
    remote: String,
    template_repo: String,
    work_tree: PathBuf,
    configs: Vec<String>,
}

impl StudentGitClient {
    pub fn new(identifier: &Identifier, git_host: &str, work_tree: &Path) -> Self {
        Self {
            remote: remote_for(git_host, &identifier.student_repo()),
            template_repo: identifier.template_repo(),
            work_tree: work_tree.to_path_buf(),
            configs: config_defaults(),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Clone the student repository bare (no working tree) into an owned
    /// temporary directory and return a handle for staged operations.
    ///
    /// # Errors
    /// Returns [`Error::StudentCloneFailed`] on non-zero exit: clone failure
    /// on the student repo most often means the assignment was never
    /// accepted, so the error names the template identifier.
    pub fn clone_bare(&self) -> Result<StagedRepo<'_>> {
        let git_dir = TrackedTempDir::new()?;
        let dest = git_dir.path().to_string_lossy().into_owned();
        run_git(&["clone", "--bare", "--quiet", &self.remote, &dest], None).map_err(|_| {
            anyhow!(Error::StudentCloneFailed {
                remote: self.remote.clone(),
                template_repo: self.template_repo.clone(),
            })
        })?;
        Ok(StagedRepo {
            client: self,
            git_dir,
        })
    }
}

/// A bare clone of the student repository, staged against the working-copy
/// snapshot via `GIT_DIR`/`GIT_WORK_TREE`. The clone directory is removed
/// when this handle is dropped.
pub struct StagedRepo<'a> {
    client: &'a StudentGitClient,
    git_dir: TrackedTempDir,
}

impl StagedRepo<'_> {
    fn git(&self, args: &[&str]) -> Result<String> {
        let mut full: Vec<&str> = self
            .client
            .configs
            .iter()
            .map(String::as_str)
            .collect();
        full.extend_from_slice(args);
        run_git(&full, Some((self.git_dir.path(), &self.client.work_tree)))
    }

    /// Add, modify, and remove index entries to match the working tree.
    pub fn add_all(&self) -> Result<()> {
        self.git(&["add", "--all"])
            .map(drop)
            .map_err(|_| anyhow!(Error::SubmissionFailed))
    }

    /// Files in the index after [`add_all`](Self::add_all), which is exactly
    /// what a commit would record. NUL-delimited listing sidesteps git's
    /// quoting of unusual file names.
    pub fn tracked_files(&self) -> Result<Vec<String>> {
        self.git(&["ls-files", "-z"])
            .map(split_nul)
            .map_err(|_| anyhow!(Error::SubmissionFailed))
    }

    /// Files present in the working tree but kept out of the index by
    /// ignore rules.
    pub fn untracked_files(&self) -> Result<Vec<String>> {
        self.git(&["ls-files", "--others", "-z"])
            .map(split_nul)
            .map_err(|_| anyhow!(Error::SubmissionFailed))
    }

    /// Commit the staged tree and push it to the student remote.
    ///
    /// The commit allows an empty diff on purpose: a submission event is
    /// recorded even when no files changed. The branch name is read back
    /// from git rather than assumed.
    ///
    /// # Errors
    /// Any non-zero exit at any step is a single
    /// [`Error::SubmissionFailed`]; step detail goes to debug logs only.
    pub fn commit_and_push(&self) -> Result<(String, String)> {
        let run = || -> Result<(String, String)> {
            self.git(&["commit", "--allow-empty", "--message", COMMIT_MESSAGE])?;
            let commit = self.git(&["rev-parse", "HEAD"])?;
            let branch = self.git(&["branch", "--show-current"])?;
            self.git(&["push", "--quiet", "origin", &branch])?;
            Ok((commit, branch))
        };
        run().map_err(|_| anyhow!(Error::SubmissionFailed))
    }
}

fn split_nul(listing: String) -> Vec<String> {
    listing
        .split('\0')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the `-c key=value` arguments for keys the user has not configured.
/// A key is treated as unconfigured when `git config --get` exits non-zero
/// or prints nothing.
fn config_defaults() -> Vec<String> {
    let mut configs = Vec::new();
    for (key, value) in CONFIG_DEFAULTS {
        let configured = matches!(run_git(&["config", "--get", key], None), Ok(v) if !v.is_empty());
        if !configured {
            configs.push("-c".to_string());
            configs.push(format!("{key}={value}"));
        }
    }
    configs
}
