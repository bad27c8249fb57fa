//! Shared fixtures: throwaway `file://` remotes and a git helper.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub const ORG: &str = "org";

/// A temporary directory tree serving as the git host, addressed via the
/// `file://` protocol.
pub struct Remotes {
    root: TempDir,
}

impl Remotes {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join(ORG)).unwrap();
        Self { root }
    }

    pub fn host(&self) -> String {
        format!("file://{}", self.root.path().display())
    }

    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.root.path().join(ORG).join(name)
    }

    pub fn remote(&self, name: &str) -> String {
        format!("{}/{}/{}", self.host(), ORG, name)
    }

    /// Publish an assignment template: the given files are committed in a
    /// scratch repository which is then mirrored bare under the org.
    pub fn create_template(&self, name: &str, files: &[(&str, &str)]) {
        let work = tempfile::tempdir().unwrap();
        git(work.path(), &["init", "--quiet", "--initial-branch=main"]);
        for (path, contents) in files {
            let dest = work.path().join(path);
            fs::create_dir_all(dest.parent().unwrap()).unwrap();
            fs::write(dest, contents).unwrap();
        }
        git(work.path(), &["add", "--all"]);
        git_committer(
            work.path(),
            &["commit", "--quiet", "--allow-empty", "--message", "scaffold"],
        );
        git(
            work.path(),
            &[
                "clone",
                "--bare",
                "--quiet",
                ".",
                self.repo_path(name).to_str().unwrap(),
            ],
        );
    }

    /// Create a per-student bare repository seeded with an initial commit,
    /// as the platform does when a student accepts an assignment.
    pub fn create_student_repo(&self, name: &str) {
        let work = tempfile::tempdir().unwrap();
        git(work.path(), &["init", "--quiet", "--initial-branch=main"]);
        fs::write(work.path().join("README.md"), "# assignment\n").unwrap();
        git(work.path(), &["add", "--all"]);
        git_committer(work.path(), &["commit", "--quiet", "--message", "accept"]);
        git(
            work.path(),
            &[
                "clone",
                "--bare",
                "--quiet",
                ".",
                self.repo_path(name).to_str().unwrap(),
            ],
        );
    }

    /// Clone a repo from this host into a fresh directory for inspection.
    pub fn checkout(&self, name: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        git(
            dir.path(),
            &["clone", "--quiet", &self.remote(name), "."],
        );
        dir
    }
}

/// Run git in `cwd`, asserting success, and return trimmed stdout.
pub fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

/// Like [`git`] but with a fixed test identity, for commands that commit.
pub fn git_committer(cwd: &Path, args: &[&str]) -> String {
    let mut full = vec![
        "-c",
        "user.name=instructor",
        "-c",
        "user.email=instructor@example.com",
    ];
    full.extend_from_slice(args);
    git(cwd, &full)
}

/// A student working directory populated with the given files.
pub fn student_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, contents) in files {
        let dest = dir.path().join(path);
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(dest, contents).unwrap();
    }
    dir
}
