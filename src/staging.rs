//! Disposable working-copy snapshot.
//!
//! All staging (dotfile reconciliation, `git add`) is destructive, so it runs
//! inside a throwaway copy of the student's directory. The real directory is
//! only ever read; if submission fails partway, the copy is simply discarded.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cleanup::TrackedTempDir;

/// A temporary copy of the student's working directory.
///
/// The copy (and its parent temp directory) is removed when this value is
/// dropped, whichever way the submission ends.
pub struct WorkingCopy {
    root: TrackedTempDir,
}

impl WorkingCopy {
    /// Copy the contents of `student_dir` into a fresh temporary directory.
    ///
    /// `.git` entries are left behind: the snapshot is staged against the
    /// student's bare assignment clone, never against any local repository.
    pub fn snapshot(student_dir: &Path) -> Result<Self> {
        let root = TrackedTempDir::new()?;
        copy_tree(student_dir, root.path()).with_context(|| {
            format!("failed to snapshot working directory {}", student_dir.display())
        })?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

/// Recursively copy the entries of `src` into the existing directory `dest`,
/// skipping `.git` entries. Symlinks are recreated, not followed.
pub(crate) fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        if name == ".git" {
            continue;
        }

        let from = entry.path();
        let to = dest.join(&name);
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            fs::create_dir(&to)?;
            copy_tree(&from, &to)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(&from)?;
            std::os::unix::fs::symlink(target, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}
