//! Dotfile reconciliation.
//!
//! Instructors control a fixed set of configuration paths. Before staging,
//! the template's versions replace whatever the student has at those paths,
//! so submissions are always checked and built with the course's settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::staging::copy_tree;

/// Instructor-controlled configuration paths, copied wholesale from the
/// assignment template into the staging copy.
pub const DOTFILES: &[&str] = &[".devcontainer", ".github", ".gitignore"];

/// Reconcile every dotfile present in `template_dir` into `dest`.
///
/// For each entry of [`DOTFILES`] that exists in the template: any existing
/// entry of the same name in `dest` is removed first, then the template's
/// version is copied in its place (directory tree or single file). Paths
/// absent from the template are left untouched in `dest`.
pub fn copy_dotfiles(template_dir: &Path, dest: &Path) -> Result<()> {
    for name in DOTFILES {
        let src = template_dir.join(name);
        if !src.exists() {
            continue;
        }
        debug!("reconciling {name} from assignment template");
        remove_if_exists(&dest.join(name))?;
        copy_entry(&src, &dest.join(name))
            .with_context(|| format!("failed to copy {name} from assignment template"))?;
    }
    Ok(())
}

/// Remove a file or directory if it exists. The entry's kind is not assumed:
/// directory removal falls back to single-file removal.
fn remove_if_exists(path: &Path) -> Result<()> {
    if !path.exists() && !path.is_symlink() {
        return Ok(());
    }
    if fs::remove_dir_all(path).is_err() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Copy a directory tree or a single file from `src` to `dest`.
fn copy_entry(src: &Path, dest: &Path) -> Result<()> {
    if src.is_dir() {
        fs::create_dir(dest)?;
        copy_tree(src, dest)?;
    } else {
        fs::copy(src, dest)?;
    }
    Ok(())
}
