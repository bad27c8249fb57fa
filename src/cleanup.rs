//! Interrupt-safe temporary directories.
//!
//! Every temporary directory a run creates (template clone, student bare
//! clone, working-copy snapshot) is owned by a [`TrackedTempDir`], which
//! removes it on drop for all success and error paths. Dropping does not run
//! when the process is killed by a signal, so paths are also recorded in a
//! registry that the Ctrl-C handler drains before exiting.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use anyhow::Result;
use tempfile::TempDir;
use tracing::debug;

fn registry() -> &'static Mutex<Vec<PathBuf>> {
    static REGISTRY: OnceLock<Mutex<Vec<PathBuf>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
}

/// Install a SIGINT handler that removes any live temporary directories
/// before exiting with the conventional interrupt status.
///
/// # Errors
/// Returns an error if a handler is already installed for this process.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        for path in registry().lock().unwrap().drain(..) {
            let _ = std::fs::remove_dir_all(&path);
        }
        // 128 + SIGINT
        std::process::exit(130);
    })?;
    Ok(())
}

/// A temporary directory that is deleted on drop and on interrupt.
pub struct TrackedTempDir {
    inner: TempDir,
}

impl TrackedTempDir {
    pub fn new() -> Result<Self> {
        let inner = TempDir::new()?;
        debug!("created temporary directory {}", inner.path().display());
        registry().lock().unwrap().push(inner.path().to_path_buf());
        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl Drop for TrackedTempDir {
    fn drop(&mut self) {
        registry().lock().unwrap().retain(|p| p != self.inner.path());
        // the inner TempDir removes the directory itself
    }
}
