//! Run identity and artifact guard

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Snapshot archive extension
pub const ARTIFACT_EXT: &str = "bin";

/// Name of one run, derived from its job index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    pub index: u64,
    pub name: String,
}

impl RunIdentity {
    pub fn new(index: u64) -> Self {
        Self {
            index,
            name: format!("run{index}"),
        }
    }

    /// `<dir>/<name>.bin`
    pub fn artifact_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{ARTIFACT_EXT}", self.name))
    }

    /// Make sure the run starts from an empty history.
    ///
    /// Creates `dir` if needed and removes any artifact left by a previous run
    /// with the same index. A missing artifact is not an error.
    pub fn prepare(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = self.artifact_path(dir);

        match fs::remove_file(&path) {
            Ok(()) => info!(path = %path.display(), "removed previous artifact"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        Ok(path)
    }
}
