//! Per-run workspace directory management.
//!
//! A workspace is a single directory holding the per-clip intermediate
//! files of one pipeline run. Its path is deterministic under a base
//! directory so that a run can recover from a previous crash by wiping
//! whatever was left behind. It is created at run start and removed on
//! every exit path.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Directory name used for the workspace under the configured base.
const WORKSPACE_DIR_NAME: &str = "intermediates";

/// Extension of the intermediate transport-stream files.
const INTERMEDIATE_EXT: &str = "ts";

/// Exclusive working directory of one pipeline run.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Creates a fresh workspace under `base_dir`, deleting any directory a
    /// crashed earlier run may have left at the same path.
    pub fn create(base_dir: &Path) -> CoreResult<Self> {
        let dir = base_dir.join(WORKSPACE_DIR_NAME);
        if dir.is_dir() {
            log::debug!("Removing stale workspace: {}", dir.display());
            std::fs::remove_dir_all(&dir).map_err(|source| CoreError::Workspace {
                path: dir.clone(),
                source,
            })?;
        }
        std::fs::create_dir_all(&dir).map_err(|source| CoreError::Workspace {
            path: dir.clone(),
            source,
        })?;
        log::debug!("Created workspace: {}", dir.display());
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Deterministic path of the i-th intermediate file. The numeric suffix
    /// matches clip order; the concat step depends on that.
    #[must_use]
    pub fn intermediate_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("intermediate{index}.{INTERMEDIATE_EXT}"))
    }

    /// Recursively removes the workspace and everything in it. Idempotent:
    /// an already-absent directory is not an error.
    pub fn destroy(&self) -> CoreResult<()> {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                log::debug!("Destroyed workspace: {}", self.dir.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CoreError::Workspace {
                path: self.dir.clone(),
                source,
            }),
        }
    }
}
