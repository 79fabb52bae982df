// ============================================================================
// clipcat-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg command-line tool
//
// This module encapsulates every interaction with the external ffmpeg
// binary. The spawner/process trait pair lets the pipeline and the tests
// substitute a scripted implementation for the real process.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

/// Traits and implementations for spawning and waiting on ffmpeg processes
pub mod ffmpeg_executor;

/// Scripted ffmpeg spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

/// Checks that a required external command is available and executable by
/// running it with `-version`.
///
/// Returns `CoreError::DependencyNotFound` when the binary is not on the
/// PATH, and `CoreError::CommandStart` when it exists but cannot be run.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check for '{}': {}", cmd_name, e);
            Err(crate::error::command_start_error(cmd_name, e))
        }
    }
}
