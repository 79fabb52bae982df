use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for clipcat
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("clip index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to prepare workspace at {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("remux failed for clip {} ({status})", clip.display())]
    Transcode { clip: PathBuf, status: ExitStatus },

    #[error("concatenation failed ({status})")]
    Concat { status: ExitStatus },

    #[error("failed to start {tool}: {msg}")]
    CommandStart { tool: String, msg: String },

    #[error("{tool} did not complete: {msg}")]
    CommandWait { tool: String, msg: String },

    #[error("required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("invalid path: {0}")]
    PathError(String),

    #[error("unexpected error: {0}")]
    Other(String),
}

/// Result type for clipcat operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandStart` error from anything displayable the spawn layer hands back.
pub(crate) fn command_start_error(tool: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::CommandStart {
        tool: tool.to_string(),
        msg: err.to_string(),
    }
}

/// Builds a `CommandWait` error for a process that could not be waited on.
pub(crate) fn command_wait_error(tool: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::CommandWait {
        tool: tool.to_string(),
        msg: err.to_string(),
    }
}
