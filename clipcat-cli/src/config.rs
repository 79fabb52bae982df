// clipcat-cli/src/config.rs
//
// Defines default configuration constants for the `clipcat` binary.

use std::path::PathBuf;

/// Name of the config directory, created relative to the working directory.
/// It holds the saved output-directory choice and the per-run workspace.
pub const CONFIG_DIR_NAME: &str = ".clipcat";

pub fn default_config_dir() -> PathBuf {
    PathBuf::from(CONFIG_DIR_NAME)
}
