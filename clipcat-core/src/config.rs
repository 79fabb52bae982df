//! Application configuration.
//!
//! The only persisted setting is the last chosen output directory, stored
//! as a single line of text inside the config directory. The config is an
//! explicit value loaded at startup and written back through `persist`;
//! nothing reads or writes it ambiently. The per-run workspace also lives
//! under the config directory, keeping all scratch state in one place.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};

/// File inside the config directory holding the output directory path.
const OUTPUT_DIR_FILE: &str = "config";

/// Explicit application configuration, owned by the session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    config_dir: PathBuf,
    output_dir: PathBuf,
}

impl AppConfig {
    /// Loads the configuration from `config_dir`, creating the directory
    /// if needed. A missing or empty config file means the current
    /// directory.
    pub fn load(config_dir: &Path) -> CoreResult<Self> {
        std::fs::create_dir_all(config_dir)?;

        let file = config_dir.join(OUTPUT_DIR_FILE);
        let saved = match std::fs::read_to_string(&file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let trimmed = saved.trim();
        let output_dir = if trimmed.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(trimmed)
        };

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            output_dir,
        })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory the pipeline workspace is created under.
    #[must_use]
    pub fn workspace_base(&self) -> &Path {
        &self.config_dir
    }

    /// Replaces the output directory in memory; call `persist` to save it.
    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = dir;
    }

    /// Writes the current output directory back to the config file.
    pub fn persist(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        let file = self.config_dir.join(OUTPUT_DIR_FILE);
        std::fs::write(&file, self.output_dir.to_string_lossy().as_bytes())?;
        log::debug!("Persisted output directory to {}", file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_file_defaults_to_current_directory() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("fresh")).unwrap();
        assert_eq!(config.output_dir(), Path::new("."));
    }

    #[test]
    fn empty_config_file_defaults_to_current_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(OUTPUT_DIR_FILE), "").unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.output_dir(), Path::new("."));
    }

    #[test]
    fn persist_then_load_restores_the_chosen_directory() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::load(dir.path()).unwrap();
        config.set_output_dir(PathBuf::from("/exports/videos"));
        config.persist().unwrap();

        let reloaded = AppConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.output_dir(), Path::new("/exports/videos"));
    }

    #[test]
    fn config_file_is_a_single_line() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::load(dir.path()).unwrap();
        config.set_output_dir(PathBuf::from("/exports"));
        config.persist().unwrap();

        let contents = std::fs::read_to_string(dir.path().join(OUTPUT_DIR_FILE)).unwrap();
        assert_eq!(contents, "/exports");
    }

    #[test]
    fn workspace_base_is_the_config_directory() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.workspace_base(), dir.path());
    }
}
