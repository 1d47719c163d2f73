use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::TriageConfig;

/// Name of the data directory holding triage.toml, board.json and
/// state.json.
pub const DATA_DIR: &str = ".triage";
pub const CONFIG_FILE: &str = "triage.toml";
pub const BOARD_FILE: &str = "board.json";

/// Error type for config and data-directory handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("not a triage directory: no .triage/ found (run `tg init`)")]
    NotInitialized,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse triage.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize triage.toml: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Find the data directory by walking up from `start` until a
/// `.triage/` directory appears.
pub fn discover_dir(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();
    loop {
        let dir = current.join(DATA_DIR);
        if dir.is_dir() {
            return Ok(dir);
        }
        if !current.pop() {
            return Err(ConfigError::NotInitialized);
        }
    }
}

/// Read triage.toml from the data directory. A missing file means
/// all defaults.
pub fn read_config(triage_dir: &Path) -> Result<TriageConfig, ConfigError> {
    let path = triage_dir.join(CONFIG_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(TriageConfig::default()),
        Err(err) => Err(ConfigError::ReadError { path, source: err }),
    }
}

/// Write the default config, used by `tg init`.
pub fn write_default_config(triage_dir: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(&TriageConfig::default())?;
    fs::write(triage_dir.join(CONFIG_FILE), content)?;
    Ok(())
}
