use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::PlannerConfig;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Read config.toml from the data directory. A missing file gives the
/// defaults. Empty titles or category names are rejected, since they
/// would end up in persisted state.
pub fn read_config(dir: &Path) -> Result<PlannerConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PlannerConfig::default()),
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };
    let config: PlannerConfig = match toml::from_str(&text) {
        Ok(config) => config,
        Err(source) => return Err(ConfigError::ParseError { path, source }),
    };
    if let Some(reason) = validate(&config) {
        return Err(ConfigError::Invalid { path, reason });
    }
    Ok(config)
}

fn validate(config: &PlannerConfig) -> Option<String> {
    if config.trip.default_title.is_empty() {
        return Some("trip.default_title must not be empty".to_string());
    }
    if let Some(pos) = config
        .trip
        .default_categories
        .iter()
        .position(|name| name.is_empty())
    {
        return Some(format!(
            "trip.default_categories[{}] must not be empty",
            pos
        ));
    }
    None
}
