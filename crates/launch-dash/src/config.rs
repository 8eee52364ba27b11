//! Dashboard configuration loading.

#![allow(missing_docs)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::DashError;

pub const DEFAULT_CONFIG_FILE: &str = "launch-dash.toml";
pub const DEFAULT_DATASET_PATH: &str = "spacex_launch_dash.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8050";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashConfig {
    pub dataset: PathBuf,
    pub web: WebConfig,
    pub log_level: SmolStr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    pub listen: SmolStr,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            web: WebConfig::default(),
            log_level: SmolStr::new(DEFAULT_LOG_LEVEL),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen: SmolStr::new(DEFAULT_LISTEN),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dataset: Option<PathBuf>,
    pub listen: Option<String>,
    pub log_level: Option<String>,
}

impl DashConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            DashError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, DashError> {
        let raw: DashToml = toml::from_str(text).map_err(|err| {
            DashError::InvalidConfig(format!("{DEFAULT_CONFIG_FILE}: {err}").into())
        })?;
        raw.into_config()
    }

    /// Explicit `--config` must exist; otherwise `launch-dash.toml` is used when present.
    pub fn resolve(explicit: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, DashError> {
        let base = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        base.apply(overrides)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Result<Self, DashError> {
        if let Some(dataset) = overrides.dataset {
            self.dataset = dataset;
        }
        if let Some(listen) = overrides.listen {
            self.web.listen = parse_listen(&listen)?;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = parse_log_level(&level)?;
        }
        Ok(self)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DashToml {
    dataset: Option<DatasetSection>,
    web: Option<WebSection>,
    log: Option<LogSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WebSection {
    listen: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogSection {
    level: Option<String>,
}

impl DashToml {
    fn into_config(self) -> Result<DashConfig, DashError> {
        let dataset = self
            .dataset
            .and_then(|section| section.path)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
        if dataset.as_os_str().is_empty() {
            return Err(DashError::InvalidConfig("dataset.path is empty".into()));
        }
        let listen = match self.web.and_then(|section| section.listen) {
            Some(listen) => parse_listen(&listen)?,
            None => SmolStr::new(DEFAULT_LISTEN),
        };
        let log_level = match self.log.and_then(|section| section.level) {
            Some(level) => parse_log_level(&level)?,
            None => SmolStr::new(DEFAULT_LOG_LEVEL),
        };
        Ok(DashConfig {
            dataset,
            web: WebConfig { listen },
            log_level,
        })
    }
}

fn parse_listen(text: &str) -> Result<SmolStr, DashError> {
    let trimmed = text.trim();
    trimmed.parse::<SocketAddr>().map_err(|err| {
        DashError::InvalidConfig(format!("invalid web.listen '{trimmed}': {err}").into())
    })?;
    Ok(SmolStr::new(trimmed))
}

fn parse_log_level(text: &str) -> Result<SmolStr, DashError> {
    let level = text.trim().to_ascii_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(SmolStr::new(level))
    } else {
        Err(DashError::InvalidConfig(
            format!("invalid log.level '{text}'").into(),
        ))
    }
}
