// Configuration file handling (~/.decidr/rc)

use crate::engine::SuggestMode;
use crate::error::{InputError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".decidr";
const CONFIG_FILE: &str = "rc";
const DEFAULT_DB_FILE: &str = "tasks.db";

/// When to color priorities in tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" | "on" => Some(ColorMode::Always),
            "never" | "off" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Settings read from the rc file
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Database location, already resolved against the rc file's directory
    pub data_location: Option<PathBuf>,
    pub suggest_mode: Option<SuggestMode>,
    pub color: ColorMode,
}

impl Config {
    /// `~/.decidr`
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(CONFIG_DIR))
    }

    /// `~/.decidr/rc`
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load the rc file, or defaults when there is none
    pub fn load() -> anyhow::Result<Config> {
        let path = Self::config_path()?;
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::parse(&content, &base_dir)?)
    }

    /// Parse rc content. Relative paths resolve against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> Result<Config> {
        let mut config = Config::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                log::warn!("ignoring config line without '=': {}", line);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "data.location" => {
                    let path = PathBuf::from(value);
                    config.data_location = Some(if path.is_relative() {
                        base_dir.join(path)
                    } else {
                        path
                    });
                }
                "suggest.mode" => {
                    config.suggest_mode = Some(value.parse::<SuggestMode>()?);
                }
                "color" => match ColorMode::from_str(value) {
                    Some(mode) => config.color = mode,
                    None => log::warn!("ignoring unknown color setting '{}'", value),
                },
                _ => log::warn!("ignoring unknown config key '{}'", key),
            }
        }

        Ok(config)
    }

    /// Database path: `data.location` if set, else `~/.decidr/tasks.db`
    pub fn data_path(&self) -> anyhow::Result<PathBuf> {
        match &self.data_location {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(DEFAULT_DB_FILE)),
        }
    }

    /// Mode to use when the command line does not name one
    pub fn default_mode(&self) -> SuggestMode {
        self.suggest_mode.unwrap_or(SuggestMode::Finishable)
    }
}

/// Parse a mode name supplied on the command line
pub fn parse_mode(value: &str) -> Result<SuggestMode> {
    value
        .parse::<SuggestMode>()
        .map_err(|e: InputError| e.into())
}
