use crate::domain::ClassifierStrategy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_TOML_NAME: &str = "sweepbox.toml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_IMAGE_WIDTH: usize = 40;

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/sweepbox")
}

/// Which front end drives the confirmation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Interactive when attached to a terminal, line-oriented otherwise
    #[default]
    Auto,
    Line,
    Interactive,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Docker endpoint, e.g. `unix:///run/user/1000/podman/podman.sock`
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    pub strategy: Option<ClassifierStrategy>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub mode: Option<DisplayMode>,
    pub image_width: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(host) = other.runtime.host {
            self.runtime.host = Some(host);
        }
        if let Some(timeout) = other.runtime.timeout_secs {
            self.runtime.timeout_secs = Some(timeout);
        }
        if let Some(strategy) = other.classifier.strategy {
            self.classifier.strategy = Some(strategy);
        }
        if let Some(mode) = other.display.mode {
            self.display.mode = Some(mode);
        }
        if let Some(width) = other.display.image_width {
            self.display.image_width = Some(width);
        }
    }

    /// Docker endpoint with `~` expanded, if one was configured
    pub fn host(&self) -> Option<String> {
        self.runtime
            .host
            .as_deref()
            .map(|host| shellexpand::tilde(host).into_owned())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.runtime.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn strategy(&self) -> ClassifierStrategy {
        self.classifier.strategy.unwrap_or_default()
    }

    pub fn mode(&self) -> DisplayMode {
        self.display.mode.unwrap_or_default()
    }

    /// Column width for image names; anything under 4 leaves no room for text
    pub fn image_width(&self) -> usize {
        self.display
            .image_width
            .unwrap_or(DEFAULT_IMAGE_WIDTH)
            .max(4)
    }
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(DEFAULT_CONFIG_TOML_NAME)
}

/// Loads `sweepbox.toml` from `config_dir`; a missing file means defaults
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    let path = config_path(config_dir);

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("lendo {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;

    Ok(config)
}
