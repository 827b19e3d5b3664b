use crate::animation::Interpolator;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wheelmath::{AngularRestrictions, Point, WheelGeometry};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const ENV_PREFIX: &str = "SECTORWHEEL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub restrictions: AngularRestrictions,
    #[serde(default)]
    pub start_position: i64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default)]
    pub interpolator: Interpolator,
    #[serde(default = "default_geometry")]
    pub geometry: WheelGeometry,
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_geometry() -> WheelGeometry {
    WheelGeometry::new(Point::new(400.0, 0.0), 300.0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restrictions: AngularRestrictions::default(),
            start_position: 0,
            frame_interval_ms: default_frame_interval_ms(),
            interpolator: Interpolator::default(),
            geometry: default_geometry(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to write config file: {0}")]
    Write(#[from] std::io::Error),
}

pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "magicepg", "sectorwheel")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::ConfigDirNotFound)
}

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder().add_source(config::File::from_str(
        DEFAULT_CONFIG,
        config::FileFormat::Toml,
    ))
}

/// Bundled defaults, then the user's config file, then `SECTORWHEEL__*` environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = config_file_path()?;

    let s = builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default configuration: {}", e);
            Config::default()
        }
    }
}

/// Writes the bundled defaults to the user's config file unless one exists. Returns the path
/// and whether a file was written.
pub fn init_config_file() -> Result<(PathBuf, bool), ConfigError> {
    let path = config_file_path()?;
    let written = write_defaults_to(&path)?;
    Ok((path, written))
}

fn write_defaults_to(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        log::info!("Keeping existing config at {}", path.display());
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}
