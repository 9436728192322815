//! Configuration loading and discovery for `sprite5.toml`

use super::schema::Sprite5Config;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name
pub const CONFIG_FILE: &str = "sprite5.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprite5.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the data directory
    pub data_dir: Option<PathBuf>,
    /// Force the dark theme
    pub dark: Option<bool>,
    /// Override PNG export scale
    pub scale: Option<u32>,
}

/// Find sprite5.toml by walking up from the current directory, then in the
/// XDG config directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Checks XDG_CONFIG_HOME/sprite5/sprite5.toml or ~/.config/sprite5/sprite5.toml
pub fn find_xdg_config() -> Option<PathBuf> {
    let config_path = xdg_dir("XDG_CONFIG_HOME", ".config")?.join("sprite5").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find sprite5.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var("HOME").ok().map(|h| PathBuf::from(h).join(home_fallback)))
}

/// Default data directory: XDG_DATA_HOME/sprite5 or ~/.local/share/sprite5,
/// falling back to `.sprite5` in the current directory.
pub fn default_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
        .map(|d| d.join("sprite5"))
        .unwrap_or_else(|| PathBuf::from(".sprite5"))
}

/// Load configuration from `path`, or from the discovered file.
///
/// Without any config file the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<Sprite5Config, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(Sprite5Config::default()),
    }
}

fn load_config_file(path: &Path) -> Result<Sprite5Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Sprite5Config = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut Sprite5Config, overrides: &CliOverrides) {
    if let Some(ref dir) = overrides.data_dir {
        config.storage.dir = Some(dir.clone());
    }

    if let Some(true) = overrides.dark {
        config.render.theme = crate::renderer::Theme::Dark;
    }

    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }
}

/// The data directory a configuration resolves to.
pub fn data_dir(config: &Sprite5Config) -> PathBuf {
    config.storage.dir.clone().unwrap_or_else(default_data_dir)
}
