//! Configuration schema types for `sprite5.toml`
//!
//! Every section is optional; a missing file or section yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::editor::DEFAULT_RANDOM_COUNT;
use crate::export::MAX_SCALE;
use crate::renderer::Theme;
use crate::transforms::MAX_RANDOM_COUNT;

/// Default share link base
pub const DEFAULT_BASE_URL: &str = "https://sprite5.local/";

/// Where saved sprites and the share fragment live
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Data directory; falls back to the XDG data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Rendering and export settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Light or dark presentation
    #[serde(default)]
    pub theme: Theme,
    /// PNG export scale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_scale() -> u32 {
    1
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            scale: default_scale(),
        }
    }
}

/// Share link settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Random suggestion settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomConfig {
    #[serde(default = "default_random_count")]
    pub count: usize,
}

fn default_random_count() -> usize {
    DEFAULT_RANDOM_COUNT
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            count: default_random_count(),
        }
    }
}

/// Root of `sprite5.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Sprite5Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub random: RandomConfig,
}

/// A single invalid field
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.scale")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sprite5.toml: '{}' {}", self.field, self.message)
    }
}

impl Sprite5Config {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.render.scale == 0 || self.render.scale > MAX_SCALE {
            errors.push(ConfigValidationError {
                field: "render.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        if self.share.base_url.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "share.base_url".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.random.count > MAX_RANDOM_COUNT {
            errors.push(ConfigValidationError {
                field: "random.count".to_string(),
                message: format!("must be at most {}", MAX_RANDOM_COUNT),
            });
        }

        if let Some(dir) = &self.storage.dir {
            if dir.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: "storage.dir".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        errors
    }
}
