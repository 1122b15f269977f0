//! Configuration management for WisdomPath
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.wisdompath/config.toml

use crate::classification::QUIZ_QUESTIONS;
use crate::errors::{Result, WisdomError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for WisdomPath
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Flow gating configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Quiz answers required before the quiz step may be left
    pub quiz_min_answers: usize,
    /// Goals a user may select on the assessment's goals step
    pub goal_selection_cap: usize,
}

/// Terminal output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            quiz_min_answers: 3,
            goal_selection_cap: 3,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WisdomError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| WisdomError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config location, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".wisdompath").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.flow.quiz_min_answers == 0 || self.flow.quiz_min_answers > QUIZ_QUESTIONS.len() {
            return Err(WisdomError::ConfigError(format!(
                "quiz_min_answers must be between 1 and {}",
                QUIZ_QUESTIONS.len()
            )));
        }

        if self.flow.goal_selection_cap == 0 {
            return Err(WisdomError::ConfigError(
                "goal_selection_cap must be greater than 0".to_string(),
            ));
        }

        match self.display.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(WisdomError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.display.default_verbosity
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| WisdomError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WisdomError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| WisdomError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
