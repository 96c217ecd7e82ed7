//! Configuration system for the chase simulation.
//!
//! Supports YAML configuration files with the classic defaults
//! (50 rounds, 15 sheep, spawn limit 10.0, sheep step 0.5, wolf step 1.0).

use crate::sheep::SheepId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub sheep: SheepConfig,
    pub wolf: WolfConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Round limit and population size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Maximum number of rounds
    pub max_rounds: u32,
    /// Number of sheep at start
    pub sheep_count: usize,
    /// Random seed for reproducibility (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheepConfig {
    /// Sheep spawn in `[-init_pos_limit, init_pos_limit]` on both axes
    pub init_pos_limit: f64,
    /// Distance covered by one sheep step
    pub move_dist: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WolfConfig {
    /// Distance covered by one wolf step, also its capture reach
    pub move_dist: f64,
}

/// Run artifact file names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Cumulative per-round positions (JSON)
    pub positions_file: PathBuf,
    /// Cumulative per-round alive counts (CSV)
    pub alive_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            sheep: SheepConfig::default(),
            wolf: WolfConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 50,
            sheep_count: 15,
            seed: None,
        }
    }
}

impl Default for SheepConfig {
    fn default() -> Self {
        Self {
            init_pos_limit: 10.0,
            move_dist: 0.5,
        }
    }
}

impl Default for WolfConfig {
    fn default() -> Self {
        Self { move_dist: 1.0 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            positions_file: PathBuf::from("pos.json"),
            alive_file: PathBuf::from("alive.csv"),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file without validating it, so that
    /// command-line overrides can be applied first
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            log::error!("File '{}' not found.", path.display());
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        log::debug!(
            "Configuration loaded from {}: init_pos_limit={}, sheep_move_dist={}, wolf_move_dist={}.",
            path.display(),
            config.sheep.init_pos_limit,
            config.sheep.move_dist,
            config.wolf.move_dist
        );
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.max_rounds == 0 {
            return Err(ConfigError::Invalid("max_rounds must be > 0".to_string()));
        }
        if self.simulation.sheep_count == 0 {
            return Err(ConfigError::Invalid("sheep_count must be > 0".to_string()));
        }
        if self.simulation.sheep_count > SheepId::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "sheep_count must be <= {}",
                SheepId::MAX
            )));
        }
        check_positive("sheep.init_pos_limit", self.sheep.init_pos_limit)?;
        // Spawn range [-limit, limit] must have a finite width
        if !(2.0 * self.sheep.init_pos_limit).is_finite() {
            return Err(ConfigError::Invalid(format!(
                "sheep.init_pos_limit is too large, got {}",
                self.sheep.init_pos_limit
            )));
        }
        check_positive("sheep.move_dist", self.sheep.move_dist)?;
        check_positive("wolf.move_dist", self.wolf.move_dist)?;
        Ok(())
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        log::error!("Config value {} is not greater than zero. Given: {}.", field, value);
        Err(ConfigError::Invalid(format!(
            "{} must be a finite value > 0, got {}",
            field, value
        )))
    }
}

/// Errors that can occur while loading or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "File '{}' does not exist", path.display()),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Invalid configuration: {}", e),
            Self::Invalid(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::NotFound(_) | Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}
