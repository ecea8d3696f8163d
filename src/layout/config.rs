//! Configuration for the solver-backed layout host

use std::path::Path;

use kasuari::Strength;
use serde::Deserialize;
use thiserror::Error;

use super::types::Insets;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How strongly the solver should hold a constraint or edit variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Required,
    Strong,
    Medium,
    Weak,
}

impl Priority {
    pub fn strength(self) -> Strength {
        match self {
            Self::Required => Strength::REQUIRED,
            Self::Strong => Strength::STRONG,
            Self::Medium => Strength::MEDIUM,
            Self::Weak => Strength::WEAK,
        }
    }
}

/// Configuration options for [`SolverHost`](super::solver::SolverHost)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Strength of the edit variables holding a root frame
    ///
    /// Edit variables cannot be required.
    pub root_priority: Priority,

    /// Strength of every constraint declared through the DSL
    pub constraint_priority: Priority,

    /// Insets of the safe-area guide relative to its owner
    pub safe_area_insets: Insets,

    /// Retry broken constraints whenever another constraint is deactivated
    pub retry_broken: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            root_priority: Priority::Strong,
            constraint_priority: Priority::Required,
            safe_area_insets: Insets::new(20.0, 0.0, 0.0, 0.0),
            retry_broken: true,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_root_priority(mut self, priority: Priority) -> Self {
        self.root_priority = priority;
        self
    }

    pub fn with_constraint_priority(mut self, priority: Priority) -> Self {
        self.constraint_priority = priority;
        self
    }

    pub fn with_safe_area_insets(mut self, insets: Insets) -> Self {
        self.safe_area_insets = insets;
        self
    }

    pub fn with_retry_broken(mut self, retry: bool) -> Self {
        self.retry_broken = retry;
        self
    }
}
