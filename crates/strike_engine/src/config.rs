//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level width in world units
    pub width: f32,

    /// Level height in world units
    pub height: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl LevelConfig {
    /// Whether a point lies inside the level, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// Collision resolution tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionConfig {
    /// Sub-steps per frame when rolling interpenetration back
    pub rollback_granularity: f32,

    /// Rollback sub-step cap before falling back to positional separation
    pub max_rollback_steps: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            rollback_granularity: 10.0,
            max_rollback_steps: 40,
        }
    }
}

/// Top-level session configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Playfield dimensions
    pub level: LevelConfig,

    /// Collision resolution tuning
    pub collision: CollisionConfig,
}

impl Config for SessionConfig {}
