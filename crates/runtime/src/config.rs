//! Session configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use vale_core::{AttackTemplate, DestroyFlags, GameConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("malformed config")]
    Parse(#[from] serde_json::Error),
}

/// Everything a session needs beyond content: timing, player tuning,
/// and the player's melee template. Every field has a sensible default
/// so an empty object is a valid config.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Physics sub-step length in seconds.
    pub fixed_dt: f32,
    pub dodge_window: f32,
    pub dodge_multiplier: f32,
    pub player_speed: f32,
    pub player_health: f32,
    pub melee: AttackTemplate,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_dt: GameConfig::DEFAULT_FIXED_DT,
            dodge_window: GameConfig::DEFAULT_DODGE_WINDOW,
            dodge_multiplier: GameConfig::DEFAULT_DODGE_MULTIPLIER,
            player_speed: 4.0,
            player_health: 100.0,
            melee: AttackTemplate {
                damage: 10.0,
                speed: 0.0,
                duration: 0.2,
                destroy: DestroyFlags::TIMEOUT.union(DestroyFlags::ON_HIT),
                use_world_space: false,
            },
        }
    }
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// The core-side slice of this configuration.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: self.fixed_dt,
            dodge_window: self.dodge_window,
            dodge_multiplier: self.dodge_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_is_all_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.fixed_dt, GameConfig::DEFAULT_FIXED_DT);
        assert_eq!(config.player_speed, 4.0);
        assert!(config.melee.destroy.contains(DestroyFlags::ON_HIT));
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"player_speed": 6.5, "dodge_window": 0.4}"#).unwrap();
        assert_eq!(config.player_speed, 6.5);
        assert_eq!(config.dodge_window, 0.4);
        assert_eq!(config.dodge_multiplier, GameConfig::DEFAULT_DODGE_MULTIPLIER);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"fixed_dt": 0.01}}"#).unwrap();
        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.fixed_dt, 0.01);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SessionConfig::load("/nonexistent/session.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
