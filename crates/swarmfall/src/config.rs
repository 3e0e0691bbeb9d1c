//! Game configuration and weapon content tables
//!
//! Weapon definitions are plain data records loaded from RON; the
//! runtime never interprets balance semantics, it only drives timers
//! and hands the numbers to components.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Config parsed but describes no weapons
    #[error("config contains no weapons")]
    NoWeapons,
}

/// Static description of one weapon (opaque content record)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Display name
    pub name: String,
    /// Damage per projectile
    pub damage: f32,
    /// Seconds between shots
    pub cooldown: f32,
    /// Projectile speed in world units per second
    pub projectile_speed: f32,
    /// Projectile lifetime in seconds
    pub lifetime: f32,
    /// Aim jitter in radians (uniform, centred on the aim direction)
    pub spread: f32,
}

/// Player tuning values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Movement speed in world units per second
    pub move_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { move_speed: 180.0 }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player tuning
    pub player: PlayerConfig,
    /// Weapon content table
    pub weapons: Vec<WeaponSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            weapons: vec![
                WeaponSpec {
                    name: "Bolt Caster".to_string(),
                    damage: 6.0,
                    cooldown: 0.4,
                    projectile_speed: 420.0,
                    lifetime: 1.5,
                    spread: 0.05,
                },
                WeaponSpec {
                    name: "Scatter Ring".to_string(),
                    damage: 2.5,
                    cooldown: 1.1,
                    projectile_speed: 260.0,
                    lifetime: 0.8,
                    spread: 0.6,
                },
            ],
        }
    }
}

impl GameConfig {
    /// Parse configuration from a RON string
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        if config.weapons.is_empty() {
            return Err(ConfigError::NoWeapons);
        }
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when
    /// the file does not exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(source) => match Self::from_ron(&source) {
                Ok(config) => {
                    log::info!("loaded game config from {path}");
                    config
                }
                Err(error) => {
                    log::warn!("ignoring invalid config {path}: {error}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no config at {path}, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ron_config() {
        let source = r#"(
            player: (move_speed: 200.0),
            weapons: [
                (
                    name: "Test Gun",
                    damage: 1.0,
                    cooldown: 0.5,
                    projectile_speed: 300.0,
                    lifetime: 2.0,
                    spread: 0.0,
                ),
            ],
        )"#;
        let config = GameConfig::from_ron(source).unwrap();
        assert_eq!(config.weapons.len(), 1);
        assert_eq!(config.weapons[0].name, "Test Gun");
        assert_eq!(config.player.move_speed, 200.0);
    }

    #[test]
    fn test_empty_weapon_table_rejected() {
        let source = "(player: (move_speed: 100.0), weapons: [])";
        assert!(matches!(
            GameConfig::from_ron(source),
            Err(ConfigError::NoWeapons)
        ));
    }

    #[test]
    fn test_default_round_trips_through_ron() {
        let config = GameConfig::default();
        let serialized = ron::to_string(&config).unwrap();
        let parsed = GameConfig::from_ron(&serialized).unwrap();
        assert_eq!(parsed.weapons.len(), config.weapons.len());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("/nonexistent/swarmfall.ron");
        assert!(!config.weapons.is_empty());
    }
}
