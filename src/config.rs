//! Data-driven simulation tunables
//!
//! Weapon stats, collision-physics tuning and pool sizes are static
//! read-only records keyed by id, loadable from JSON. The simulation
//! never mutates them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stats for one weapon id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub damage: f32,
    /// Muzzle speed in world units per second
    pub speed: f32,
    /// Targets the shot can pass through before it is spent
    #[serde(default = "default_pierce")]
    pub pierce: u32,
    /// Splash radius; 0 disables area damage
    #[serde(default)]
    pub explosion_radius: f32,
    pub lifetime_ticks: u32,
    pub cooldown_ticks: u32,
    /// Missile-only: ticks before the warhead arms
    #[serde(default)]
    pub arming_ticks: u32,
}

fn default_pierce() -> u32 {
    1
}

/// Tuning for the generic body-vs-body collision path. Kept separate from
/// weapon stats: the two damage paths are independently balanced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionTuning {
    /// Impact speed along the normal below which contact does no damage
    pub min_impact_speed: f32,
    /// Kinetic energy to damage conversion factor
    pub energy_damage_factor: f32,
    /// Upper bound on damage from a single contact
    pub max_contact_damage: f32,
    /// Elastic restitution for the velocity impulse (0..=1)
    pub restitution: f32,
    /// Controlled entity hitting the station above this speed draws a fine
    pub fine_speed_threshold: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            min_impact_speed: 4.0,
            energy_damage_factor: 0.02,
            max_contact_damage: 40.0,
            restitution: 0.6,
            fine_speed_threshold: 25.0,
        }
    }
}

/// Fixed capacities of the transient-entity pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSizes {
    pub projectiles: usize,
    pub indicators: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            projectiles: 256,
            indicators: 64,
        }
    }
}

/// Everything the simulation reads but never writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub weapons: HashMap<String, WeaponSpec>,
    #[serde(default)]
    pub collision: CollisionTuning,
    #[serde(default)]
    pub pools: PoolSizes,
}

impl SimConfig {
    /// Built-in balance used by the demo binary and tests.
    pub fn builtin() -> Self {
        let mut weapons = HashMap::new();
        weapons.insert(
            "pulse".to_string(),
            WeaponSpec {
                damage: 12.0,
                speed: 600.0,
                pierce: 1,
                explosion_radius: 0.0,
                lifetime_ticks: 120,
                cooldown_ticks: 12,
                arming_ticks: 0,
            },
        );
        weapons.insert(
            "railgun".to_string(),
            WeaponSpec {
                damage: 40.0,
                speed: 1_500.0,
                pierce: 3,
                explosion_radius: 0.0,
                lifetime_ticks: 90,
                cooldown_ticks: 60,
                arming_ticks: 0,
            },
        );
        weapons.insert(
            "torpedo".to_string(),
            WeaponSpec {
                damage: 80.0,
                speed: 180.0,
                pierce: 1,
                explosion_radius: 60.0,
                lifetime_ticks: 600,
                cooldown_ticks: 180,
                arming_ticks: 30,
            },
        );
        Self {
            weapons,
            collision: CollisionTuning::default(),
            pools: PoolSizes::default(),
        }
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Look up a weapon spec by id.
    pub fn weapon(&self, id: &str) -> Option<&WeaponSpec> {
        self.weapons.get(id)
    }
}

/// Config loading failures.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_expected_weapons() {
        let config = SimConfig::builtin();
        assert!(config.weapon("pulse").is_some());
        assert!(config.weapon("torpedo").is_some());
        assert!(config.weapon("nonexistent").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig::builtin();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(parsed.weapons.len(), config.weapons.len());
        assert_eq!(
            parsed.collision.min_impact_speed,
            config.collision.min_impact_speed
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "weapons": {
                "bb": { "damage": 1.0, "speed": 100.0, "lifetime_ticks": 30, "cooldown_ticks": 5 }
            }
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        let bb = config.weapon("bb").unwrap();
        assert_eq!(bb.pierce, 1);
        assert_eq!(bb.explosion_radius, 0.0);
        assert_eq!(config.pools.projectiles, 256);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(SimConfig::from_json("not json").is_err());
    }
}
