//! Simulation tunables and rule presets
//!
//! Every number the simulation uses lives here so balance can be tweaked from
//! a JSON file without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when loading or saving a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
}

/// Rule presets matching the different releases of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RuleSet {
    /// First release: bullets expire after 40 ticks, no impact explosions,
    /// shots must land inside the enemy radius
    Classic,
    /// Later releases: bullets live until they hit something and explode,
    /// shots get a forgiving hit margin
    #[default]
    Arcade,
}

impl RuleSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSet::Classic => "Classic",
            RuleSet::Arcade => "Arcade",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "v1" => Some(RuleSet::Classic),
            "arcade" => Some(RuleSet::Arcade),
            _ => None,
        }
    }
}

/// Player ship tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Units moved per tick along each held axis
    pub speed: f64,
    /// Cap on the combined velocity magnitude (diagonals)
    pub max_speed: f64,
    pub radius: f64,
    pub shot_speed: f64,
    /// Ticks between shots
    pub shot_cooldown: u32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: SHIP_SPEED,
            max_speed: SHIP_SPEED,
            radius: SHIP_RADIUS,
            shot_speed: SHOT_SPEED,
            shot_cooldown: SHOT_COOLDOWN,
        }
    }
}

/// Stats for one enemy variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyStats {
    pub hp: i32,
    /// Units moved toward the ship per tick (0 = stationary)
    pub move_speed: f64,
    pub bullet_speed: f64,
}

/// Enemy tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub radius: f64,
    /// Ticks between volleys
    pub fire_interval: u32,
    pub turret: EnemyStats,
    pub chaser: EnemyStats,
    pub brute: EnemyStats,
    /// Angle between bullets in the brute's spread (radians)
    pub spread_angle: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            radius: ENEMY_RADIUS,
            fire_interval: ENEMY_FIRE_INTERVAL,
            turret: EnemyStats {
                hp: 1,
                move_speed: 0.0,
                bullet_speed: 4.0,
            },
            chaser: EnemyStats {
                hp: 3,
                move_speed: 1.0,
                bullet_speed: 6.0,
            },
            brute: EnemyStats {
                hp: 6,
                move_speed: 1.0,
                bullet_speed: 4.0,
            },
            spread_angle: SPREAD_ANGLE,
        }
    }
}

/// Projectile rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Added to the enemy radius when testing shots
    pub shot_hit_margin: f64,
    /// Bullets older than this many ticks vanish (None = no cap)
    pub bullet_max_age: Option<u32>,
    /// Bullets leave an explosion when they hit a wall
    pub bullet_wall_explosion: bool,
    /// Bullets leave an explosion when they hit the ship
    pub bullet_hit_explosion: bool,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            shot_hit_margin: 4.0,
            bullet_max_age: None,
            bullet_wall_explosion: true,
            bullet_hit_explosion: true,
        }
    }
}

/// Survival mode spawn schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    /// Ticks before the first spawn once the stage starts
    pub initial_delay: u32,
    /// Spawn interval at elapsed tick 0
    pub initial_interval: u32,
    /// Spawn interval once the ramp is complete
    pub min_interval: u32,
    /// Ticks over which the interval shrinks from initial to min
    pub ramp_ticks: u32,
    /// Every Nth spawn is a brute
    pub strong_every: u32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            initial_delay: 20,
            initial_interval: 60,
            min_interval: 20,
            ramp_ticks: 1200,
            strong_every: 5,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Rule preset this config was derived from
    pub rules: RuleSet,
    /// Seed for the simulation RNG
    pub seed: u64,
    /// World units per grid cell
    pub cell_size: f64,
    pub ship: ShipConfig,
    pub enemies: EnemyConfig,
    pub projectiles: ProjectileConfig,
    pub survival: SurvivalConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::Arcade,
            seed: 0x5eed,
            cell_size: CELL_SIZE,
            ship: ShipConfig::default(),
            enemies: EnemyConfig::default(),
            projectiles: ProjectileConfig::default(),
            survival: SurvivalConfig::default(),
        }
    }
}

impl SimConfig {
    /// Create a config from a rule preset (applies preset defaults)
    pub fn from_preset(preset: RuleSet) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a rule preset (updates projectile rules only)
    pub fn apply_preset(&mut self, preset: RuleSet) {
        self.rules = preset;
        self.projectiles = match preset {
            RuleSet::Classic => ProjectileConfig {
                shot_hit_margin: 0.0,
                bullet_max_age: Some(40),
                bullet_wall_explosion: false,
                bullet_hit_explosion: false,
            },
            RuleSet::Arcade => ProjectileConfig::default(),
        };
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject values that would break grid math or spawn scheduling
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Also rejects NaN
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::NotPositive { field: "cell_size" });
        }
        if self.enemies.fire_interval == 0 {
            return Err(ConfigError::NotPositive {
                field: "enemies.fire_interval",
            });
        }
        if self.survival.strong_every == 0 {
            return Err(ConfigError::NotPositive {
                field: "survival.strong_every",
            });
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file, validating it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded {} config from {}", config.rules.as_str(), path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
