//! Tile Blaster - a top-down maze shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, tile collisions, stage flow)
//! - `renderer`: Draw-call interface consumed by an external renderer
//! - `clock`: Fixed-timestep scheduling
//! - `config`: Data-driven game balance and rule presets

pub mod clock;
pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, RuleSet, SimConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in seconds (10 Hz arcade tick)
    pub const TICK_DT: f64 = 0.1;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Grid defaults
    pub const GRID_CELLS: usize = 32;
    pub const CELL_SIZE: f64 = 8.0;

    /// Ship defaults
    pub const SHIP_SPEED: f64 = 4.0;
    pub const SHIP_RADIUS: f64 = 4.0;
    pub const SHOT_SPEED: f64 = 8.0;
    pub const SHOT_COOLDOWN: u32 = 4;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f64 = 4.0;
    pub const ENEMY_FIRE_INTERVAL: u32 = 10;
    /// Spread angle for the brute's fan of bullets (22.5 degrees)
    pub const SPREAD_ANGLE: f64 = std::f64::consts::PI / 8.0;

    /// Explosion lifetime in ticks
    pub const EXPLOSION_TICKS: u32 = 4;
    /// Explosion radius for projectile impacts
    pub const IMPACT_RADIUS: f64 = 2.0;
    /// Explosion radius for destroyed ships/enemies
    pub const DEATH_RADIUS: f64 = 8.0;
}
