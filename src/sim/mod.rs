//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effect;
pub mod enemy;
pub mod grid;
pub mod input;
pub mod level;
pub mod pool;
pub mod projectile;
pub mod ship;
pub mod spawner;
pub mod stage;
pub mod state;
pub mod tick;
pub mod vector;

pub use effect::{Explosion, Fragment};
pub use enemy::{Enemy, EnemyKind, EnemySlot, HitOutcome};
pub use grid::{Cell, TileGrid};
pub use input::{Button, InputState, ScreenTransform};
pub use level::{LevelDef, LevelError, LevelSet, SpawnSpec};
pub use pool::{EntityId, Pool};
pub use projectile::{Bullet, BulletOutcome, Shot, ShotOutcome};
pub use ship::Ship;
pub use spawner::SurvivalSpawner;
pub use stage::Stage;
pub use state::{RngState, SimState};
pub use tick::{TickReport, tick};
pub use vector::VectorExt;
