//! Player shots and enemy bullets

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::find_enemy_hit;
use super::enemy::EnemySlot;
use super::grid::TileGrid;
use super::pool::{EntityId, Pool};
use super::ship::Ship;
use crate::config::ShipConfig;

/// What happened to a shot this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Flying,
    HitWall,
    HitEnemy(EntityId),
}

/// A player projectile. Flies until it hits a wall or an enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Shot {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self { pos, vel }
    }

    /// Move, then test walls before enemies
    pub fn update(
        &mut self,
        grid: &TileGrid,
        enemies: &Pool<EnemySlot>,
        enemy_radius: f64,
        hit_margin: f64,
    ) -> ShotOutcome {
        self.pos += self.vel;
        if grid.is_wall_at(self.pos) {
            return ShotOutcome::HitWall;
        }
        match find_enemy_hit(enemies, self.pos, enemy_radius, hit_margin) {
            Some(id) => ShotOutcome::HitEnemy(id),
            None => ShotOutcome::Flying,
        }
    }
}

/// What happened to a bullet this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOutcome {
    Flying,
    /// Outlived the configured age cap
    Expired,
    HitWall,
    HitShip,
}

/// An enemy projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Ticks since it was fired
    pub age: u32,
}

impl Bullet {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self { pos, vel, age: 0 }
    }

    /// Move and age, then test the age cap, walls and the ship in that order
    pub fn update(
        &mut self,
        grid: &TileGrid,
        ship: &Ship,
        ship_config: &ShipConfig,
        max_age: Option<u32>,
    ) -> BulletOutcome {
        self.pos += self.vel;
        self.age += 1;
        if max_age.is_some_and(|max| self.age > max) {
            return BulletOutcome::Expired;
        }
        if grid.is_wall_at(self.pos) {
            return BulletOutcome::HitWall;
        }
        if ship.is_hit(self.pos, ship_config) {
            return BulletOutcome::HitShip;
        }
        BulletOutcome::Flying
    }
}
