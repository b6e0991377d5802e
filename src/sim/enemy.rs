//! Enemy variants and the enemy-pool slot type

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_contains;
use super::grid::TileGrid;
use super::level::SpawnSpec;
use super::projectile::Bullet;
use super::spawner::SurvivalSpawner;
use super::vector::VectorExt;
use crate::config::{EnemyConfig, EnemyStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Stationary, fires single aimed bullets
    Turret,
    /// Walks toward the ship, fires faster aimed bullets
    Chaser,
    /// Walks toward the ship, fires a three-way spread
    Brute,
}

impl EnemyKind {
    pub fn stats<'a>(&self, config: &'a EnemyConfig) -> &'a EnemyStats {
        match self {
            EnemyKind::Turret => &config.turret,
            EnemyKind::Chaser => &config.chaser,
            EnemyKind::Brute => &config.brute,
        }
    }

    /// Enemy kind for a level spawn entry (None for non-enemy entries)
    pub fn from_spec(spec: SpawnSpec) -> Option<Self> {
        match spec {
            SpawnSpec::Enemy0 => Some(EnemyKind::Turret),
            SpawnSpec::Enemy1 => Some(EnemyKind::Chaser),
            SpawnSpec::Enemy2 => Some(EnemyKind::Brute),
            SpawnSpec::SurvivalModeManager => None,
        }
    }
}

/// Result of damaging an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Damaged,
    /// Hit points just reached zero; the caller removes the enemy
    Destroyed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: DVec2,
    pub hp: i32,
    /// Ticks since the last volley
    pub fire_count: u32,
    /// Set when damaged; shown by the renderer, cleared on the next update
    pub flash: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: DVec2, config: &EnemyConfig) -> Self {
        Self {
            kind,
            pos,
            hp: kind.stats(config).hp,
            fire_count: 0,
            flash: false,
        }
    }

    /// Advance one tick: move toward the ship if mobile, then fire when the
    /// volley counter comes due. Returns the bullets fired this tick.
    pub fn update(&mut self, ship_pos: DVec2, grid: &TileGrid, config: &EnemyConfig) -> Vec<Bullet> {
        self.flash = false;
        let stats = self.kind.stats(config);

        if stats.move_speed > 0.0 {
            let step = (ship_pos - self.pos).clamped_length(0.0, stats.move_speed);
            self.pos = grid.push_out(self.pos + step, config.radius);
        }

        self.fire_count += 1;
        if self.fire_count < config.fire_interval {
            return Vec::new();
        }
        self.fire_count = 0;

        let aim = self.pos.direction_to(ship_pos);
        match self.kind {
            EnemyKind::Turret | EnemyKind::Chaser => {
                vec![Bullet::new(self.pos, aim * stats.bullet_speed)]
            }
            EnemyKind::Brute => [-config.spread_angle, 0.0, config.spread_angle]
                .into_iter()
                .map(|angle| Bullet::new(self.pos, aim.rotated(angle) * stats.bullet_speed))
                .collect(),
        }
    }

    pub fn is_hit(&self, pos: DVec2, radius: f64, offset: f64) -> bool {
        circle_contains(self.pos, radius + offset, pos)
    }

    /// Take one point of damage and flash
    pub fn on_hit(&mut self) -> HitOutcome {
        self.hp -= 1;
        self.flash = true;
        if self.hp <= 0 {
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged
        }
    }
}

/// A member of the enemy pool: a real enemy or the survival spawner, which
/// lives alongside them so the stage never counts as cleared
#[derive(Debug, Clone)]
pub enum EnemySlot {
    Enemy(Enemy),
    Spawner(SurvivalSpawner),
}

impl EnemySlot {
    /// Hit test; spawners have no body
    pub fn is_hit(&self, pos: DVec2, radius: f64, offset: f64) -> bool {
        match self {
            EnemySlot::Enemy(enemy) => enemy.is_hit(pos, radius, offset),
            EnemySlot::Spawner(_) => false,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            EnemySlot::Enemy(enemy) => Some(enemy),
            EnemySlot::Spawner(_) => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match self {
            EnemySlot::Enemy(enemy) => Some(enemy),
            EnemySlot::Spawner(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::sim::grid::TileGrid;

    fn open_grid() -> TileGrid {
        TileGrid::new(32, 32, 8.0)
    }

    #[test]
    fn test_hp_per_kind() {
        let config = EnemyConfig::default();
        let pos = DVec2::new(50.0, 50.0);
        assert_eq!(Enemy::new(EnemyKind::Turret, pos, &config).hp, 1);
        assert_eq!(Enemy::new(EnemyKind::Chaser, pos, &config).hp, 3);
        assert_eq!(Enemy::new(EnemyKind::Brute, pos, &config).hp, 6);
    }

    #[test]
    fn test_hp_decrements_until_destroyed() {
        let config = EnemyConfig::default();
        let mut brute = Enemy::new(EnemyKind::Brute, DVec2::ZERO, &config);
        for expected in (1..6).rev() {
            assert_eq!(brute.on_hit(), HitOutcome::Damaged);
            assert_eq!(brute.hp, expected);
            assert!(brute.flash);
        }
        assert_eq!(brute.on_hit(), HitOutcome::Destroyed);
        assert_eq!(brute.hp, 0);
    }

    #[test]
    fn test_flash_clears_on_update() {
        let config = EnemyConfig::default();
        let mut chaser = Enemy::new(EnemyKind::Chaser, DVec2::new(50.0, 50.0), &config);
        chaser.on_hit();
        chaser.update(DVec2::new(100.0, 50.0), &open_grid(), &config);
        assert!(!chaser.flash);
    }

    #[test]
    fn test_turret_fires_every_interval() {
        let config = EnemyConfig::default();
        let grid = open_grid();
        let ship = DVec2::new(100.0, 50.0);
        let mut turret = Enemy::new(EnemyKind::Turret, DVec2::new(50.0, 50.0), &config);

        let mut volleys = Vec::new();
        for t in 1..=30 {
            let bullets = turret.update(ship, &grid, &config);
            if !bullets.is_empty() {
                volleys.push(t);
                assert_eq!(bullets.len(), 1);
                assert_eq!(bullets[0].vel, DVec2::new(4.0, 0.0));
            }
        }
        assert_eq!(volleys, vec![10, 20, 30]);
        assert_eq!(turret.pos, DVec2::new(50.0, 50.0));
    }

    #[test]
    fn test_chaser_steps_one_unit_toward_ship() {
        let config = EnemyConfig::default();
        let mut chaser = Enemy::new(EnemyKind::Chaser, DVec2::new(50.0, 50.0), &config);
        chaser.update(DVec2::new(50.0, 150.0), &open_grid(), &config);
        assert_eq!(chaser.pos, DVec2::new(50.0, 51.0));

        // Closer than one unit: lands exactly on the target
        let mut close = Enemy::new(EnemyKind::Chaser, DVec2::new(50.0, 50.0), &config);
        close.update(DVec2::new(50.5, 50.0), &open_grid(), &config);
        assert_eq!(close.pos, DVec2::new(50.5, 50.0));
    }

    #[test]
    fn test_brute_spread() {
        let config = EnemyConfig::default();
        let mut brute = Enemy::new(EnemyKind::Brute, DVec2::new(50.0, 50.0), &config);
        brute.fire_count = config.fire_interval - 1;
        let bullets = brute.update(DVec2::new(50.0, 200.0), &open_grid(), &config);
        assert_eq!(bullets.len(), 3);
        // Middle bullet straight at the ship, outer ones mirrored about it
        assert!(bullets[1].vel.x.abs() < 1e-9);
        assert!((bullets[0].vel.x + bullets[2].vel.x).abs() < 1e-9);
        assert!((bullets[0].vel.y - bullets[2].vel.y).abs() < 1e-9);
        let cos = bullets[0].vel.normalize().dot(bullets[1].vel.normalize());
        let angle = cos.clamp(-1.0, 1.0).acos();
        assert!((angle - config.spread_angle).abs() < 1e-9);
        for b in &bullets {
            assert!((b.vel.length() - config.brute.bullet_speed).abs() < 1e-9);
        }
    }

    #[test]
    fn test_spawner_slot_has_no_body() {
        let slot = EnemySlot::Spawner(SurvivalSpawner::new(0));
        assert!(!slot.is_hit(DVec2::ZERO, 100.0, 100.0));
        assert!(slot.as_enemy().is_none());
    }

    #[test]
    fn test_spec_mapping() {
        assert_eq!(EnemyKind::from_spec(SpawnSpec::Enemy0), Some(EnemyKind::Turret));
        assert_eq!(EnemyKind::from_spec(SpawnSpec::Enemy2), Some(EnemyKind::Brute));
        assert_eq!(EnemyKind::from_spec(SpawnSpec::SurvivalModeManager), None);
    }
}
