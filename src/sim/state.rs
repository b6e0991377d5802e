//! Simulation state
//!
//! `SimState` is the explicit context every system works through: it owns
//! the stage, the ship, the four entity pools and the seeded RNG.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effect::Explosion;
use super::enemy::{Enemy, EnemyKind, EnemySlot, HitOutcome};
use super::level::LevelSet;
use super::pool::{EntityId, Pool};
use super::projectile::{Bullet, Shot};
use super::ship::Ship;
use super::spawner::SurvivalSpawner;
use super::stage::Stage;
use crate::config::SimConfig;
use crate::consts::DEATH_RADIUS;

/// RNG state wrapper so a run can be restarted from its seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: SimConfig,
    pub rng_state: RngState,
    pub rng: Pcg32,
    pub stage: Stage,
    pub ship: Ship,
    pub enemies: Pool<EnemySlot>,
    pub shots: Pool<Shot>,
    pub bullets: Pool<Bullet>,
    /// Visual only, never consulted by collision
    pub effects: Pool<Explosion>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of times the ship has been destroyed
    pub deaths: u32,
    /// Next entity ID
    next_id: u32,
}

impl SimState {
    /// Create a state on the first built-in level
    pub fn new(config: SimConfig) -> Self {
        Self::with_levels(config, LevelSet::builtin())
    }

    pub fn with_levels(config: SimConfig, levels: LevelSet) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Running with questionable config: {e}");
        }
        let rng_state = RngState::new(config.seed);
        let stage = Stage::new(levels, config.cell_size);
        let mut state = Self {
            rng: rng_state.to_rng(),
            rng_state,
            ship: Ship::new(stage.start_position()),
            stage,
            enemies: Pool::new(),
            shots: Pool::new(),
            bullets: Pool::new(),
            effects: Pool::new(),
            time_ticks: 0,
            deaths: 0,
            next_id: 1,
            config,
        };
        state.reset_stage();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: DVec2) -> EntityId {
        let id = self.next_entity_id();
        let enemy = Enemy::new(kind, pos, &self.config.enemies);
        self.enemies.push(id, EnemySlot::Enemy(enemy));
        log::debug!("Spawned {:?} {:?} at ({:.1}, {:.1})", kind, id, pos.x, pos.y);
        id
    }

    pub fn spawn_survival_spawner(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let spawner = SurvivalSpawner::new(self.config.survival.initial_delay);
        self.enemies.push(id, EnemySlot::Spawner(spawner));
        id
    }

    pub fn spawn_shot(&mut self, shot: Shot) -> EntityId {
        let id = self.next_entity_id();
        self.shots.push(id, shot);
        id
    }

    pub fn spawn_bullet(&mut self, bullet: Bullet) -> EntityId {
        let id = self.next_entity_id();
        self.bullets.push(id, bullet);
        id
    }

    pub fn spawn_explosion(&mut self, pos: DVec2, radius: f64) -> EntityId {
        let id = self.next_entity_id();
        self.effects.push(id, Explosion::new(pos, radius));
        id
    }

    /// Number of real enemies (the survival spawner is not counted)
    pub fn enemy_count(&self) -> usize {
        self.enemies.values().filter(|s| s.as_enemy().is_some()).count()
    }

    /// Damage an enemy by one point. A destroyed enemy is removed from the
    /// pool and leaves an explosion behind. Returns None if `id` is not a
    /// present enemy.
    pub fn damage_enemy(&mut self, id: EntityId) -> Option<HitOutcome> {
        let enemy = self.enemies.get_mut(id)?.as_enemy_mut()?;
        let outcome = enemy.on_hit();
        if outcome == HitOutcome::Destroyed {
            let pos = enemy.pos;
            self.enemies.remove(id);
            self.spawn_explosion(pos, DEATH_RADIUS);
            log::debug!("Destroyed enemy {:?}", id);
        }
        Some(outcome)
    }

    /// Rebuild the active stage: place the ship, clear every pool and spawn
    /// the level's markers
    pub fn reset_stage(&mut self) {
        self.enemies.clear();
        self.shots.clear();
        self.bullets.clear();
        self.effects.clear();
        self.ship.reset(self.stage.start_position());

        for (spec, pos) in self.stage.spawns() {
            match EnemyKind::from_spec(spec) {
                Some(kind) => {
                    self.spawn_enemy(kind, pos);
                }
                None => {
                    self.spawn_survival_spawner();
                }
            }
        }
        log::info!(
            "Stage {} \"{}\" started with {} enemies",
            self.stage.index(),
            self.stage.level().name,
            self.enemy_count()
        );
    }

    /// Advance to the next level, wrapping to the first after the last
    pub fn go_to_next_stage(&mut self) {
        let next = self.stage.next_index();
        self.stage.load(next);
        self.reset_stage();
    }

    pub fn go_to_first_stage(&mut self) {
        self.stage.load(0);
        self.reset_stage();
    }

    /// Start the run over from its seed: first stage, fresh RNG, counters
    /// zeroed. Replaying the same input afterwards reproduces the run.
    pub fn restart(&mut self) {
        log::info!("Restarting run with seed {}", self.rng_state.seed);
        self.rng = self.rng_state.to_rng();
        self.time_ticks = 0;
        self.deaths = 0;
        self.next_id = 1;
        self.go_to_first_stage();
    }

    /// Ship destroyed: restart from the first stage and leave a burst where
    /// the ship died
    pub fn kill_ship(&mut self) {
        let pos = self.ship.pos;
        self.deaths += 1;
        log::info!("Ship destroyed at ({:.1}, {:.1}), restarting", pos.x, pos.y);
        self.go_to_first_stage();
        self.spawn_explosion(pos, DEATH_RADIUS);
    }
}
