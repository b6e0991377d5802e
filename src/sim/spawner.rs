//! Survival mode spawner
//!
//! Sits in the enemy pool like an enemy but has no body. It drops chasers in
//! along the arena border on a schedule that tightens over time; every few
//! spawns is a brute instead.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::grid::TileGrid;
use crate::config::SurvivalConfig;

/// Which border an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

const EDGES: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalSpawner {
    /// Ticks since the spawner started
    pub elapsed: u64,
    /// Ticks until the next spawn
    pub countdown: u32,
    /// Enemies spawned so far
    pub spawned: u32,
}

impl SurvivalSpawner {
    pub fn new(initial_delay: u32) -> Self {
        Self {
            elapsed: 0,
            countdown: initial_delay,
            spawned: 0,
        }
    }

    /// Spawn interval at `elapsed` ticks: linear from the initial interval
    /// down to the minimum over the ramp, then flat.
    pub fn interval_at(elapsed: u64, config: &SurvivalConfig) -> u32 {
        let initial = config.initial_interval as f64;
        let min = config.min_interval as f64;
        let progress = if config.ramp_ticks == 0 {
            1.0
        } else {
            (elapsed as f64 / config.ramp_ticks as f64).min(1.0)
        };
        (initial - (initial - min) * progress).round() as u32
    }

    /// Kind of the next spawn: every `strong_every`-th one is a brute.
    /// A `strong_every` of zero never spawns brutes.
    pub fn next_kind(&self, config: &SurvivalConfig) -> EnemyKind {
        if (self.spawned + 1).checked_rem(config.strong_every) == Some(0) {
            EnemyKind::Brute
        } else {
            EnemyKind::Chaser
        }
    }

    /// Advance one tick, returning an enemy to spawn when the countdown runs out
    pub fn update(
        &mut self,
        grid: &TileGrid,
        config: &SurvivalConfig,
        rng: &mut impl Rng,
    ) -> Option<(EnemyKind, DVec2)> {
        let spawn = if self.countdown == 0 {
            let kind = self.next_kind(config);
            let pos = border_position(grid, rng);
            self.spawned += 1;
            self.countdown = Self::interval_at(self.elapsed, config);
            Some((kind, pos))
        } else {
            self.countdown -= 1;
            None
        };
        self.elapsed += 1;
        spawn
    }
}

/// Random point on the midline of the first interior ring of cells
pub fn border_position(grid: &TileGrid, rng: &mut impl Rng) -> DVec2 {
    let edge = EDGES[rng.random_range(0..EDGES.len())];
    let cs = grid.cell_size();
    let size = grid.world_size();
    let inset = cs * 1.5;

    match edge {
        Edge::Top => DVec2::new(along_edge(size.x, inset, rng), inset),
        Edge::Bottom => DVec2::new(along_edge(size.x, inset, rng), size.y - inset),
        Edge::Left => DVec2::new(inset, along_edge(size.y, inset, rng)),
        Edge::Right => DVec2::new(size.x - inset, along_edge(size.y, inset, rng)),
    }
}

fn along_edge(extent: f64, inset: f64, rng: &mut impl Rng) -> f64 {
    let hi = extent - inset;
    if hi > inset {
        rng.random_range(inset..hi)
    } else {
        extent / 2.0
    }
}
