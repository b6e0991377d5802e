//! The player's ship

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_contains;
use super::grid::TileGrid;
use super::input::{Button, InputState};
use super::projectile::Shot;
use super::vector::VectorExt;
use crate::config::ShipConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: DVec2,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
}

impl Ship {
    pub fn new(pos: DVec2) -> Self {
        Self { pos, cooldown: 0 }
    }

    /// Place the ship for a fresh stage
    pub fn reset(&mut self, pos: DVec2) {
        self.pos = pos;
        self.cooldown = 0;
    }

    /// Move from input, slide along walls, and fire toward the pointer when
    /// the cooldown allows. Returns the shot fired this tick.
    pub fn update(&mut self, input: &InputState, grid: &TileGrid, config: &ShipConfig) -> Option<Shot> {
        let vel = (input.move_axes() * config.speed).clamped_length(0.0, config.max_speed);
        self.pos = grid.push_out(self.pos + vel, config.radius);

        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        if input.is_held(Button::MouseLeft) && self.cooldown == 0 {
            self.cooldown = config.shot_cooldown;
            let aim = self.pos.direction_to(input.pointer);
            return Some(Shot::new(self.pos, aim * config.shot_speed));
        }
        None
    }

    /// Circle test against the configured ship radius
    pub fn is_hit(&self, pos: DVec2, config: &ShipConfig) -> bool {
        circle_contains(self.pos, config.radius, pos)
    }
}
