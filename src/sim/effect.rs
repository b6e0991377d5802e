//! Explosion effects
//!
//! Purely visual. Nothing in the simulation ever collides with an effect.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector::VectorExt;
use crate::consts::EXPLOSION_TICKS;

/// One particle of an explosion frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub pos: DVec2,
    /// Square width in world units
    pub size: f64,
    /// 0-1, fades as the burst expands
    pub brightness: f64,
}

/// A radial burst of fragments that lives for four ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: DVec2,
    /// Radius of whatever exploded
    pub radius: f64,
    /// Frame index, 0 on the tick it was spawned
    pub age: u32,
}

impl Explosion {
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self {
            pos,
            radius,
            age: 0,
        }
    }

    /// Number of fragments: four per four units of radius, at least one
    pub fn fragment_count(&self) -> usize {
        (4 * (self.radius / 4.0).floor() as usize).max(1)
    }

    /// Advance one frame. Returns false once the last frame has been shown.
    pub fn update(&mut self) -> bool {
        if self.age + 1 >= EXPLOSION_TICKS {
            return false;
        }
        self.age += 1;
        true
    }

    /// Fragments for the current frame, spread evenly around a ring that
    /// grows each tick while fragments shrink and dim
    pub fn fragments(&self) -> impl Iterator<Item = Fragment> + '_ {
        let count = self.fragment_count();
        let frame = self.age as f64;
        let remaining = (EXPLOSION_TICKS - self.age) as f64 / EXPLOSION_TICKS as f64;
        let ring = self.radius * 0.5 * (frame + 1.0);
        let size = (self.radius * 0.5 * remaining).max(1.0);
        (0..count).map(move |i| {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            let offset = if count == 1 {
                DVec2::ZERO
            } else {
                DVec2::new(ring, 0.0).rotated(angle)
            };
            Fragment {
                pos: self.pos + offset,
                size,
                brightness: remaining,
            }
        })
    }
}
