//! Entity hit tests
//!
//! All entities collide as circles against points (projectile centers).
//! Walls are handled by [`super::grid::TileGrid`]; effects never collide.

use glam::DVec2;

use super::enemy::EnemySlot;
use super::pool::{EntityId, Pool};

/// True if `point` lies within `radius` of `center` (boundary inclusive)
#[inline]
pub fn circle_contains(center: DVec2, radius: f64, point: DVec2) -> bool {
    (point - center).length_squared() <= radius * radius
}

/// First enemy (in pool order) whose hit circle, grown by `margin`, contains
/// `pos`. Spawner slots have no body and are never returned.
pub fn find_enemy_hit(
    enemies: &Pool<EnemySlot>,
    pos: DVec2,
    radius: f64,
    margin: f64,
) -> Option<EntityId> {
    enemies
        .iter()
        .find(|(_, slot)| slot.is_hit(pos, radius, margin))
        .map(|(id, _)| id)
}
