//! Scene emission: one primitive per entity per frame

use super::{Renderer, Rgb};
use crate::sim::enemy::{EnemyKind, EnemySlot};
use crate::sim::state::SimState;

const WALL: Rgb = Rgb::GREY;
const SHIP: Rgb = Rgb::GREEN;
const SHOT: Rgb = Rgb::GREEN;
const BULLET: Rgb = Rgb::RED;
const FLASH: Rgb = Rgb::WHITE;
const FIRE: Rgb = Rgb(0xff, 0xcc, 0x00);

/// Projectiles are drawn as 4-unit squares
const PROJECTILE_WIDTH: f64 = 4.0;

fn enemy_color(kind: EnemyKind) -> Rgb {
    match kind {
        EnemyKind::Turret => Rgb::RED,
        EnemyKind::Chaser => Rgb(0xff, 0x80, 0x00),
        EnemyKind::Brute => Rgb(0xff, 0x00, 0xff),
    }
}

/// Emit draw calls for the whole scene, back to front
pub fn draw_scene(state: &SimState, renderer: &mut impl Renderer) {
    let grid = state.stage.grid();
    for (x, y) in grid.walls() {
        renderer.draw_square(grid.cell_center(x, y), grid.cell_size(), WALL);
    }

    for slot in state.enemies.values() {
        // The survival spawner has no body
        let EnemySlot::Enemy(enemy) = slot else {
            continue;
        };
        let color = if enemy.flash {
            FLASH
        } else {
            enemy_color(enemy.kind)
        };
        renderer.draw_square(enemy.pos, state.config.enemies.radius * 2.0, color);
    }

    renderer.draw_square(state.ship.pos, state.config.ship.radius * 2.0, SHIP);

    for shot in state.shots.values() {
        renderer.draw_square(shot.pos, PROJECTILE_WIDTH, SHOT);
    }
    for bullet in state.bullets.values() {
        renderer.draw_square(bullet.pos, PROJECTILE_WIDTH, BULLET);
    }

    for explosion in state.effects.values() {
        for fragment in explosion.fragments() {
            renderer.draw_square(fragment.pos, fragment.size, FIRE.scaled(fragment.brightness));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimConfig;
    use crate::renderer::{DrawCmd, DrawList};
    use glam::DVec2;

    #[test]
    fn test_scene_draws_every_entity() {
        let state = SimState::new(SimConfig::default());
        let mut list = DrawList::new();
        draw_scene(&state, &mut list);

        let walls = state.stage.grid().walls().count();
        assert_eq!(list.count_color(WALL), walls);
        assert_eq!(list.count_color(Rgb::RED), state.enemy_count());
        assert_eq!(list.count_color(SHIP), 1);
        assert_eq!(list.len(), walls + state.enemy_count() + 1);
    }

    #[test]
    fn test_flashing_enemy_is_white() {
        let mut state = SimState::new(SimConfig::default());
        let id = state.spawn_enemy(EnemyKind::Brute, DVec2::new(60.0, 60.0));
        state.damage_enemy(id);

        let mut list = DrawList::new();
        draw_scene(&state, &mut list);
        assert!(list.commands.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Square { center, color, .. } if *center == DVec2::new(60.0, 60.0) && *color == FLASH
        )));
        assert_eq!(list.count_color(enemy_color(EnemyKind::Brute)), 0);
    }

    #[test]
    fn test_spawner_is_invisible() {
        let mut state = SimState::new(SimConfig::default());
        state.stage.load(3);
        state.reset_stage();
        let mut list = DrawList::new();
        draw_scene(&state, &mut list);
        let walls = state.stage.grid().walls().count();
        assert_eq!(list.len(), walls + 1);
    }
}
