//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step. Order per tick:
//! win check, ship, enemies, shots, bullets, effects, input edges.
//!
//! Every pool pass iterates a snapshot of ids. Entities appended during a
//! pass wait for the next tick; entities removed earlier in a pass are
//! skipped. The effect pass snapshot is taken at the very start of the tick,
//! so bursts spawned this tick show their first frame before aging.

use super::enemy::{EnemySlot, HitOutcome};
use super::input::InputState;
use super::projectile::{BulletOutcome, ShotOutcome};
use super::state::SimState;
use crate::consts::IMPACT_RADIUS;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The enemy pool was empty and the next stage was loaded
    pub stage_cleared: bool,
    /// A bullet hit the ship and the game restarted from the first stage
    pub ship_destroyed: bool,
    pub shots_fired: u32,
    pub bullets_fired: u32,
    pub enemies_spawned: u32,
    pub enemies_destroyed: u32,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &mut InputState) -> TickReport {
    let mut report = TickReport::default();
    let effect_pass = state.effects.ids();

    // Stage cleared: every enemy is gone (a survival spawner never leaves)
    if state.enemies.is_empty() {
        log::info!("Stage {} cleared", state.stage.index());
        state.go_to_next_stage();
        report.stage_cleared = true;
    }

    update_ship(state, input, &mut report);
    update_enemies(state, &mut report);
    update_shots(state, &mut report);
    update_bullets(state, &mut report);
    update_effects(state, effect_pass);

    input.advance_edges();
    state.time_ticks += 1;

    log::trace!(
        "tick {}: enemies={} shots={} bullets={} effects={}",
        state.time_ticks,
        state.enemies.len(),
        state.shots.len(),
        state.bullets.len(),
        state.effects.len()
    );
    report
}

fn update_ship(state: &mut SimState, input: &InputState, report: &mut TickReport) {
    let shot = state
        .ship
        .update(input, state.stage.grid(), &state.config.ship);
    if let Some(shot) = shot {
        state.spawn_shot(shot);
        report.shots_fired += 1;
    }
}

fn update_enemies(state: &mut SimState, report: &mut TickReport) {
    for id in state.enemies.ids() {
        let Some(mut slot) = state.enemies.check_out(id) else {
            continue;
        };
        match &mut slot {
            EnemySlot::Enemy(enemy) => {
                let volley = enemy.update(state.ship.pos, state.stage.grid(), &state.config.enemies);
                for bullet in volley {
                    state.spawn_bullet(bullet);
                    report.bullets_fired += 1;
                }
            }
            EnemySlot::Spawner(spawner) => {
                let spawn = spawner.update(
                    state.stage.grid(),
                    &state.config.survival,
                    &mut state.rng,
                );
                if let Some((kind, pos)) = spawn {
                    state.spawn_enemy(kind, pos);
                    report.enemies_spawned += 1;
                }
            }
        }
        state.enemies.check_in(id, slot);
    }
}

fn update_shots(state: &mut SimState, report: &mut TickReport) {
    let margin = state.config.projectiles.shot_hit_margin;
    let radius = state.config.enemies.radius;

    for id in state.shots.ids() {
        let Some(mut shot) = state.shots.check_out(id) else {
            continue;
        };
        match shot.update(state.stage.grid(), &state.enemies, radius, margin) {
            ShotOutcome::Flying => state.shots.check_in(id, shot),
            ShotOutcome::HitWall => {
                state.shots.discard(id);
                state.spawn_explosion(shot.pos, IMPACT_RADIUS);
            }
            ShotOutcome::HitEnemy(enemy_id) => {
                state.shots.discard(id);
                state.spawn_explosion(shot.pos, IMPACT_RADIUS);
                if state.damage_enemy(enemy_id) == Some(HitOutcome::Destroyed) {
                    report.enemies_destroyed += 1;
                }
            }
        }
    }
}

fn update_bullets(state: &mut SimState, report: &mut TickReport) {
    let rules = state.config.projectiles.clone();

    for id in state.bullets.ids() {
        let Some(mut bullet) = state.bullets.check_out(id) else {
            continue;
        };
        let outcome = bullet.update(
            state.stage.grid(),
            &state.ship,
            &state.config.ship,
            rules.bullet_max_age,
        );
        match outcome {
            BulletOutcome::Flying => state.bullets.check_in(id, bullet),
            BulletOutcome::Expired => state.bullets.discard(id),
            BulletOutcome::HitWall => {
                state.bullets.discard(id);
                if rules.bullet_wall_explosion {
                    state.spawn_explosion(bullet.pos, IMPACT_RADIUS);
                }
            }
            BulletOutcome::HitShip => {
                state.bullets.discard(id);
                // The restart clears every pool; the rest of this pass is moot
                state.kill_ship();
                if rules.bullet_hit_explosion {
                    state.spawn_explosion(bullet.pos, IMPACT_RADIUS);
                }
                report.ship_destroyed = true;
                return;
            }
        }
    }
}

fn update_effects(state: &mut SimState, pass: Vec<super::pool::EntityId>) {
    for id in pass {
        let Some(mut explosion) = state.effects.check_out(id) else {
            continue;
        };
        if explosion.update() {
            state.effects.check_in(id, explosion);
        } else {
            state.effects.discard(id);
        }
    }
}
