//! Enemy mover
//!
//! Walks every enemy along the path polyline, then resolves breaches and
//! deaths for the same pass.

use super::effects::spawn_explosion;
use super::events::{GameEvent, SoundCue};
use super::map::{PATH, last_waypoint};
use super::state::{Enemy, GameState};
use crate::direction;

/// What happened to an enemy during its movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still walking
    Moving,
    /// Sitting on the final waypoint
    AtBase,
}

/// Move one enemy by `speed * speed_multiplier`.
///
/// When the next waypoint is no farther than one step, the enemy snaps to the
/// next waypoint index without moving its position.
pub fn step_enemy(enemy: &mut Enemy, speed_multiplier: f32) -> StepOutcome {
    if enemy.path_index >= last_waypoint() {
        return StepOutcome::AtBase;
    }
    let target = PATH[enemy.path_index + 1];
    let (dir, dist) = direction(enemy.pos, target);
    let travel = enemy.speed * speed_multiplier;
    if dist <= travel {
        enemy.path_index += 1;
    } else {
        enemy.pos += dir * travel;
    }
    StepOutcome::Moving
}

/// Per-tick mover pass: movement, breach, then death-by-health.
///
/// An enemy sitting on the base is resolved as a breach and skips the health
/// check, so it can never count as both a kill and a breach.
pub fn update_enemies(state: &mut GameState) {
    let multiplier = state.speed_multiplier();
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        if step_enemy(&mut enemy, multiplier) == StepOutcome::AtBase {
            breach(state, &enemy);
            continue;
        }

        if enemy.is_dead() {
            kill(state, &enemy);
            continue;
        }

        survivors.push(enemy);
    }

    // Nothing above spawns enemies, so the taken list is the whole population
    state.enemies = survivors;
}

fn breach(state: &mut GameState, enemy: &Enemy) {
    state.economy.lives -= enemy.damage;
    log::debug!(
        "{} {:?} breached, lives now {}",
        enemy.kind.as_str(),
        enemy.id,
        state.economy.lives
    );
    state.emit(GameEvent::EnemyBreached {
        id: enemy.id,
        kind: enemy.kind,
        damage: enemy.damage,
    });
    if state.economy.lives <= 0 {
        super::commands::game_over(state);
    }
}

fn kill(state: &mut GameState, enemy: &Enemy) {
    state.economy.gold += enemy.reward;
    state.economy.score += enemy.reward as u64 * state.tuning.kill_score_multiplier;
    state.economy.kill_count += 1;
    state.economy.total_damage += enemy.max_health.max(0) as u64;
    spawn_explosion(state, enemy.pos);
    state.emit(GameEvent::Sound(SoundCue::EnemyHit));
    state.emit(GameEvent::EnemyKilled {
        id: enemy.id,
        kind: enemy.kind,
        reward: enemy.reward,
    });
}
