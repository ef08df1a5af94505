//! Wave director
//!
//! Decides what spawns and when, and closes a wave once every enemy it sent
//! is dead or has breached.

use serde::{Deserialize, Serialize};

use super::catalog::EnemyKind;
use super::commands::CommandError;
use super::events::{GameEvent, SoundCue};
use super::random::RandomSource;
use super::state::{Enemy, EnemyId, GameState};
use crate::consts::{BOSS_WAVE_INTERVAL, PREVIEW_WAVES};

/// Composition hint for an upcoming wave. Shown to the player only; the
/// spawner does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WavePreview {
    pub wave: u32,
    pub enemy_count: u32,
    pub boss_wave: bool,
    pub minions: u32,
    pub tanks: u32,
    pub swarms: u32,
}

/// Enemies sent by wave `wave`
#[inline]
pub fn enemies_in_wave(wave: u32) -> u32 {
    5 + wave * 2
}

#[inline]
pub fn is_boss_wave(wave: u32) -> bool {
    wave % BOSS_WAVE_INTERVAL == 0
}

/// Preview of `wave` and the waves right after it
pub fn wave_preview(wave: u32) -> [WavePreview; PREVIEW_WAVES] {
    std::array::from_fn(|i| {
        let wave = wave + i as u32;
        let count = enemies_in_wave(wave);
        let boss_wave = is_boss_wave(wave);
        let share = |f: f64| (count as f64 * f).floor() as u32;
        WavePreview {
            wave,
            enemy_count: count,
            boss_wave,
            minions: share(if boss_wave { 0.5 } else { 0.6 }),
            tanks: share(if boss_wave { 0.3 } else { 0.2 }),
            swarms: share(0.2),
        }
    })
}

/// Start the current wave
pub fn start_wave(state: &mut GameState) -> Result<u32, CommandError> {
    if state.wave.active {
        return Err(CommandError::WaveAlreadyActive);
    }
    if state.wave.cooldown_ms > 0.0 {
        return Err(CommandError::WaveCooldown {
            remaining_ms: state.wave.cooldown_ms,
        });
    }

    let wave = state.wave.current;
    let enemies = enemies_in_wave(wave);
    state.wave.active = true;
    state.wave.enemies_to_spawn = enemies;
    state.wave.spawn_elapsed_ms = 0.0;
    state.wave.boss_spawned = false;
    state.wave.spawned_this_wave = 0;

    log::info!("Wave {} started ({} enemies)", wave, enemies);
    state.emit(GameEvent::Sound(SoundCue::WaveStart));
    state.emit(GameEvent::Notification(format!("Wave {wave} started!")));
    state.emit(GameEvent::WaveStarted { wave, enemies });
    Ok(wave)
}

/// Pick the kind for the next spawn.
///
/// The last slot of a boss wave is a boss. Every other slot is a minion 80%
/// of the time and a tank otherwise; swarms are never drawn.
#[allow(clippy::if_same_then_else)]
pub fn pick_enemy_kind(state: &GameState, rng: &mut dyn RandomSource) -> EnemyKind {
    let wave = &state.wave;
    if is_boss_wave(wave.current) && !wave.boss_spawned && wave.enemies_to_spawn == 1 {
        return EnemyKind::Boss;
    }
    let roll = rng.next_unit();
    if roll < 0.6 {
        EnemyKind::Minion
    } else if roll < 0.8 {
        EnemyKind::Minion
    } else {
        EnemyKind::Tank
    }
}

/// Create an enemy of `kind` at the path start
pub fn spawn_enemy(state: &mut GameState, kind: EnemyKind) -> EnemyId {
    let stats = kind.stats(state.wave.current, state.difficulty);
    let id = EnemyId(state.next_entity_id());
    let pos = state.spawn_point();
    state.enemies.push(Enemy {
        id,
        kind,
        pos,
        health: stats.health,
        max_health: stats.health,
        speed: stats.speed,
        reward: stats.reward,
        damage: stats.damage,
        path_index: 0,
        armor: stats.armor,
        is_boss: stats.is_boss,
        size: stats.size,
    });
    if stats.is_boss {
        state.wave.boss_spawned = true;
        log::info!("Boss spawned on wave {}", state.wave.current);
    }
    id
}

/// Per-tick director step: inter-wave countdown, spawning, completion.
///
/// `dt` is already scaled by game speed.
pub fn update_waves(state: &mut GameState, rng: &mut dyn RandomSource, dt: f32) {
    if !state.wave.active && state.wave.cooldown_ms > 0.0 {
        state.wave.cooldown_ms = (state.wave.cooldown_ms - dt).max(0.0);
    }

    if state.wave.active && state.wave.enemies_to_spawn > 0 {
        state.wave.spawn_elapsed_ms += dt;
        if state.wave.spawn_elapsed_ms >= state.tuning.spawn_interval_ms {
            state.wave.spawn_elapsed_ms = 0.0;
            let kind = pick_enemy_kind(state, rng);
            spawn_enemy(state, kind);
            state.wave.enemies_to_spawn -= 1;
            state.wave.spawned_this_wave += 1;
        }
    }

    if state.wave.active && state.wave.enemies_to_spawn == 0 && state.enemies.is_empty() {
        complete_wave(state);
    }
}

/// Close the running wave and pay out
pub fn complete_wave(state: &mut GameState) {
    let wave = state.wave.current;
    let bonus = state.tuning.wave_bonus(wave);

    state.wave.active = false;
    state.wave.cooldown_ms = state.tuning.wave_cooldown_ms;
    state.economy.gold += bonus;
    state.economy.score += state.tuning.wave_clear_score;

    log::info!("Wave {} complete, bonus {} gold", wave, bonus);
    state.emit(GameEvent::WaveCompleted {
        wave,
        bonus_gold: bonus,
    });
    state.emit(GameEvent::Notification(format!(
        "Wave {wave} complete! Bonus: {bonus} gold"
    )));
    if is_boss_wave(wave) {
        state.emit(GameEvent::Achievement {
            title: format!("Wave {wave} Master"),
            description: format!("You completed {wave} waves!"),
        });
    }

    state.wave.current += 1;
    state.preview = wave_preview(state.wave.current);
}
