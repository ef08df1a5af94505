//! Per-frame simulation tick
//!
//! The pass order is part of the contract:
//! 1. scale elapsed time by game speed and advance the clock
//! 2. nuke cooldown decay
//! 3. particle decay
//! 4. wave director (inter-wave countdown, spawning, completion)
//! 5. enemy mover (movement, breach, death-by-health)
//! 6. towers acquire targets and fire
//! 7. projectiles advance and resolve impacts
//!
//! Deaths caused by impacts in step 7 are collected by step 5 of the next tick.

use super::combat::{update_projectiles, update_towers};
use super::effects::update_particles;
use super::movement::update_enemies;
use super::random::RandomSource;
use super::state::{GamePhase, GameState};
use super::wave::update_waves;

/// Advance the game by one frame of `elapsed_ms` wall-clock time.
///
/// Nothing happens unless the phase is `Playing`.
pub fn tick(state: &mut GameState, rng: &mut dyn RandomSource, elapsed_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = elapsed_ms.max(0.0) * state.speed_multiplier();
    state.clock_ms += dt as f64;
    state.time_ticks += 1;

    if state.nuke_cooldown_ms > 0.0 {
        state.nuke_cooldown_ms = (state.nuke_cooldown_ms - dt).max(0.0);
    }

    update_particles(state);
    update_waves(state, rng, dt);
    update_enemies(state);
    update_towers(state);
    update_projectiles(state);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::catalog::{Difficulty, EnemyKind, TowerKind};
    use crate::sim::commands::{activate_nuke, place_tower, start_game, start_next_wave, toggle_pause};
    use crate::sim::events::GameEvent;
    use crate::sim::map::SPOT_POSITIONS;
    use crate::sim::random::{ScriptedRandom, seeded};
    use crate::sim::state::GameSpeed;
    use crate::sim::wave::{enemies_in_wave, spawn_enemy};
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default());
        start_game(&mut state, Difficulty::Normal);
        state
    }

    fn count_events(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
        state.events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut state = GameState::new(Tuning::default());
        let mut rng = ScriptedRandom::constant(0.0);
        tick(&mut state, &mut rng, FRAME_MS);
        assert_eq!(state.time_ticks, 0);

        start_game(&mut state, Difficulty::Normal);
        start_next_wave(&mut state).unwrap();
        tick(&mut state, &mut rng, 1000.0);
        assert_eq!(state.enemies.len(), 1);
        let pos = state.enemies[0].pos;

        toggle_pause(&mut state).unwrap();
        for _ in 0..100 {
            tick(&mut state, &mut rng, 1000.0);
        }
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, pos);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_speed_scales_clock_and_cooldowns() {
        let mut state = playing_state();
        let mut rng = ScriptedRandom::constant(0.0);
        activate_nuke(&mut state).unwrap();
        state.speed = GameSpeed::Fast;

        tick(&mut state, &mut rng, 100.0);
        assert_eq!(state.clock_ms, 200.0);
        assert_eq!(state.nuke_cooldown_ms, 29_800.0);
    }

    #[test]
    fn test_nuke_available_again_after_cooldown() {
        let mut state = playing_state();
        let mut rng = ScriptedRandom::constant(0.0);
        activate_nuke(&mut state).unwrap();
        for _ in 0..29 {
            tick(&mut state, &mut rng, 1000.0);
        }
        assert!(activate_nuke(&mut state).is_err());
        tick(&mut state, &mut rng, 1000.0);
        assert_eq!(activate_nuke(&mut state), Ok(0));
    }

    /// Run at 60 fps until the wave completes or the game ends; returns the
    /// number of enemies the wave spawned
    fn run_wave(state: &mut GameState, rng: &mut dyn RandomSource) -> u32 {
        let wave = state.wave.current;
        for _ in 0..200_000 {
            tick(state, rng, FRAME_MS);
            if !state.wave.active || state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert!(state.wave.current > wave || state.phase == GamePhase::GameOver);
        state.wave.spawned_this_wave
    }

    #[test]
    fn test_wave_one_without_towers_all_breach() {
        let mut state = playing_state();
        // minion, minion, tank, minion, minion, tank, minion
        let mut rng = ScriptedRandom::new(vec![0.1, 0.5, 0.85, 0.3, 0.7, 0.95, 0.2]);
        start_next_wave(&mut state).unwrap();

        let spawned = run_wave(&mut state, &mut rng);

        assert_eq!(spawned, 7);
        let breached: i32 = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::EnemyBreached { damage, .. } => Some(*damage),
                _ => None,
            })
            .sum();
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::EnemyBreached { .. })),
            7
        );
        assert_eq!(breached, 11);
        assert_eq!(state.economy.lives, 20 - breached);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.wave.current, 2);
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::WaveCompleted { .. })),
            1
        );
    }

    #[test]
    fn test_every_wave_spawns_its_quota() {
        let mut state = playing_state();
        let mut rng = ScriptedRandom::constant(0.3);
        state.economy.lives = 1_000_000;

        for wave in 1..=5 {
            start_next_wave(&mut state).unwrap();
            let spawned = run_wave(&mut state, &mut rng);
            assert_eq!(spawned, enemies_in_wave(wave), "wave {wave}");
            state.wave.cooldown_ms = 0.0;
        }
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::WaveCompleted { .. })),
            5
        );
        // Wave 5 ends with its boss
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyBreached {
                kind: EnemyKind::Boss,
                ..
            }
        )));
    }

    #[test]
    fn test_archer_kills_wave_one_minion() {
        let mut state = playing_state();
        let mut rng = ScriptedRandom::constant(0.0);
        // (200, 200) is 50 units from the path leg at y = 150
        place_tower(&mut state, TowerKind::Archer, SPOT_POSITIONS[0]).unwrap();
        assert_eq!(state.economy.gold, 0);

        spawn_enemy(&mut state, EnemyKind::Minion);
        state.enemies[0].pos = Vec2::new(100.0, 200.0);
        state.enemies[0].path_index = 1;

        let mut shots = 0;
        for _ in 0..2_000 {
            tick(&mut state, &mut rng, FRAME_MS);
            shots = count_events(&state, |e| matches!(e, GameEvent::TowerFired { .. }));
            if state.enemies.is_empty() {
                break;
            }
        }

        assert!(shots >= 3);
        assert_eq!(state.economy.kill_count, 1);
        assert_eq!(state.economy.gold, 10);
        assert_eq!(state.economy.score, 100);
        assert_eq!(state.economy.lives, 20);
        // Three 22-damage hits plus the kill's max health
        assert!(state.economy.total_damage >= 66 + 60);
    }

    #[test]
    fn test_game_over_stops_simulation() {
        let mut state = playing_state();
        let mut rng = ScriptedRandom::constant(0.9);
        state.economy.lives = 3;
        start_next_wave(&mut state).unwrap();

        for _ in 0..100_000 {
            tick(&mut state, &mut rng, FRAME_MS);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        let ticks = state.time_ticks;
        tick(&mut state, &mut rng, FRAME_MS);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::GameOver { .. })),
            1
        );
    }

    #[test]
    fn test_determinism() {
        let run = |seed: u64| {
            let mut state = playing_state();
            let mut rng = seeded(seed);
            place_tower(&mut state, TowerKind::Archer, SPOT_POSITIONS[0]).unwrap();
            start_next_wave(&mut state).unwrap();
            for _ in 0..3_000 {
                tick(&mut state, &mut rng, FRAME_MS);
            }
            (
                state.economy.gold,
                state.economy.lives,
                state.economy.score,
                state.enemies.iter().map(|e| e.kind).collect::<Vec<_>>(),
            )
        };
        assert_eq!(run(99), run(99));
    }
}
