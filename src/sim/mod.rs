//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame time only
//! - Injected RNG only (see [`RandomSource`])
//! - Stable iteration order (spawn/placement order)
//! - No rendering, audio or platform dependencies

pub mod catalog;
pub mod combat;
pub mod commands;
pub mod effects;
pub mod events;
pub mod map;
pub mod movement;
pub mod random;
pub mod state;
pub mod tick;
pub mod wave;

pub use catalog::{Difficulty, EnemyKind, EnemyStats, TowerKind, TowerStats};
pub use commands::{
    CommandError, Upgrade, activate_nuke, place_tower, select_tower_near, sell_selected_tower,
    start_game, start_next_wave, toggle_fast_forward, toggle_pause, upgrade_selected_tower,
};
pub use events::{GameEvent, SoundCue};
pub use map::{BASE_POSITION, PATH, SPOT_POSITIONS, TowerSpot};
pub use random::{RandomSource, ScriptedRandom, seeded};
pub use state::{
    Economy, Enemy, EnemyId, GamePhase, GameSpeed, GameState, Particle, Projectile, Tower,
    TowerId, WaveState,
};
pub use tick::tick;
pub use wave::{WavePreview, wave_preview};
