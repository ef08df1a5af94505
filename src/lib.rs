//! Epic TD - A tower defense simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (waves, movement, combat, economy)
//! - `simulation`: Service owning the state, RNG and record storage
//! - `persistence`: Key/value storage for records
//! - `tuning`: Data-driven game balance
//! - `audio`: Cue-to-tone mapping for whatever plays sounds

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod simulation;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{Settings, Theme};
pub use simulation::Simulation;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Particles emitted per explosion
    pub const EXPLOSION_PARTICLES: usize = 20;
    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE_TICKS: u32 = 30;

    /// Waves shown in the lookahead preview
    pub const PREVIEW_WAVES: usize = 3;

    /// Every Nth wave is a boss wave and a milestone
    pub const BOSS_WAVE_INTERVAL: u32 = 5;

    /// Nominal frame length used by the headless runner (ms)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit direction from `from` toward `to` plus the distance between them.
///
/// Coincident points yield a zero direction.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 {
        (delta / dist, dist)
    } else {
        (Vec2::ZERO, 0.0)
    }
}

/// Multiply an integer stat by a factor and floor the result
#[inline]
pub fn scale_floor(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let (dir, dist) = direction(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((dist - 5.0).abs() < 1e-6);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_direction_coincident_points() {
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(direction(p, p), (Vec2::ZERO, 0.0));
    }

    #[test]
    fn test_scale_floor_matches_float_math() {
        assert_eq!(scale_floor(22, 1.5), 33);
        assert_eq!(scale_floor(150, 1.1), 165);
        assert_eq!(scale_floor(1000, 0.9), 900);
        assert_eq!(scale_floor(100, 0.6), 60);
        assert_eq!(scale_floor(161, 0.5), 80);
    }
}
