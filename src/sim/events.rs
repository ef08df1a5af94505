//! Events the simulation hands to the presentation layer
//!
//! The core only signals; drawing, playing sounds and showing toasts happen
//! elsewhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::EnemyKind;
use super::state::{EnemyId, TowerId};

/// Named audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Tower fired
    Shoot,
    /// Projectile impact
    Explosion,
    /// Enemy killed by damage
    EnemyHit,
    TowerPlace,
    GameOver,
    Upgrade,
    /// Rejected command
    Error,
    WaveStart,
    Nuke,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Explosion => "explosion",
            SoundCue::EnemyHit => "enemyHit",
            SoundCue::TowerPlace => "towerPlace",
            SoundCue::GameOver => "gameOver",
            SoundCue::Upgrade => "upgrade",
            SoundCue::Error => "error",
            SoundCue::WaveStart => "waveStart",
            SoundCue::Nuke => "nuke",
        }
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Transient text toast
    Notification(String),
    /// Transient achievement banner
    Achievement { title: String, description: String },
    /// Particle burst centered here
    Explosion { pos: Vec2 },
    Sound(SoundCue),
    WaveStarted { wave: u32, enemies: u32 },
    WaveCompleted { wave: u32, bonus_gold: u32 },
    TowerFired { tower: TowerId, target: EnemyId },
    EnemyKilled { id: EnemyId, kind: EnemyKind, reward: u32 },
    EnemyBreached { id: EnemyId, kind: EnemyKind, damage: i32 },
    GameOver { score: u64, wave: u32 },
}
