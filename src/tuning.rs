//! Data-driven game balance
//!
//! Every balance constant the simulation reads lives here so runs can be
//! re-tuned from a JSON file without touching the engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::StoreError;
use crate::sim::TowerKind;

/// Purchase price per tower kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerCosts {
    pub archer: u32,
    pub cannon: u32,
    pub magic: u32,
    pub sniper: u32,
}

impl Default for TowerCosts {
    fn default() -> Self {
        Self {
            archer: 100,
            cannon: 150,
            magic: 200,
            sniper: 300,
        }
    }
}

impl TowerCosts {
    pub fn for_kind(&self, kind: TowerKind) -> u32 {
        match kind {
            TowerKind::Archer => self.archer,
            TowerKind::Cannon => self.cannon,
            TowerKind::Magic => self.magic,
            TowerKind::Sniper => self.sniper,
        }
    }
}

/// Balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Gold at the start of a run
    pub starting_gold: u32,
    /// Lives at the start of a run
    pub starting_lives: i32,
    /// Time between two spawns of the same wave (ms)
    pub spawn_interval_ms: f32,
    /// Countdown after a wave completes before the next may start (ms)
    pub wave_cooldown_ms: f32,
    /// Nuke cooldown (ms)
    pub nuke_cooldown_ms: f32,
    /// Max distance from a click to an empty spot for placement
    pub snap_radius: f32,
    /// Max distance from a click to a tower for selection
    pub select_radius: f32,
    /// Projectile travel per tick at 1x speed
    pub projectile_speed: f32,
    /// Tower purchase prices
    pub tower_costs: TowerCosts,
    /// Upgrade price as a fraction of the tower's cumulative cost
    pub upgrade_cost_factor: f64,
    /// Refund as a fraction of the tower's cumulative cost
    pub sell_refund_factor: f64,
    pub upgrade_damage_factor: f64,
    pub upgrade_range_factor: f64,
    pub upgrade_fire_rate_factor: f64,
    /// Completion bonus: base + per_wave * wave
    pub wave_bonus_base: u32,
    pub wave_bonus_per_wave: u32,
    /// Score for clearing a wave
    pub wave_clear_score: u64,
    /// Score per point of reward on a kill
    pub kill_score_multiplier: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_gold: 100,
            starting_lives: 20,
            spawn_interval_ms: 1000.0,
            wave_cooldown_ms: 5000.0,
            nuke_cooldown_ms: 30_000.0,
            snap_radius: 30.0,
            select_radius: 30.0,
            projectile_speed: 5.0,
            tower_costs: TowerCosts::default(),
            upgrade_cost_factor: 0.6,
            sell_refund_factor: 0.5,
            upgrade_damage_factor: 1.5,
            upgrade_range_factor: 1.1,
            upgrade_fire_rate_factor: 0.9,
            wave_bonus_base: 25,
            wave_bonus_per_wave: 5,
            wave_clear_score: 100,
            kill_score_multiplier: 10,
        }
    }
}

impl Tuning {
    /// Read tuning from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Bonus gold for completing `wave`
    pub fn wave_bonus(&self, wave: u32) -> u32 {
        self.wave_bonus_base + wave * self.wave_bonus_per_wave
    }
}
