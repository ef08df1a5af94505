//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Entities refer to
//! each other only through ids, never through references.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{Difficulty, EnemyKind, TowerKind};
use super::events::GameEvent;
use super::map::{PATH, TowerSpot, default_spots};
use super::wave::{WavePreview, wave_preview};
use crate::consts::PREVIEW_WAVES;
use crate::tuning::Tuning;

/// Stable handle to an enemy. Ids are never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Stable handle to a tower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(pub u32);

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty selection, nothing simulated yet
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen; no tick is applied
    Paused,
    /// Lives ran out
    GameOver,
}

/// Global time multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameSpeed {
    #[default]
    Normal,
    Fast,
}

impl GameSpeed {
    pub fn multiplier(&self) -> f32 {
        match self {
            GameSpeed::Normal => 1.0,
            GameSpeed::Fast => 2.0,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            GameSpeed::Normal => GameSpeed::Fast,
            GameSpeed::Fast => GameSpeed::Normal,
        }
    }
}

/// An enemy walking the path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// May drop below zero in storage; use [`Enemy::health_fraction`] for display
    pub health: i32,
    pub max_health: i32,
    /// Travel per tick at 1x speed
    pub speed: f32,
    pub reward: u32,
    /// Lives lost on breach
    pub damage: i32,
    /// Index of the last waypoint reached
    pub path_index: usize,
    pub armor: u32,
    pub is_boss: bool,
    pub size: f32,
}

impl Enemy {
    /// Health bar fill in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply one projectile hit; returns the damage actually dealt
    pub fn take_hit(&mut self, damage: u32) -> u32 {
        let dealt = armored_damage(damage, self.armor);
        self.health -= dealt as i32;
        dealt
    }
}

/// Damage after flat armor reduction, never below 1
#[inline]
pub fn armored_damage(damage: u32, armor: u32) -> u32 {
    damage.saturating_sub(armor).max(1)
}

/// A placed tower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub pos: Vec2,
    pub range: u32,
    pub damage: u32,
    /// Minimum ms between shots
    pub fire_rate: u32,
    /// Simulation clock at the last shot; `None` until the first one
    pub last_fire_ms: Option<f64>,
    pub level: u32,
    /// Purchase price plus every upgrade paid
    pub cost: u32,
}

impl Tower {
    /// Whether enough time has passed since the last shot
    pub fn ready(&self, now_ms: f64) -> bool {
        self.last_fire_ms
            .is_none_or(|last| now_ms - last > self.fire_rate as f64)
    }
}

/// A homing projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub target: EnemyId,
    pub damage: u32,
    /// Travel per tick at 1x speed
    pub speed: f32,
    /// Kind of the tower that fired it (for coloring)
    pub source: TowerKind,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub size: f32,
    /// HSL hue in degrees (reds through yellows)
    pub hue: f32,
    /// Remaining ticks
    pub life: u32,
}

/// Wave progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    /// 1-based wave number (the next or running wave)
    pub current: u32,
    pub active: bool,
    pub enemies_to_spawn: u32,
    /// Time accumulated toward the next spawn (ms)
    pub spawn_elapsed_ms: f32,
    /// Countdown before the next wave may start (ms)
    pub cooldown_ms: f32,
    pub boss_spawned: bool,
    /// Enemies spawned by the running wave
    pub spawned_this_wave: u32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            current: 1,
            active: false,
            enemies_to_spawn: 0,
            spawn_elapsed_ms: 0.0,
            cooldown_ms: 0.0,
            boss_spawned: false,
            spawned_this_wave: 0,
        }
    }
}

/// Currency and progress counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    pub gold: u32,
    pub lives: i32,
    pub score: u64,
    pub kill_count: u32,
    /// Lifetime damage: every projectile hit plus the max health of every kill
    pub total_damage: u64,
}

impl Economy {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            gold: tuning.starting_gold,
            lives: tuning.starting_lives,
            score: 0,
            kill_count: 0,
            total_damage: 0,
        }
    }

    /// Debit `amount` if affordable
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub speed: GameSpeed,
    /// Scaled simulation time since the run started (ms)
    pub clock_ms: f64,
    /// Ticks applied since the run started
    pub time_ticks: u64,
    pub economy: Economy,
    pub wave: WaveState,
    /// Remaining nuke cooldown (ms)
    pub nuke_cooldown_ms: f32,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub towers: Vec<Tower>,
    pub projectiles: Vec<Projectile>,
    pub spots: Vec<TowerSpot>,
    pub selected_tower: Option<TowerId>,
    /// Lookahead for the next waves (descriptive only)
    pub preview: [WavePreview; PREVIEW_WAVES],
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state sitting in the menu
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            difficulty: Difficulty::Normal,
            speed: GameSpeed::Normal,
            clock_ms: 0.0,
            time_ticks: 0,
            economy: Economy::new(&tuning),
            wave: WaveState::default(),
            nuke_cooldown_ms: 0.0,
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            spots: default_spots(),
            selected_tower: None,
            preview: wave_preview(1),
            particles: Vec::new(),
            events: Vec::new(),
            tuning,
            next_id: 1,
        }
    }

    /// Reset everything for a fresh run and enter `Playing`
    pub fn reset(&mut self, difficulty: Difficulty) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(tuning);
        self.difficulty = difficulty;
        self.phase = GamePhase::Playing;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether a run is in progress (paused or not)
    pub fn in_run(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn tower(&self, id: TowerId) -> Option<&Tower> {
        self.towers.iter().find(|t| t.id == id)
    }

    pub fn selected(&self) -> Option<&Tower> {
        self.selected_tower.and_then(|id| self.tower(id))
    }

    /// Queue an event for the presentation layer
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Travel per tick multiplier
    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed.multiplier()
    }

    /// Start position of every enemy
    #[inline]
    pub fn spawn_point(&self) -> Vec2 {
        PATH[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_sits_in_menu() {
        let state = GameState::new(Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.economy.gold, 100);
        assert_eq!(state.economy.lives, 20);
        assert_eq!(state.wave.current, 1);
        assert_eq!(state.spots.len(), 10);
    }

    #[test]
    fn test_reset_keeps_tuning() {
        let tuning = Tuning {
            starting_gold: 999,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning);
        state.economy.gold = 3;
        state.wave.current = 7;
        state.reset(Difficulty::Hard);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.economy.gold, 999);
        assert_eq!(state.wave.current, 1);
    }

    #[test]
    fn test_health_fraction_clamps_display_only() {
        let mut enemy = Enemy {
            id: EnemyId(1),
            kind: EnemyKind::Minion,
            pos: Vec2::ZERO,
            health: 10,
            max_health: 60,
            speed: 1.5,
            reward: 10,
            damage: 1,
            path_index: 0,
            armor: 0,
            is_boss: false,
            size: 20.0,
        };
        enemy.take_hit(22);
        assert_eq!(enemy.health, -12);
        assert_eq!(enemy.health_fraction(), 0.0);
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_armor_floors_at_one() {
        assert_eq!(armored_damage(22, 0), 22);
        assert_eq!(armored_damage(22, 5), 17);
        assert_eq!(armored_damage(3, 10), 1);
    }

    #[test]
    fn test_tower_ready_uses_strict_comparison() {
        let mut tower = Tower {
            id: TowerId(1),
            kind: TowerKind::Archer,
            pos: Vec2::ZERO,
            range: 150,
            damage: 22,
            fire_rate: 1000,
            last_fire_ms: None,
            level: 1,
            cost: 100,
        };
        assert!(tower.ready(0.0));
        tower.last_fire_ms = Some(500.0);
        assert!(!tower.ready(1500.0));
        assert!(tower.ready(1500.5));
    }
}
