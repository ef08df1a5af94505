//! Static enemy and tower definitions
//!
//! Base stats grow linearly with the wave number; enemy health is further
//! scaled by the difficulty multiplier.

use serde::{Deserialize, Serialize};

/// Difficulty selected at the start of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Brutal,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Brutal => "Brutal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "brutal" => Some(Difficulty::Brutal),
            _ => None,
        }
    }

    /// Enemy health multiplier
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.2,
            Difficulty::Brutal => 1.5,
        }
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Minion,
    Tank,
    Swarm,
    Boss,
}

/// Enemy stats for a given wave and difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    pub speed: f32,
    pub reward: u32,
    pub damage: i32,
    pub armor: u32,
    pub is_boss: bool,
    pub size: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Minion,
        EnemyKind::Tank,
        EnemyKind::Swarm,
        EnemyKind::Boss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Minion => "minion",
            EnemyKind::Tank => "tank",
            EnemyKind::Swarm => "swarm",
            EnemyKind::Boss => "boss",
        }
    }

    /// Health before difficulty scaling
    pub fn base_health(&self, wave: u32) -> u32 {
        match self {
            EnemyKind::Minion => 50 + wave * 10,
            EnemyKind::Tank => 150 + wave * 20,
            EnemyKind::Swarm => 30 + wave * 5,
            EnemyKind::Boss => 500 + wave * 50,
        }
    }

    pub fn stats(&self, wave: u32, difficulty: Difficulty) -> EnemyStats {
        let health = (self.base_health(wave) as f64 * difficulty.multiplier()).floor() as i32;
        let (speed, reward, damage, armor) = match self {
            EnemyKind::Minion => (1.5, 10, 1, 0),
            EnemyKind::Tank => (0.7, 25, 3, 5),
            EnemyKind::Swarm => (2.0, 5, 1, 0),
            EnemyKind::Boss => (0.5, 100, 5, 10),
        };
        EnemyStats {
            health,
            speed,
            reward,
            damage,
            armor,
            is_boss: *self == EnemyKind::Boss,
            size: if *self == EnemyKind::Boss { 35.0 } else { 20.0 },
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EnemyKind::Minion => "#ff6b6b",
            EnemyKind::Tank => "#747d8c",
            EnemyKind::Swarm => "#a55eea",
            EnemyKind::Boss => "#ff9f1a",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            EnemyKind::Minion => "👾",
            EnemyKind::Tank => "🛡️",
            EnemyKind::Swarm => "🐝",
            EnemyKind::Boss => "👑",
        }
    }
}

/// Tower types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    Archer,
    Cannon,
    Magic,
    Sniper,
}

/// Tower stats at placement time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerStats {
    pub range: u32,
    pub damage: u32,
    /// Minimum ms between shots
    pub fire_rate: u32,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Archer,
        TowerKind::Cannon,
        TowerKind::Magic,
        TowerKind::Sniper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TowerKind::Archer => "Archer",
            TowerKind::Cannon => "Cannon",
            TowerKind::Magic => "Magic",
            TowerKind::Sniper => "Sniper",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "archer" => Some(TowerKind::Archer),
            "cannon" => Some(TowerKind::Cannon),
            "magic" => Some(TowerKind::Magic),
            "sniper" => Some(TowerKind::Sniper),
            _ => None,
        }
    }

    /// Range at level 1 (also used for the placement preview)
    pub fn base_range(&self) -> u32 {
        match self {
            TowerKind::Archer => 150,
            TowerKind::Cannon => 120,
            TowerKind::Magic => 180,
            TowerKind::Sniper => 250,
        }
    }

    pub fn stats(&self, wave: u32) -> TowerStats {
        let (damage, fire_rate) = match self {
            TowerKind::Archer => (20 + wave * 2, 1000),
            TowerKind::Cannon => (40 + wave * 3, 2000),
            TowerKind::Magic => (30 + wave * 4, 1500),
            TowerKind::Sniper => (60 + wave * 5, 3000),
        };
        TowerStats {
            range: self.base_range(),
            damage,
            fire_rate,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TowerKind::Archer => "#74b9ff",
            TowerKind::Cannon => "#ff9f1a",
            TowerKind::Magic => "#a55eea",
            TowerKind::Sniper => "#eb3b5a",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TowerKind::Archer => "🏹",
            TowerKind::Cannon => "💣",
            TowerKind::Magic => "🔮",
            TowerKind::Sniper => "🎯",
        }
    }
}
