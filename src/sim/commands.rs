//! Player and global actions
//!
//! Every action validates against the current state and either applies
//! completely or returns a [`CommandError`] leaving the state untouched.

use std::error::Error;
use std::fmt;

use glam::Vec2;

use super::catalog::{Difficulty, TowerKind};
use super::effects::spawn_explosion;
use super::events::{GameEvent, SoundCue};
use super::state::{GamePhase, GameSpeed, GameState, Tower, TowerId};
use super::wave;
use crate::{distance, scale_floor};

/// Why a command was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// No run in progress (menu or game over)
    NotPlaying,
    /// The action costs more gold than available
    InsufficientGold { needed: u32, available: u32 },
    /// No empty spot within snap radius of the requested position
    NoValidSpot,
    /// The action needs a selected tower
    NoTowerSelected,
    WaveAlreadyActive,
    /// The inter-wave countdown is still running
    WaveCooldown { remaining_ms: f32 },
    NukeCoolingDown { remaining_ms: f32 },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotPlaying => write!(f, "no game in progress"),
            CommandError::InsufficientGold { needed, available } => {
                write!(f, "not enough gold ({available}/{needed})")
            }
            CommandError::NoValidSpot => write!(f, "no available spot nearby"),
            CommandError::NoTowerSelected => write!(f, "no tower selected"),
            CommandError::WaveAlreadyActive => write!(f, "wave already active"),
            CommandError::WaveCooldown { remaining_ms } => {
                write!(f, "next wave available in {}s", (remaining_ms / 1000.0).ceil())
            }
            CommandError::NukeCoolingDown { remaining_ms } => {
                write!(f, "nuke ready in {}s", (remaining_ms / 1000.0).ceil())
            }
        }
    }
}

impl Error for CommandError {}

/// Outcome of a successful upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upgrade {
    pub level: u32,
    pub price: u32,
}

fn require_run(state: &GameState) -> Result<(), CommandError> {
    if state.in_run() {
        Ok(())
    } else {
        Err(CommandError::NotPlaying)
    }
}

/// Signal a rejection to the player and pass it on
fn reject(state: &mut GameState, err: CommandError) -> CommandError {
    state.emit(GameEvent::Sound(SoundCue::Error));
    state.emit(GameEvent::Notification(capitalize(&err.to_string())));
    err
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Begin (or restart) a run at `difficulty`
pub fn start_game(state: &mut GameState, difficulty: Difficulty) {
    state.reset(difficulty);
    log::info!("New game on {} difficulty", difficulty.as_str());
}

/// Pause or resume; returns whether the game is now paused
pub fn toggle_pause(state: &mut GameState) -> Result<bool, CommandError> {
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        _ => return Err(CommandError::NotPlaying),
    };
    Ok(state.phase == GamePhase::Paused)
}

pub fn set_game_speed(state: &mut GameState, speed: GameSpeed) {
    state.speed = speed;
}

/// Flip between 1x and 2x; returns the new speed
pub fn toggle_fast_forward(state: &mut GameState) -> GameSpeed {
    state.speed = state.speed.toggled();
    state.speed
}

/// Nearest empty spot strictly within `radius` of `pos`
pub fn nearest_free_spot(state: &GameState, pos: Vec2, radius: f32) -> Option<usize> {
    let mut best = None;
    let mut best_dist = f32::INFINITY;
    for (index, spot) in state.spots.iter().enumerate() {
        if spot.is_occupied() {
            continue;
        }
        let dist = distance(pos, spot.pos);
        if dist < best_dist && dist < radius {
            best_dist = dist;
            best = Some(index);
        }
    }
    best
}

/// Build a tower of `kind` on the empty spot nearest to `pos`
pub fn place_tower(state: &mut GameState, kind: TowerKind, pos: Vec2) -> Result<TowerId, CommandError> {
    require_run(state)?;

    let cost = state.tuning.tower_costs.for_kind(kind);
    if state.economy.gold < cost {
        let err = CommandError::InsufficientGold {
            needed: cost,
            available: state.economy.gold,
        };
        return Err(reject(state, err));
    }

    let Some(spot_index) = nearest_free_spot(state, pos, state.tuning.snap_radius) else {
        return Err(reject(state, CommandError::NoValidSpot));
    };

    let stats = kind.stats(state.wave.current);
    let id = TowerId(state.next_entity_id());
    let spot_pos = state.spots[spot_index].pos;
    state.towers.push(Tower {
        id,
        kind,
        pos: spot_pos,
        range: stats.range,
        damage: stats.damage,
        fire_rate: stats.fire_rate,
        last_fire_ms: None,
        level: 1,
        cost,
    });
    state.spots[spot_index].tower = Some(id);
    state.economy.gold -= cost;

    log::debug!("Placed {} tower {:?} at {}", kind.as_str(), id, spot_pos);
    state.emit(GameEvent::Sound(SoundCue::TowerPlace));
    state.emit(GameEvent::Notification("Tower placed".to_string()));
    Ok(id)
}

/// Select the tower nearest to `pos` within the select radius, or clear the
/// selection when there is none
pub fn select_tower_near(state: &mut GameState, pos: Vec2) -> Option<TowerId> {
    let mut best = None;
    let mut best_dist = state.tuning.select_radius;
    for tower in &state.towers {
        let dist = distance(pos, tower.pos);
        if dist < best_dist {
            best_dist = dist;
            best = Some(tower.id);
        }
    }
    state.selected_tower = best;
    best
}

/// Price of the next upgrade for `tower`
pub fn upgrade_price(state: &GameState, tower: &Tower) -> u32 {
    scale_floor(tower.cost, state.tuning.upgrade_cost_factor)
}

/// Refund for selling `tower`
pub fn sell_refund(state: &GameState, tower: &Tower) -> u32 {
    scale_floor(tower.cost, state.tuning.sell_refund_factor)
}

fn selected_index(state: &GameState) -> Result<usize, CommandError> {
    let id = state.selected_tower.ok_or(CommandError::NoTowerSelected)?;
    state
        .towers
        .iter()
        .position(|t| t.id == id)
        .ok_or(CommandError::NoTowerSelected)
}

/// Level up the selected tower
pub fn upgrade_selected_tower(state: &mut GameState) -> Result<Upgrade, CommandError> {
    require_run(state)?;
    let index = selected_index(state)?;
    let price = upgrade_price(state, &state.towers[index]);

    if !state.economy.try_spend(price) {
        let err = CommandError::InsufficientGold {
            needed: price,
            available: state.economy.gold,
        };
        return Err(reject(state, err));
    }

    let tuning = &state.tuning;
    let tower = &mut state.towers[index];
    tower.level += 1;
    tower.damage = scale_floor(tower.damage, tuning.upgrade_damage_factor);
    tower.range = scale_floor(tower.range, tuning.upgrade_range_factor);
    tower.fire_rate = scale_floor(tower.fire_rate, tuning.upgrade_fire_rate_factor);
    tower.cost += price;
    let level = tower.level;

    state.emit(GameEvent::Sound(SoundCue::Upgrade));
    state.emit(GameEvent::Notification(format!("Tower upgraded to level {level}")));
    Ok(Upgrade { level, price })
}

/// Sell the selected tower; returns the refund
pub fn sell_selected_tower(state: &mut GameState) -> Result<u32, CommandError> {
    require_run(state)?;
    let index = selected_index(state)?;
    let tower = state.towers.remove(index);
    let refund = sell_refund(state, &tower);

    if let Some(spot) = state.spots.iter_mut().find(|s| s.tower == Some(tower.id)) {
        spot.tower = None;
    }
    state.economy.gold += refund;
    state.selected_tower = None;

    state.emit(GameEvent::Notification(format!("Tower sold for {refund} gold")));
    Ok(refund)
}

/// Start the next wave
pub fn start_next_wave(state: &mut GameState) -> Result<u32, CommandError> {
    require_run(state)?;
    wave::start_wave(state)
}

/// Wipe every live enemy, paying out their rewards; returns the gold earned
pub fn activate_nuke(state: &mut GameState) -> Result<u32, CommandError> {
    require_run(state)?;
    if state.nuke_cooldown_ms > 0.0 {
        return Err(CommandError::NukeCoolingDown {
            remaining_ms: state.nuke_cooldown_ms,
        });
    }

    let enemies = std::mem::take(&mut state.enemies);
    let total_reward: u32 = enemies.iter().map(|e| e.reward).sum();
    for enemy in &enemies {
        spawn_explosion(state, enemy.pos);
    }
    state.economy.gold += total_reward;
    state.economy.score += total_reward as u64 * state.tuning.kill_score_multiplier;
    state.nuke_cooldown_ms = state.tuning.nuke_cooldown_ms;

    log::info!("Nuke cleared {} enemies for {} gold", enemies.len(), total_reward);
    state.emit(GameEvent::Sound(SoundCue::Nuke));
    state.emit(GameEvent::Notification(format!(
        "Nuke activated! +{total_reward} gold"
    )));
    Ok(total_reward)
}

/// End the run. Only the first call has any effect.
pub fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over on wave {} with score {}",
        state.wave.current,
        state.economy.score
    );
    state.emit(GameEvent::Sound(SoundCue::GameOver));
    state.emit(GameEvent::GameOver {
        score: state.economy.score,
        wave: state.wave.current,
    });
}
