//! Combat resolver: tower targeting, firing cadence and projectile flight

use super::effects::spawn_explosion;
use super::events::{GameEvent, SoundCue};
use super::state::{Enemy, EnemyId, GameState, Projectile};
use crate::{direction, distance};

/// Closest enemy strictly inside `range`.
///
/// Ties keep the earliest enemy in spawn order.
pub fn find_target(tower_pos: glam::Vec2, range: f32, enemies: &[Enemy]) -> Option<EnemyId> {
    let mut best = None;
    let mut best_dist = range;
    for enemy in enemies {
        let dist = distance(tower_pos, enemy.pos);
        if dist < best_dist {
            best_dist = dist;
            best = Some(enemy.id);
        }
    }
    best
}

/// Let every ready tower pick a target and fire.
///
/// A tower with nothing in range keeps its timer and retries next tick.
pub fn update_towers(state: &mut GameState) {
    let now = state.clock_ms;
    let projectile_speed = state.tuning.projectile_speed;
    let mut shots = Vec::new();

    for tower in state.towers.iter_mut() {
        if !tower.ready(now) {
            continue;
        }
        let Some(target) = find_target(tower.pos, tower.range as f32, &state.enemies) else {
            continue;
        };
        tower.last_fire_ms = Some(now);
        shots.push((tower.id, tower.pos, tower.damage, tower.kind, target));
    }

    for (tower, pos, damage, source, target) in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            target,
            damage,
            speed: projectile_speed,
            source,
        });
        state.emit(GameEvent::TowerFired { tower, target });
        state.emit(GameEvent::Sound(SoundCue::Shoot));
    }
}

/// Move every projectile toward its target's current position and resolve
/// impacts. Projectiles whose target is gone are dropped without effect.
pub fn update_projectiles(state: &mut GameState) {
    let multiplier = state.speed_multiplier();
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut in_flight = Vec::with_capacity(projectiles.len());

    for mut projectile in projectiles {
        let Some(index) = state.enemies.iter().position(|e| e.id == projectile.target) else {
            log::debug!(
                "Projectile {} lost target {:?}",
                projectile.id,
                projectile.target
            );
            continue;
        };

        let target_pos = state.enemies[index].pos;
        let (dir, dist) = direction(projectile.pos, target_pos);
        let travel = projectile.speed * multiplier;

        if dist < travel {
            let dealt = state.enemies[index].take_hit(projectile.damage);
            state.economy.total_damage += dealt as u64;
            spawn_explosion(state, target_pos);
            state.emit(GameEvent::Sound(SoundCue::Explosion));
        } else {
            projectile.pos += dir * travel;
            in_flight.push(projectile);
        }
    }

    state.projectiles = in_flight;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::catalog::{Difficulty, EnemyKind, TowerKind};
    use crate::sim::state::{Tower, TowerId, armored_damage};
    use crate::sim::wave::spawn_enemy;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.reset(Difficulty::Normal);
        state
    }

    fn archer_at(state: &mut GameState, pos: Vec2) -> TowerId {
        let id = TowerId(state.next_entity_id());
        let stats = TowerKind::Archer.stats(1);
        state.towers.push(Tower {
            id,
            kind: TowerKind::Archer,
            pos,
            range: stats.range,
            damage: stats.damage,
            fire_rate: stats.fire_rate,
            last_fire_ms: None,
            level: 1,
            cost: 100,
        });
        id
    }

    fn enemy_at(state: &mut GameState, kind: EnemyKind, pos: Vec2) -> EnemyId {
        let id = spawn_enemy(state, kind);
        state.enemies.last_mut().unwrap().pos = pos;
        id
    }

    #[test]
    fn test_targets_nearest_in_range() {
        let mut state = playing_state();
        let _far = enemy_at(&mut state, EnemyKind::Minion, Vec2::new(100.0, 0.0));
        let near = enemy_at(&mut state, EnemyKind::Minion, Vec2::new(50.0, 0.0));
        assert_eq!(find_target(Vec2::ZERO, 150.0, &state.enemies), Some(near));
    }

    #[test]
    fn test_range_is_strict_and_ties_keep_first() {
        let mut state = playing_state();
        let _edge = enemy_at(&mut state, EnemyKind::Minion, Vec2::new(150.0, 0.0));
        assert_eq!(find_target(Vec2::ZERO, 150.0, &state.enemies), None);

        let first = enemy_at(&mut state, EnemyKind::Minion, Vec2::new(0.0, 60.0));
        let _second = enemy_at(&mut state, EnemyKind::Minion, Vec2::new(60.0, 0.0));
        assert_eq!(find_target(Vec2::ZERO, 150.0, &state.enemies), Some(first));
    }

    #[test]
    fn test_tower_fires_then_waits_for_fire_rate() {
        let mut state = playing_state();
        let tower = archer_at(&mut state, Vec2::ZERO);
        let target = enemy_at(&mut state, EnemyKind::Minion, Vec2::new(50.0, 0.0));

        update_towers(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.events.contains(&GameEvent::TowerFired { tower, target }));

        state.clock_ms = 1000.0;
        update_towers(&mut state);
        assert_eq!(state.projectiles.len(), 1);

        state.clock_ms = 1000.5;
        update_towers(&mut state);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_no_target_keeps_timer() {
        let mut state = playing_state();
        archer_at(&mut state, Vec2::ZERO);
        enemy_at(&mut state, EnemyKind::Minion, Vec2::new(500.0, 0.0));
        state.clock_ms = 42.0;
        update_towers(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.towers[0].last_fire_ms, None);
    }

    #[test]
    fn test_projectile_homes_and_hits_through_armor() {
        let mut state = playing_state();
        archer_at(&mut state, Vec2::ZERO);
        enemy_at(&mut state, EnemyKind::Tank, Vec2::new(20.0, 0.0));
        update_towers(&mut state);

        for _ in 0..3 {
            update_projectiles(&mut state);
        }
        assert_eq!(state.projectiles.len(), 1);
        assert!((state.projectiles[0].pos.x - 15.0).abs() < 1e-4);

        // Target moves; the projectile follows the new position
        state.enemies[0].pos = Vec2::new(15.0, 4.0);
        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());

        let tank = &state.enemies[0];
        assert_eq!(tank.health, tank.max_health - 17);
        assert_eq!(state.economy.total_damage, 17);
        assert!(state.events.contains(&GameEvent::Sound(SoundCue::Explosion)));
    }

    #[test]
    fn test_projectile_discarded_when_target_removed() {
        let mut state = playing_state();
        archer_at(&mut state, Vec2::ZERO);
        enemy_at(&mut state, EnemyKind::Minion, Vec2::new(100.0, 0.0));
        update_towers(&mut state);
        state.enemies.clear();

        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.economy.total_damage, 0);
        assert!(state.particles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_health_after_hits(
            armor in 0u32..20,
            hits in prop::collection::vec(1u32..100, 0..20),
        ) {
            let mut state = playing_state();
            spawn_enemy(&mut state, EnemyKind::Boss);
            let enemy = &mut state.enemies[0];
            enemy.armor = armor;
            let max = enemy.max_health;
            let mut expected = max;
            for dmg in &hits {
                enemy.take_hit(*dmg);
                expected -= armored_damage(*dmg, armor) as i32;
            }
            prop_assert_eq!(enemy.health, expected);
            prop_assert!(enemy.health_fraction() >= 0.0);
            prop_assert!(enemy.health_fraction() <= 1.0);
        }
    }
}
