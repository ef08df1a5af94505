//! Particle effects feed
//!
//! Particles never influence gameplay. Their jitter comes from an integer hash
//! of the tick and position so that effects do not consume draws from the
//! spawn RNG.

use glam::Vec2;

use super::events::GameEvent;
use super::state::{GameState, Particle};
use crate::consts::{EXPLOSION_PARTICLES, PARTICLE_LIFE_TICKS};

/// Upper bound on live particles; oldest are dropped first
pub const MAX_PARTICLES: usize = 1000;

/// Deterministic value in [0, 1) for particle `i` of a burst
#[inline]
fn hash_unit(seed: u32, i: u32, salt: u32) -> f32 {
    let hash = seed
        .wrapping_mul(2654435761)
        .wrapping_add(i.wrapping_mul(7919))
        .wrapping_add(salt.wrapping_mul(104729));
    let hash = (hash ^ (hash >> 15)).wrapping_mul(2246822519);
    let hash = hash ^ (hash >> 13);
    (hash % 1000) as f32 / 1000.0
}

/// Emit a burst of particles at `pos` and announce it
pub fn spawn_explosion(state: &mut GameState, pos: Vec2) {
    let seed = (state.time_ticks as u32)
        ^ pos.x.to_bits().rotate_left(7)
        ^ pos.y.to_bits().rotate_left(19);

    for i in 0..EXPLOSION_PARTICLES as u32 {
        if state.particles.len() >= MAX_PARTICLES {
            state.particles.remove(0);
        }
        let vel = Vec2::new(
            hash_unit(seed, i, 1) * 6.0 - 3.0,
            hash_unit(seed, i, 2) * 6.0 - 3.0,
        );
        state.particles.push(Particle {
            pos,
            vel,
            size: hash_unit(seed, i, 3) * 5.0 + 2.0,
            hue: hash_unit(seed, i, 4) * 60.0,
            life: PARTICLE_LIFE_TICKS,
        });
    }

    state.emit(GameEvent::Explosion { pos });
}

/// Advance every particle one tick and drop the expired ones
pub fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}
